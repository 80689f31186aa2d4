use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::layout::{GalleryLayout, LayoutConfig, LayoutPlan};
use crate::model::{GroupSizing, Item};

/// What a full layout leaves behind so a viewport-only change can skip
/// partitioning: per-group weights and counts, and the last group extents.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickResizeCache<K> {
    plan: LayoutPlan<K>,
    sizing: Vec<GroupSizing>,
    viewport: u32,
}

impl<K: Clone> QuickResizeCache<K> {
    pub fn new(plan: LayoutPlan<K>, layout: &GalleryLayout<K>, viewport: u32) -> Self {
        Self {
            plan,
            sizing: layout.groups.clone(),
            viewport,
        }
    }

    /// Re-dimension the cached partition for a new viewport.
    pub fn resize(&mut self, viewport: u32) -> Result<GalleryLayout<K>> {
        let layout = self.plan.render(viewport)?;
        self.sizing = layout.groups.clone();
        self.viewport = viewport;
        tracing::debug!(
            viewport,
            groups = self.sizing.len(),
            "quick-resized gallery"
        );
        Ok(layout)
    }

    pub fn plan(&self) -> &LayoutPlan<K> {
        &self.plan
    }

    /// Group summaries from the most recent dimensioning.
    pub fn sizing(&self) -> &[GroupSizing] {
        &self.sizing
    }

    pub fn viewport(&self) -> u32 {
        self.viewport
    }
}

/// One gallery's layout state: its items, configuration, randomness source
/// and quick-resize cache.
///
/// The session is single-writer; callers serialize overlapping requests.
pub struct GallerySession<K, R = StdRng> {
    items: Vec<Item<K>>,
    config: LayoutConfig,
    rng: R,
    cache: Option<QuickResizeCache<K>>,
}

impl<K: Clone> GallerySession<K, StdRng> {
    /// Session with an OS-seeded shuffle source.
    pub fn new(items: Vec<Item<K>>, config: LayoutConfig) -> Self {
        Self::with_rng(items, config, StdRng::from_os_rng())
    }

    /// Session whose shuffles are reproducible from `seed`.
    pub fn seeded(items: Vec<Item<K>>, config: LayoutConfig, seed: u64) -> Self {
        Self::with_rng(items, config, StdRng::seed_from_u64(seed))
    }
}

impl<K: Clone, R: Rng> GallerySession<K, R> {
    pub fn with_rng(items: Vec<Item<K>>, config: LayoutConfig, rng: R) -> Self {
        Self {
            items,
            config,
            rng,
            cache: None,
        }
    }

    pub fn items(&self) -> &[Item<K>] {
        &self.items
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&QuickResizeCache<K>> {
        self.cache.as_ref()
    }

    /// Replace the item set. Always invalidates the cache.
    pub fn set_items(&mut self, items: Vec<Item<K>>) {
        self.items = items;
        self.invalidate();
    }

    /// Replace the configuration. The cache survives only if nothing but the
    /// viewport changed.
    pub fn set_config(&mut self, config: LayoutConfig) {
        if !self.config.same_partitioning(&config) {
            self.invalidate();
        }
        self.config = config;
    }

    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            tracing::debug!("quick-resize cache invalidated");
        }
    }

    /// Full layout: re-weigh, re-partition and re-dimension, refreshing the
    /// cache. On error the previous cache is dropped and nothing is returned.
    pub fn layout(&mut self) -> Result<GalleryLayout<K>> {
        self.layout_at(self.config.viewport_primary)
    }

    /// Lay out for a new viewport, reusing the cached partition when it is
    /// still valid and falling back to a full layout otherwise. The stored
    /// viewport only changes once the new layout has succeeded.
    pub fn resize(&mut self, viewport: u32) -> Result<GalleryLayout<K>> {
        let layout = match self.cache.as_mut() {
            Some(cache) => cache.resize(viewport)?,
            None => self.layout_at(viewport)?,
        };
        self.config.viewport_primary = viewport;
        Ok(layout)
    }

    fn layout_at(&mut self, viewport: u32) -> Result<GalleryLayout<K>> {
        self.invalidate();
        let plan = LayoutPlan::build(&self.items, &self.config, &mut self.rng)?;
        let layout = plan.render(viewport)?;
        tracing::info!(
            items = layout.len(),
            groups = layout.groups.len(),
            viewport,
            "full gallery layout"
        );
        self.cache = Some(QuickResizeCache::new(plan, &layout, viewport));
        Ok(layout)
    }
}
