/// Diagnostic tool to verify weights → partition → dimension → equalize pipeline
use balanced_gallery::input::GalleryFile;
use balanced_gallery::layout::dimension::dimension_group;
use balanced_gallery::layout::LayoutPlan;
use balanced_gallery::model::{aggregate_weight, weigh};
use balanced_gallery::partition;
use balanced_gallery::session::QuickResizeCache;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("balanced_gallery=debug".parse()?),
        )
        .init();

    let path = std::env::args().nth(1).map(PathBuf::from);
    // Fixed seed so unordered runs can be compared between invocations
    let seed = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    println!("=== DIAGNOSTIC: Weights → Partition → Layout Pipeline ===");
    match &path {
        Some(p) => println!("Gallery: {}", p.display()),
        None => println!("Gallery: <stdin>"),
    }

    let file = GalleryFile::load(path.as_deref())?;
    let items = file.items()?;
    let config = file.resolved_config(&items);

    println!(
        "\n[1] Config: {:?}, sections={}, maintain_order={}, shuffle={}, padding={}, viewport={}",
        config.orientation,
        config.section_count,
        config.maintain_order,
        config.shuffle_when_unordered,
        config.padding,
        config.viewport_primary
    );

    // Weights
    let weighted = weigh(&items, config.orientation)?;
    println!("\n[2] Weights ({} items):", weighted.len());
    for (i, w) in weighted.iter().enumerate().take(20) {
        println!(
            "    [{}] '{}' ratio={:.3} weight={:.3}",
            i, w.item.id, w.item.aspect_ratio, w.weight
        );
    }
    if weighted.len() > 20 {
        println!("    ... ({} more)", weighted.len() - 20);
    }

    // Partition
    let mut rng = StdRng::seed_from_u64(seed);
    let groups = partition::partition(weighted, config.sections(), config.strategy(), &mut rng);
    println!("\n[3] Partition: {} groups (seed={})", groups.len(), seed);
    for (g, group) in groups.iter().enumerate() {
        let names: Vec<&str> = group.iter().map(|w| w.item.id.as_str()).collect();
        println!(
            "    [{}] weight={:.3} items={} {:?}",
            g,
            aggregate_weight(group),
            group.len(),
            names
        );
    }

    // Raw dimensioning per group, before equalization
    println!("\n[4] Per-group sizing (before equalization):");
    let mut fidelity_errors = 0;
    for (g, group) in groups.iter().enumerate() {
        let weights: Vec<f64> = group.iter().map(|w| w.weight).collect();
        let total = aggregate_weight(group);
        let sized = dimension_group(
            g,
            total,
            &weights,
            config.viewport_primary,
            config.padding,
            config.orientation,
        )?;
        let emitted: i64 = sized
            .rects
            .iter()
            .map(|r| r.primary(config.orientation) as i64)
            .sum();
        let ideal = (config.viewport_primary as f64 - config.padding as f64 * group.len() as f64).max(0.0);
        let drift = ideal - emitted as f64;
        println!(
            "    [{}] cross={}px primary_sum={}px ideal={:.2}px drift={:+.3}px extent={}px",
            g,
            sized.rects.first().map(|r| r.primary(config.orientation.cross())).unwrap_or(0),
            emitted,
            ideal,
            drift,
            sized.sizing.extent
        );
        if drift.abs() > 1.0 {
            fidelity_errors += 1;
        }
    }

    // Full render (includes equalization)
    let plan = LayoutPlan::from_partition(groups, &config);
    let layout = plan.render(config.viewport_primary)?;
    println!(
        "\n[5] Rendered layout: {} items, equalize={}",
        layout.len(),
        plan.equalize
    );
    for sizing in &layout.groups {
        println!(
            "    [{}] extent={}px weight={:.3} items={}",
            sizing.group_index, sizing.extent, sizing.aggregate_weight, sizing.item_count
        );
    }

    // Check for anomalies
    println!("\n[6] Checking for anomalies:");
    println!("    Pixel-sum fidelity violations: {}", fidelity_errors);
    if plan.equalize {
        let first = layout.groups.first().map(|g| g.extent);
        let uneven = layout.groups.iter().filter(|g| Some(g.extent) != first).count();
        println!("    Groups off the common extent: {}", uneven);
    }
    let zero_sized = layout
        .items
        .iter()
        .filter(|p| p.rect.width == 0 || p.rect.height == 0)
        .count();
    println!("    Zero-sized items: {}", zero_sized);

    // Quick-resize equivalence
    if let Some(viewport) = file.resize_to {
        println!("\n[7] Quick-resize to {}px:", viewport);
        let mut cache = QuickResizeCache::new(plan.clone(), &layout, config.viewport_primary);
        let quick = cache.resize(viewport)?;
        let full = plan.render(viewport)?;
        println!(
            "    Quick-resize {} full re-dimension",
            if quick == full { "matches" } else { "DIFFERS FROM" }
        );
        for sizing in cache.sizing() {
            println!("    [{}] extent={}px", sizing.group_index, sizing.extent);
        }
    }

    Ok(())
}
