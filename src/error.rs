use thiserror::Error;

/// Failures surfaced by the layout engine.
///
/// Every error is raised before any output is written, so a failed call never
/// leaves a partially sized gallery behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// An item's aspect ratio is not a positive finite number, or its weight
    /// overflows once accumulated.
    #[error("item {index} has invalid aspect ratio {ratio}")]
    InvalidAspectRatio { index: usize, ratio: f64 },

    /// An item was built from a natural size with a zero side.
    #[error("item {index} has invalid natural size {width}x{height}")]
    InvalidDimensions { index: usize, width: u32, height: u32 },

    /// A group's aggregate weight is not positive, so no extent can be derived.
    #[error("group {group} has non-positive aggregate weight {weight}")]
    DegenerateGroup { group: usize, weight: f64 },

    /// The viewport budget (or grid geometry) cannot hold any item.
    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
