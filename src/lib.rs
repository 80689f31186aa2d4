// Public library interface for balanced-gallery.
// The CLI and the debug-layout tool are thin wrappers over these modules.

pub mod error;
pub mod input;
pub mod layout;
pub mod model;
pub mod partition;
pub mod session;

pub use error::{LayoutError, Result};
pub use layout::{compute_layout, GalleryLayout, LayoutConfig, PlacedItem};
pub use model::{GroupSizing, Item, Orientation, PixelRect};
pub use session::{GallerySession, QuickResizeCache};
