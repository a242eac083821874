pub mod bounds;
pub mod config;
pub mod constants;
pub mod events;
pub mod geo;
pub mod projection;
pub mod transform;
pub mod viewport;

// Re-export the essential types
pub use bounds::{Bounds, GeoBounds};
pub use config::{InputOptions, MapOptions, ViewOptions};
pub use events::{EventManager, ListenerId, ViewEvent};
pub use geo::{CoordinateLike, GeoPoint, Point};
pub use projection::{Projection, SphericalMercator, TileCoord};
pub use transform::Transform;
pub use viewport::{AnimateOptions, FitBoundsOptions, ViewState, Viewport};
