mod dummy_key_source;
mod dummy_motion_sink;
mod dummy_navigation;
mod dummy_transform_resolver;

pub use dummy_key_source::*;
pub use dummy_motion_sink::*;
pub use dummy_navigation::*;
pub use dummy_transform_resolver::*;
