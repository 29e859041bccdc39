mod key_source;
mod motion_sink;
mod navigation;
mod transform_resolver;

pub use key_source::*;
pub use motion_sink::*;
pub use navigation::*;
pub use transform_resolver::*;
