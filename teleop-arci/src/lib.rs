#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]

mod clients;
mod error;
mod traits;
mod types;

pub use clients::*;
pub use error::*;
pub use traits::*;
pub use types::*;

// re-export
pub use async_trait::async_trait;
pub use nalgebra::{self, Isometry3, Vector3};
