#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]

mod error;
mod teleop_keyboard_config;
pub mod utils;

pub use error::*;
pub use teleop_keyboard_config::*;
