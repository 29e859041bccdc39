#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]

mod command_state;
mod config;
mod error;
mod input_loop;
mod key_map;
mod pose_cache;
mod publisher;

pub use crate::{
    command_state::*, config::*, error::*, input_loop::*, key_map::*, pose_cache::*,
    publisher::*,
};
