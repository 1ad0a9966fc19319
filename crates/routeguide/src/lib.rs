#![doc = include_str!("../README.md")]

mod chat;
mod error;
mod geo;
mod guide;
mod point;
mod store;

pub use crate::chat::*;
pub use crate::error::*;
pub use crate::geo::*;
pub use crate::guide::*;
pub use crate::point::*;
pub use crate::store::*;
