mod client;
pub mod domain;
pub mod draft;
mod error;
pub mod form;
pub mod normalize;
pub mod payload;

pub use client::*;
pub use error::*;
