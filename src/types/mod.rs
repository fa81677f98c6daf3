//! Type definitions for pricedash

mod error;
mod price;
mod product;

pub use error::*;
pub use price::*;
pub use product::*;
