//! Invoice record types, validation, totals and currency formatting.
//!
//! Everything here is pure data transformation; rendering lives in the
//! `pdf` module.

mod builder;
mod config;
mod error;
mod fixture;
pub mod locales;
mod money;
mod totals;
mod types;
mod validation;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use fixture::*;
pub use money::*;
pub use totals::*;
pub use types::*;
pub use validation::*;
