//! `vstolib`: variant set-algebra and spatial-matching toolkit.

pub mod algebra;
pub mod cli;
pub mod common;
pub mod defaults;
pub mod error;
pub mod filter;
pub mod index;
pub mod model;
pub mod oracle;
pub mod schema;
pub mod tsv;

pub use error::{Error, Result};
