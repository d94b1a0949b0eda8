//! Transformation module.
//!
//! - Coerce: value-level date and number coercion
//! - Clean: the seven column rules applied to a loaded table
//! - Pipeline: load → clean → save

pub mod clean;
pub mod coerce;
pub mod pipeline;

pub use clean::{clean_data, CleanReport};
pub use coerce::{parse_date, parse_datetime, parse_number};
pub use pipeline::run;
