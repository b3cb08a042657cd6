//! Text parsing module
//!
//! This module turns caller-supplied text into the values the formatter works with:
//! numeric strings into `f64` and BCP 47 language tags into ICU locales.

mod language_tag;
mod numeric;

pub use language_tag::parse_language_tag;
pub use numeric::{fraction_digit_count, number_to_string, to_number};
