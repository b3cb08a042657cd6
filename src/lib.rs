pub mod formatter;
pub mod intl;
pub mod locale;
pub mod parser;
pub mod types;

// Main API
pub use formatter::{
    LocaleTags, format_number, format_number_with, get_default_format_options,
    resolve_locale_tags,
};
pub use intl::{Intl, IntlError, IntlNumberFormat, NumberFormatFacility, ResolvedOptions};
pub use locale::{CurrencyInfo, StylePatterns, default_locale};
pub use parser::{parse_language_tag, to_number};
pub use types::*;
