//! Locale support for number formatting
//!
//! Number symbols, grouping sizes and digits come from ICU's compiled CLDR
//! data. This module adds what the decimal formatter does not cover: where the
//! percent sign and currency symbol go, currency display data, and the host
//! default locale.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::sync::OnceLock;

use icu::locale::{Locale, locale};

use crate::parser::parse_language_tag;

/// Error type for locale operations
#[derive(Debug, Clone, PartialEq)]
pub enum LocaleError {
    /// An error occurred while parsing locale data
    ParseError(String),
}

impl fmt::Display for LocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleError::ParseError(msg) => write!(f, "Error parsing locale data: {}", msg),
        }
    }
}

impl std::error::Error for LocaleError {}

type Result<T> = std::result::Result<T, LocaleError>;

/// Placement of the percent sign and currency symbol for one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylePatterns {
    /// Percent pattern, `#` stands for the number
    pub percent: String,
    /// Currency pattern, `#` for the number and `¤` for the currency
    pub currency: String,
}

impl Default for StylePatterns {
    fn default() -> Self {
        Self {
            percent: "#%".to_string(),
            currency: "¤#".to_string(),
        }
    }
}

/// Display data for one ISO 4217 currency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub symbol: String,
    pub narrow_symbol: String,
    /// Minor unit digits, e.g. 2 for USD and 0 for JPY
    pub digits: u32,
}

impl CurrencyInfo {
    fn for_unknown_code(code: &str) -> Self {
        Self {
            symbol: code.to_string(),
            narrow_symbol: code.to_string(),
            digits: 2,
        }
    }
}

/// Provides access to style patterns and currency data
struct LocaleManager {
    style_patterns: HashMap<String, StylePatterns>,
    base_patterns: StylePatterns,
    currencies: HashMap<String, CurrencyInfo>,
}

// Global singleton for embedded locale data
static LOCALE_MANAGER: OnceLock<LocaleManager> = OnceLock::new();

// Host default locale, resolved once per process
static DEFAULT_LOCALE: OnceLock<Locale> = OnceLock::new();

impl LocaleManager {
    fn new() -> Self {
        let mut manager = Self {
            style_patterns: HashMap::new(),
            base_patterns: StylePatterns::default(),
            currencies: HashMap::new(),
        };

        if let Err(e) = manager.load_embedded_data() {
            tracing::error!("Failed to load embedded locale data: {}", e);
        }

        manager
    }

    fn load_embedded_data(&mut self) -> Result<()> {
        let style_patterns_toml = include_str!("locale/style_patterns.toml");
        self.parse_style_patterns(style_patterns_toml)?;

        let currencies_toml = include_str!("locale/currencies.toml");
        self.parse_currencies(currencies_toml)?;

        Ok(())
    }

    fn parse_style_patterns(&mut self, toml_str: &str) -> Result<()> {
        let parsed_toml: toml::Value =
            toml::from_str(toml_str).map_err(|e| LocaleError::ParseError(e.to_string()))?;

        let table = parsed_toml
            .as_table()
            .ok_or_else(|| LocaleError::ParseError("Root is not a table".to_string()))?;

        if let Some(base) = table.get("base") {
            apply_style_patterns(&mut self.base_patterns, base)?;
        }

        for (locale_id, value) in table {
            if locale_id == "base" {
                continue;
            }

            let mut patterns = self.base_patterns.clone();

            // Regional tables refine their language table
            if let Some((language, _)) = locale_id.split_once('-') {
                if let Some(parent) = table.get(language) {
                    apply_style_patterns(&mut patterns, parent)?;
                }
            }
            apply_style_patterns(&mut patterns, value)?;

            self.style_patterns.insert(locale_id.to_string(), patterns);
        }

        Ok(())
    }

    fn parse_currencies(&mut self, toml_str: &str) -> Result<()> {
        let parsed_toml: toml::Value =
            toml::from_str(toml_str).map_err(|e| LocaleError::ParseError(e.to_string()))?;

        let table = parsed_toml
            .as_table()
            .ok_or_else(|| LocaleError::ParseError("Root is not a table".to_string()))?;

        for (code, value) in table {
            let entry = value
                .as_table()
                .ok_or_else(|| LocaleError::ParseError(format!("{} is not a table", code)))?;

            let symbol = entry
                .get("symbol")
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    LocaleError::ParseError(format!("Missing or invalid symbol in {}", code))
                })?;
            let narrow_symbol = entry
                .get("narrow")
                .and_then(|v| v.as_str())
                .unwrap_or(symbol);
            let digits = entry
                .get("digits")
                .and_then(|v| v.as_integer())
                .ok_or_else(|| {
                    LocaleError::ParseError(format!("Missing or invalid digits in {}", code))
                })?;

            self.currencies.insert(
                code.to_string(),
                CurrencyInfo {
                    symbol: symbol.to_string(),
                    narrow_symbol: narrow_symbol.to_string(),
                    digits: digits as u32,
                },
            );
        }

        Ok(())
    }

    fn get() -> &'static Self {
        LOCALE_MANAGER.get_or_init(Self::new)
    }

    /// Patterns for "language-REGION", then "language", then the base table
    fn patterns_for(&self, locale: &Locale) -> &StylePatterns {
        let language = locale.id.language.as_str();
        let regional = locale
            .id
            .region
            .map(|region| format!("{}-{}", language, region.as_str()));

        regional
            .and_then(|id| self.style_patterns.get(&id))
            .or_else(|| self.style_patterns.get(language))
            .unwrap_or(&self.base_patterns)
    }
}

/// Apply the keys of one TOML pattern table over existing patterns
fn apply_style_patterns(patterns: &mut StylePatterns, value: &toml::Value) -> Result<()> {
    let table = value
        .as_table()
        .ok_or_else(|| LocaleError::ParseError("Locale patterns are not a table".to_string()))?;

    if let Some(pattern) = table.get("percent").and_then(|v| v.as_str()) {
        if !pattern.contains('#') {
            return Err(LocaleError::ParseError(format!(
                "Percent pattern without number: {}",
                pattern
            )));
        }
        patterns.percent = pattern.to_string();
    }

    if let Some(pattern) = table.get("currency").and_then(|v| v.as_str()) {
        if !pattern.contains('#') || !pattern.contains('¤') {
            return Err(LocaleError::ParseError(format!(
                "Currency pattern needs number and currency: {}",
                pattern
            )));
        }
        patterns.currency = pattern.to_string();
    }

    Ok(())
}

/// Percent and currency patterns for a locale
///
/// Locales without their own entry use the language's entry, or "#%" and "¤#".
pub fn style_patterns(locale: &Locale) -> StylePatterns {
    LocaleManager::get().patterns_for(locale).clone()
}

/// Look up display data for an ISO 4217 code
///
/// Unknown but well-formed codes render as the code itself with two digits.
pub fn currency_info(code: &str) -> CurrencyInfo {
    LocaleManager::get()
        .currencies
        .get(code)
        .cloned()
        .unwrap_or_else(|| CurrencyInfo::for_unknown_code(code))
}

/// The host default locale
///
/// Read once from `LC_ALL`, `LC_NUMERIC` or `LANG` (first non-empty wins).
/// Falls back to "en-US" when unset, "C"/"POSIX" or unparseable.
pub fn default_locale() -> &'static Locale {
    DEFAULT_LOCALE.get_or_init(|| {
        let from_env = ["LC_ALL", "LC_NUMERIC", "LANG"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .find(|value| !value.is_empty());

        let resolved = from_env
            .as_deref()
            .and_then(posix_locale_to_tag)
            .unwrap_or_else(|| locale!("en-US"));

        tracing::debug!("Host default locale {:?} resolved to {}", from_env, resolved);
        resolved
    })
}

/// Convert a POSIX locale name such as "de_DE.UTF-8@euro" to a language tag
pub fn posix_locale_to_tag(posix: &str) -> Option<Locale> {
    let name = posix.split(['.', '@']).next().unwrap_or_default();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    parse_language_tag(&name.replace('_', "-")).ok()
}
