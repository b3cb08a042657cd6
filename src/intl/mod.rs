//! Locale-aware number formatting facility
//!
//! `IntlNumberFormat` is created from an optional list of language tags and a
//! set of `FormatOptions`. Creation validates the tags and options and builds
//! an ICU `DecimalFormatter` for the resolved locale; `format` then rounds each
//! number as a `fixed_decimal::Decimal` and renders it with CLDR symbols.
//!
//! # Examples
//! ```
//! use locale_number_format::{FormatOptions, IntlNumberFormat};
//!
//! let formatter = IntlNumberFormat::new(Some(&["de"]), &FormatOptions::default()).unwrap();
//! assert_eq!(formatter.format(1234567.891), "1.234.567,891");
//! ```

use std::fmt;

use fixed_decimal::{
    Decimal, FloatPrecision, SignDisplay as DecimalSignDisplay, SignedRoundingMode,
    UnsignedRoundingMode,
};
use icu::decimal::options::{DecimalFormatterOptions, GroupingStrategy};
use icu::decimal::{DecimalFormatter, DecimalFormatterPreferences};
use icu::locale::Locale;

use crate::locale::{self, CurrencyInfo, StylePatterns};
use crate::parser::parse_language_tag;
use crate::types::{CurrencyDisplay, FormatOptions, SignDisplay, Style, UseGrouping};

/// Largest accepted fraction digit bound
pub const MAX_FRACTION_DIGITS: u32 = 100;
/// Largest accepted minimum integer digit count
pub const MAX_INTEGER_DIGITS: u32 = 21;

const NO_BREAK_SPACE: char = '\u{a0}';

/// Error type for formatter creation
#[derive(Debug, Clone, PartialEq)]
pub enum IntlError {
    /// A requested locale is not a structurally valid language tag
    InvalidLanguageTag(String),
    /// An option value is outside its allowed range
    RangeError(String),
    /// A required option is missing
    TypeError(String),
}

impl fmt::Display for IntlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntlError::InvalidLanguageTag(tag) => {
                write!(f, "Incorrect locale information provided: {:?}", tag)
            }
            IntlError::RangeError(msg) => write!(f, "Range error: {}", msg),
            IntlError::TypeError(msg) => write!(f, "Type error: {}", msg),
        }
    }
}

impl std::error::Error for IntlError {}

/// Options after defaults and digit bounds have been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub locale: String,
    pub style: Style,
    pub currency: Option<String>,
    pub currency_display: CurrencyDisplay,
    pub use_grouping: UseGrouping,
    pub sign_display: SignDisplay,
    pub minimum_integer_digits: u32,
    pub minimum_fraction_digits: u32,
    pub maximum_fraction_digits: u32,
}

/// A number formatter bound to one resolved locale and option set
#[derive(Debug)]
pub struct IntlNumberFormat {
    formatter: DecimalFormatter,
    patterns: StylePatterns,
    currency: Option<CurrencyInfo>,
    options: ResolvedOptions,
}

impl IntlNumberFormat {
    /// Create a formatter
    ///
    /// Every requested tag must be well formed. The first one is used; ICU
    /// falls back through its parent locales to the CLDR root when it has no
    /// data for it.
    ///
    /// # Arguments
    /// * `locales` - Requested language tags in priority order; `None` uses the host default
    /// * `options` - Formatting options
    ///
    /// # Returns
    /// * `Result<IntlNumberFormat, IntlError>` - Fails on an invalid tag or option
    pub fn new(locales: Option<&[&str]>, options: &FormatOptions) -> Result<Self, IntlError> {
        let requested: Vec<Locale> = locales
            .unwrap_or_default()
            .iter()
            .map(|tag| parse_language_tag(tag))
            .collect::<Result<_, _>>()?;

        let locale = requested
            .into_iter()
            .next()
            .unwrap_or_else(|| locale::default_locale().clone());
        tracing::debug!("Resolved locales {:?} to {}", locales, locale);

        let style = options.style.unwrap_or_default();
        let currency = match style {
            Style::Currency => Some(validate_currency(options.currency.as_deref())?),
            _ => None,
        };
        let currency_info = currency.as_deref().map(locale::currency_info);

        let default_fraction_digits = match (&currency_info, style) {
            (Some(info), _) => (info.digits, info.digits),
            (None, Style::Percent) => (0, 0),
            (None, _) => (0, 3),
        };
        let (minimum_fraction_digits, maximum_fraction_digits) =
            resolve_fraction_digits(options, default_fraction_digits)?;

        let minimum_integer_digits = options.minimum_integer_digits.unwrap_or(1);
        if !(1..=MAX_INTEGER_DIGITS).contains(&minimum_integer_digits) {
            return Err(IntlError::RangeError(format!(
                "minimumIntegerDigits value is out of range: {}",
                minimum_integer_digits
            )));
        }

        let use_grouping = options.use_grouping.unwrap_or_default();
        let mut formatter_options = DecimalFormatterOptions::default();
        formatter_options.grouping_strategy = Some(grouping_strategy(use_grouping));
        let formatter =
            DecimalFormatter::try_new(DecimalFormatterPreferences::from(&locale), formatter_options)
                .map_err(|e| {
                    IntlError::RangeError(format!("No number data for {}: {}", locale, e))
                })?;

        Ok(Self {
            formatter,
            patterns: locale::style_patterns(&locale),
            currency: currency_info,
            options: ResolvedOptions {
                locale: locale.to_string(),
                style,
                currency,
                currency_display: options.currency_display.unwrap_or_default(),
                use_grouping,
                sign_display: options.sign_display.unwrap_or_default(),
                minimum_integer_digits,
                minimum_fraction_digits,
                maximum_fraction_digits,
            },
        })
    }

    /// The locale tag this formatter resolved to
    pub fn resolved_locale(&self) -> &str {
        &self.options.locale
    }

    pub fn resolved_options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// Format a number
    ///
    /// NaN renders as "NaN" and infinities as "∞" with the usual sign rules.
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }

        let (sign, body) = if value.is_infinite() {
            // Borrow the locale's sign from a formatted unit
            let unit = Decimal::from(if value < 0.0 { -1 } else { 1 });
            let (sign, _) = self.format_decimal(unit);
            (sign, "∞".to_string())
        } else {
            self.format_decimal(self.to_decimal(value))
        };

        let mut result = sign;
        result.push_str(&self.apply_style(&body));
        result
    }

    /// Round and pad `value` to the resolved digit options
    fn to_decimal(&self, value: f64) -> Decimal {
        let mut decimal = Decimal::try_from_f64(value, FloatPrecision::RoundTrip)
            .unwrap_or_else(|_| Decimal::from(0));
        if self.options.style == Style::Percent {
            decimal.absolute.multiply_pow10(2);
        }

        decimal.round_with_mode(
            -(self.options.maximum_fraction_digits as i16),
            SignedRoundingMode::Unsigned(UnsignedRoundingMode::HalfExpand),
        );
        decimal.absolute.trim_end();
        decimal
            .absolute
            .pad_end(-(self.options.minimum_fraction_digits as i16));
        decimal
            .absolute
            .pad_start(self.options.minimum_integer_digits as i16);
        decimal
    }

    /// Locale-formatted sign prefix and digits, split at the first digit
    fn format_decimal(&self, mut decimal: Decimal) -> (String, String) {
        decimal.apply_sign_display(decimal_sign_display(self.options.sign_display));
        let formatted = self.formatter.format(&decimal).to_string();

        let split = formatted.find(char::is_numeric).unwrap_or(0);
        let (sign, body) = formatted.split_at(split);
        (sign.to_string(), body.to_string())
    }

    fn apply_style(&self, body: &str) -> String {
        match self.options.style {
            Style::Decimal => body.to_string(),
            Style::Percent => self.patterns.percent.replacen('#', body, 1),
            Style::Currency => self.apply_currency_pattern(body),
        }
    }

    fn apply_currency_pattern(&self, body: &str) -> String {
        let code = self.options.currency.as_deref().unwrap_or_default();
        let symbol = match (&self.currency, self.options.currency_display) {
            (Some(info), CurrencyDisplay::Symbol) => info.symbol.as_str(),
            (Some(info), CurrencyDisplay::NarrowSymbol) => info.narrow_symbol.as_str(),
            _ => code,
        };

        let pattern = &self.patterns.currency;
        let mut result = String::with_capacity(pattern.len() + body.len() + symbol.len());
        let mut chars = pattern.chars().peekable();
        let mut previous: Option<char> = None;

        while let Some(c) = chars.next() {
            match c {
                '¤' => {
                    // Letters directly touching the digits get a no-break space
                    if previous == Some('#') && symbol.starts_with(char::is_alphabetic) {
                        result.push(NO_BREAK_SPACE);
                    }
                    result.push_str(symbol);
                    if chars.peek() == Some(&'#') && symbol.ends_with(char::is_alphabetic) {
                        result.push(NO_BREAK_SPACE);
                    }
                }
                '#' => result.push_str(body),
                other => result.push(other),
            }
            previous = Some(c);
        }

        result
    }
}

fn grouping_strategy(use_grouping: UseGrouping) -> GroupingStrategy {
    match use_grouping {
        UseGrouping::Auto => GroupingStrategy::Auto,
        UseGrouping::Always => GroupingStrategy::Always,
        UseGrouping::Min2 => GroupingStrategy::Min2,
        UseGrouping::Off => GroupingStrategy::Never,
    }
}

fn decimal_sign_display(sign_display: SignDisplay) -> DecimalSignDisplay {
    match sign_display {
        SignDisplay::Auto => DecimalSignDisplay::Auto,
        SignDisplay::Always => DecimalSignDisplay::Always,
        SignDisplay::Never => DecimalSignDisplay::Never,
        SignDisplay::ExceptZero => DecimalSignDisplay::ExceptZero,
        SignDisplay::Negative => DecimalSignDisplay::Negative,
    }
}

/// Seam for the host's number formatting capability
///
/// `format_number` only needs to create a formatter for some tags and options
/// and format one number with it. Hosts with their own locale data can supply
/// a different implementation.
pub trait NumberFormatFacility {
    fn format(
        &self,
        locales: Option<&[&str]>,
        options: &FormatOptions,
        value: f64,
    ) -> Result<String, IntlError>;
}

/// The built-in facility backed by [`IntlNumberFormat`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Intl;

impl NumberFormatFacility for Intl {
    fn format(
        &self,
        locales: Option<&[&str]>,
        options: &FormatOptions,
        value: f64,
    ) -> Result<String, IntlError> {
        Ok(IntlNumberFormat::new(locales, options)?.format(value))
    }
}

fn validate_currency(currency: Option<&str>) -> Result<String, IntlError> {
    let code = currency.ok_or_else(|| {
        IntlError::TypeError("Currency code is required with currency style.".to_string())
    })?;

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(IntlError::RangeError(format!(
            "Invalid currency code: {}",
            code
        )));
    }

    Ok(code.to_ascii_uppercase())
}

fn resolve_fraction_digits(
    options: &FormatOptions,
    (default_min, default_max): (u32, u32),
) -> Result<(u32, u32), IntlError> {
    for (name, value) in [
        ("minimumFractionDigits", options.minimum_fraction_digits),
        ("maximumFractionDigits", options.maximum_fraction_digits),
    ] {
        if let Some(value) = value.filter(|v| *v > MAX_FRACTION_DIGITS) {
            return Err(IntlError::RangeError(format!(
                "{} value is out of range: {}",
                name, value
            )));
        }
    }

    match (options.minimum_fraction_digits, options.maximum_fraction_digits) {
        (None, None) => Ok((default_min, default_max)),
        (Some(min), None) => Ok((min, default_max.max(min))),
        (None, Some(max)) => Ok((default_min.min(max), max)),
        (Some(min), Some(max)) if min > max => Err(IntlError::RangeError(format!(
            "maximumFractionDigits value is out of range: {} is less than {}",
            max, min
        ))),
        (Some(min), Some(max)) => Ok((min, max)),
    }
}
