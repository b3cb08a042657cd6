//! Type definitions for locale-aware number formatting
//!
//! This module defines the values callers hand to the formatter: the user's
//! number format preference, the locale context, the formatting options and
//! the raw input value.

use serde::{Deserialize, Serialize};

/// The user's chosen thousands-separator / decimal-character convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormatPreference {
    /// 1,234,567.89
    CommaDecimal,
    /// 1.234.567,89
    DecimalComma,
    /// 1 234 567,89
    SpaceComma,
    /// Use the host's default locale
    System,
    /// Do not format at all
    None,
}

/// The caller's locale: a language tag plus an optional format preference
///
/// An absent `number_format` means the language tag decides the convention.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocaleContext {
    /// Language tag such as "en" or "de"
    #[serde(default)]
    pub language: String,
    /// Number format preference
    #[serde(default)]
    pub number_format: Option<NumberFormatPreference>,
}

impl LocaleContext {
    /// A context for `language` with no number format preference
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            number_format: None,
        }
    }

    /// Sets the number format preference
    pub fn with_number_format(mut self, number_format: NumberFormatPreference) -> Self {
        self.number_format = Some(number_format);
        self
    }
}

/// Formatting style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    #[default]
    Decimal,
    Percent,
    Currency,
}

/// How a currency is rendered in `Style::Currency`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyDisplay {
    #[default]
    Symbol,
    #[serde(alias = "narrowSymbol")]
    NarrowSymbol,
    Code,
}

/// Grouping separator strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseGrouping {
    /// Follow the locale's minimum grouping digits
    #[default]
    Auto,
    /// Always group, even four-digit numbers in `es`
    Always,
    /// Group only when the leading group has at least two digits
    Min2,
    /// Never group
    #[serde(rename = "false")]
    Off,
}

/// When to show the sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignDisplay {
    /// Minus for negative numbers, including negative zero
    #[default]
    Auto,
    /// Sign for every number, including zero
    Always,
    /// No sign
    Never,
    /// Sign for non-zero numbers only
    #[serde(alias = "exceptZero")]
    ExceptZero,
    /// Minus for negative numbers, but not negative zero
    Negative,
}

/// Formatting directives passed through to the number formatting facility
///
/// Every field is optional; unset fields fall back to the style's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub style: Option<Style>,
    /// ISO 4217 currency code, required for `Style::Currency`
    pub currency: Option<String>,
    #[serde(alias = "currencyDisplay")]
    pub currency_display: Option<CurrencyDisplay>,
    #[serde(alias = "useGrouping")]
    pub use_grouping: Option<UseGrouping>,
    #[serde(alias = "signDisplay")]
    pub sign_display: Option<SignDisplay>,
    #[serde(alias = "minimumIntegerDigits")]
    pub minimum_integer_digits: Option<u32>,
    #[serde(alias = "minimumFractionDigits")]
    pub minimum_fraction_digits: Option<u32>,
    #[serde(alias = "maximumFractionDigits")]
    pub maximum_fraction_digits: Option<u32>,
}

impl FormatOptions {
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.style = Some(Style::Currency);
        self.currency = Some(currency.into());
        self
    }

    pub fn with_currency_display(mut self, currency_display: CurrencyDisplay) -> Self {
        self.currency_display = Some(currency_display);
        self
    }

    pub fn with_use_grouping(mut self, use_grouping: UseGrouping) -> Self {
        self.use_grouping = Some(use_grouping);
        self
    }

    pub fn with_sign_display(mut self, sign_display: SignDisplay) -> Self {
        self.sign_display = Some(sign_display);
        self
    }

    pub fn with_minimum_integer_digits(mut self, digits: u32) -> Self {
        self.minimum_integer_digits = Some(digits);
        self
    }

    pub fn with_minimum_fraction_digits(mut self, digits: u32) -> Self {
        self.minimum_fraction_digits = Some(digits);
        self
    }

    pub fn with_maximum_fraction_digits(mut self, digits: u32) -> Self {
        self.maximum_fraction_digits = Some(digits);
        self
    }

    /// Sets both fraction digit bounds to the same value
    pub fn with_fraction_digits(self, digits: u32) -> Self {
        self.with_minimum_fraction_digits(digits)
            .with_maximum_fraction_digits(digits)
    }

    /// Whether the caller pinned either fraction digit bound
    pub fn has_fraction_digits(&self) -> bool {
        self.minimum_fraction_digits.is_some() || self.maximum_fraction_digits.is_some()
    }
}

/// The value to format: a number or its textual representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberInput<'a> {
    Number(f64),
    Text(&'a str),
}

impl NumberInput<'_> {
    /// Numeric coercion; unparseable text yields NaN
    pub fn to_number(&self) -> f64 {
        match self {
            NumberInput::Number(n) => *n,
            NumberInput::Text(text) => crate::parser::to_number(text),
        }
    }

    /// Truthiness of the raw input: empty text, zero and NaN are falsy
    pub fn is_falsy(&self) -> bool {
        match self {
            NumberInput::Number(n) => *n == 0.0 || n.is_nan(),
            NumberInput::Text(text) => text.is_empty(),
        }
    }

    /// The input's plain string form; text is returned verbatim
    pub fn to_plain_string(&self) -> String {
        match self {
            NumberInput::Number(n) => crate::parser::number_to_string(*n),
            NumberInput::Text(text) => (*text).to_string(),
        }
    }
}

impl From<f64> for NumberInput<'_> {
    fn from(value: f64) -> Self {
        NumberInput::Number(value)
    }
}

impl From<f32> for NumberInput<'_> {
    fn from(value: f32) -> Self {
        NumberInput::Number(value as f64)
    }
}

impl From<i32> for NumberInput<'_> {
    fn from(value: i32) -> Self {
        NumberInput::Number(value as f64)
    }
}

impl From<i64> for NumberInput<'_> {
    fn from(value: i64) -> Self {
        NumberInput::Number(value as f64)
    }
}

impl From<u32> for NumberInput<'_> {
    fn from(value: u32) -> Self {
        NumberInput::Number(value as f64)
    }
}

impl From<u64> for NumberInput<'_> {
    fn from(value: u64) -> Self {
        NumberInput::Number(value as f64)
    }
}

impl<'a> From<&'a str> for NumberInput<'a> {
    fn from(value: &'a str) -> Self {
        NumberInput::Text(value)
    }
}

impl<'a> From<&'a String> for NumberInput<'a> {
    fn from(value: &'a String) -> Self {
        NumberInput::Text(value.as_str())
    }
}
