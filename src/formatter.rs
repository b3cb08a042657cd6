//! Number formatting by user preference
//!
//! This module picks locale tags from the user's number format preference,
//! keeps meaningful trailing zeros of numeric text, and hands the value to a
//! number formatting facility. The main entry point is the `format_number` function.

use crate::intl::{Intl, NumberFormatFacility};
use crate::parser::fraction_digit_count;
use crate::types::{FormatOptions, LocaleContext, NumberFormatPreference, NumberInput};

const COMMA_DECIMAL_TAGS: &[&str] = &["en-US", "en"];
const DECIMAL_COMMA_TAGS: &[&str] = &["de", "es", "it"];
const SPACE_COMMA_TAGS: &[&str] = &["fr", "sv", "cs"];

/// Largest fraction digit count derived from numeric text
const MAX_DERIVED_FRACTION_DIGITS: usize = crate::intl::MAX_FRACTION_DIGITS as usize;

/// Which locales a formatting request should use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleTags<'a> {
    /// A fixed, ordered tag list for one of the convention presets
    Preset(&'static [&'static str]),
    /// The caller's own language tag
    Language(&'a str),
    /// The host default locale
    HostDefault,
    /// Formatting is switched off
    Bypass,
}

impl<'a> LocaleTags<'a> {
    /// The tag list to request, `None` meaning the host default
    pub fn to_vec(self) -> Option<Vec<&'a str>> {
        match self {
            LocaleTags::Preset(tags) => Some(tags.to_vec()),
            LocaleTags::Language(tag) => Some(vec![tag]),
            LocaleTags::HostDefault | LocaleTags::Bypass => None,
        }
    }
}

/// Map the caller's preference to the locale tags to format with
///
/// # Examples
/// ```
/// use locale_number_format::{LocaleContext, LocaleTags, NumberFormatPreference, resolve_locale_tags};
///
/// let context = LocaleContext::new("en").with_number_format(NumberFormatPreference::DecimalComma);
/// assert_eq!(resolve_locale_tags(Some(&context)), LocaleTags::Preset(&["de", "es", "it"]));
/// ```
pub fn resolve_locale_tags(locale: Option<&LocaleContext>) -> LocaleTags<'_> {
    let Some(locale) = locale else {
        return LocaleTags::HostDefault;
    };

    match locale.number_format {
        Some(NumberFormatPreference::CommaDecimal) => LocaleTags::Preset(COMMA_DECIMAL_TAGS),
        Some(NumberFormatPreference::DecimalComma) => LocaleTags::Preset(DECIMAL_COMMA_TAGS),
        Some(NumberFormatPreference::SpaceComma) => LocaleTags::Preset(SPACE_COMMA_TAGS),
        Some(NumberFormatPreference::System) => LocaleTags::HostDefault,
        Some(NumberFormatPreference::None) => LocaleTags::Bypass,
        None if locale.language.is_empty() => LocaleTags::HostDefault,
        None => LocaleTags::Language(&locale.language),
    }
}

/// Fill in fraction digits so numeric text keeps its trailing zeros
///
/// When the value is text and the caller set neither fraction digit bound, both
/// bounds become the number of digits after the text's decimal point, so "1.50"
/// formats with two digits rather than as 1.5. Numeric values and options with
/// an explicit bound pass through unchanged.
pub fn get_default_format_options(
    value: NumberInput<'_>,
    options: Option<&FormatOptions>,
) -> FormatOptions {
    let mut resolved = options.cloned().unwrap_or_default();

    let NumberInput::Text(text) = value else {
        return resolved;
    };

    if !resolved.has_fraction_digits() {
        let digits = fraction_digit_count(text).min(MAX_DERIVED_FRACTION_DIGITS) as u32;
        resolved.minimum_fraction_digits = Some(digits);
        resolved.maximum_fraction_digits = Some(digits);
    }

    resolved
}

/// Format a number for display according to the user's locale preference
///
/// # Arguments
/// * `value` - The number, or numeric text, to format
/// * `locale` - The user's language and number format preference
/// * `options` - Formatting options passed through to the formatter
///
/// # Returns
/// * `String` - The formatted number. Text that is not a number, or any value
///   when the preference is `None`, is returned as-is (falsy values as "").
///
/// # Examples
/// ```
/// use locale_number_format::{format_number, LocaleContext, NumberFormatPreference};
///
/// let locale = LocaleContext::new("en").with_number_format(NumberFormatPreference::CommaDecimal);
/// assert_eq!(format_number(1234567.89, Some(&locale), None), "1,234,567.89");
/// assert_eq!(format_number("1.50", Some(&locale), None), "1.50");
/// assert_eq!(format_number("abc", Some(&locale), None), "abc");
/// ```
pub fn format_number<'a>(
    value: impl Into<NumberInput<'a>>,
    locale: Option<&LocaleContext>,
    options: Option<&FormatOptions>,
) -> String {
    format_number_with(&Intl, value, locale, options)
}

/// Same as [`format_number`], using the given number formatting facility
///
/// When the facility rejects the resolved locale tags the failure is logged and
/// formatting is retried with the host default locale.
pub fn format_number_with<'a, F>(
    facility: &F,
    value: impl Into<NumberInput<'a>>,
    locale: Option<&LocaleContext>,
    options: Option<&FormatOptions>,
) -> String
where
    F: NumberFormatFacility + ?Sized,
{
    let value = value.into();
    let number = value.to_number();
    let tags = resolve_locale_tags(locale);

    if number.is_nan() || tags == LocaleTags::Bypass {
        return passthrough(&value);
    }

    let options = get_default_format_options(value, options);
    let requested = tags.to_vec();

    match facility.format(requested.as_deref(), &options, number) {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::error!(
                "Failed to format {} for locales {:?}, retrying with the default locale: {}",
                number,
                requested,
                e
            );
            facility
                .format(None, &options, number)
                .unwrap_or_else(|e| {
                    tracing::error!("Failed to format {} with the default locale: {}", number, e);
                    passthrough(&value)
                })
        }
    }
}

fn passthrough(value: &NumberInput<'_>) -> String {
    if value.is_falsy() {
        String::new()
    } else {
        value.to_plain_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intl::IntlError;
    use std::cell::RefCell;

    /// Records every request and fails for tag lists it was told to reject
    struct RecordingFacility {
        reject_tags: bool,
        reject_default: bool,
        calls: RefCell<Vec<Option<Vec<String>>>>,
    }

    impl RecordingFacility {
        fn new(reject_tags: bool, reject_default: bool) -> Self {
            Self {
                reject_tags,
                reject_default,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl NumberFormatFacility for RecordingFacility {
        fn format(
            &self,
            locales: Option<&[&str]>,
            _options: &FormatOptions,
            value: f64,
        ) -> Result<String, IntlError> {
            self.calls
                .borrow_mut()
                .push(locales.map(|tags| tags.iter().map(|t| t.to_string()).collect()));
            match locales {
                Some(tags) if self.reject_tags => {
                    Err(IntlError::InvalidLanguageTag(tags.join(",")))
                }
                None if self.reject_default => Err(IntlError::RangeError("no".to_string())),
                _ => Ok(format!("<{value}>")),
            }
        }
    }

    fn context(preference: Option<NumberFormatPreference>) -> LocaleContext {
        LocaleContext {
            language: "nl".to_string(),
            number_format: preference,
        }
    }

    #[test]
    fn test_resolve_locale_tags() {
        use NumberFormatPreference::*;

        assert_eq!(
            resolve_locale_tags(Some(&context(Some(CommaDecimal)))),
            LocaleTags::Preset(&["en-US", "en"])
        );
        assert_eq!(
            resolve_locale_tags(Some(&context(Some(SpaceComma)))),
            LocaleTags::Preset(&["fr", "sv", "cs"])
        );
        assert_eq!(
            resolve_locale_tags(Some(&context(Some(System)))),
            LocaleTags::HostDefault
        );
        assert_eq!(
            resolve_locale_tags(Some(&context(Some(NumberFormatPreference::None)))),
            LocaleTags::Bypass
        );
        assert_eq!(
            resolve_locale_tags(Some(&context(Option::None))),
            LocaleTags::Language("nl")
        );
        assert_eq!(resolve_locale_tags(Option::None), LocaleTags::HostDefault);
        assert_eq!(
            resolve_locale_tags(Some(&LocaleContext::default())),
            LocaleTags::HostDefault
        );
    }

    #[test]
    fn test_default_options_from_text() {
        let options = get_default_format_options(NumberInput::Text("1.50"), None);
        assert_eq!(options.minimum_fraction_digits, Some(2));
        assert_eq!(options.maximum_fraction_digits, Some(2));

        let options = get_default_format_options(NumberInput::Text("42"), None);
        assert_eq!(options.minimum_fraction_digits, Some(0));
        assert_eq!(options.maximum_fraction_digits, Some(0));

        let options = get_default_format_options(NumberInput::Text("1.5e3"), None);
        assert_eq!(options.minimum_fraction_digits, Some(3));
        assert_eq!(options.maximum_fraction_digits, Some(3));
    }

    #[test]
    fn test_default_options_pass_through() {
        let numeric = get_default_format_options(NumberInput::Number(1.5), None);
        assert_eq!(numeric, FormatOptions::default());

        let explicit = FormatOptions::default().with_maximum_fraction_digits(1);
        let options = get_default_format_options(NumberInput::Text("1.50"), Some(&explicit));
        assert_eq!(options, explicit);

        let grouping = FormatOptions::default().with_use_grouping(crate::types::UseGrouping::Off);
        let options = get_default_format_options(NumberInput::Text("1.5"), Some(&grouping));
        assert_eq!(options.use_grouping, grouping.use_grouping);
        assert_eq!(options.minimum_fraction_digits, Some(1));
    }

    #[test]
    fn test_retry_with_default_locale() {
        let facility = RecordingFacility::new(true, false);
        let locale = context(Some(NumberFormatPreference::DecimalComma));

        assert_eq!(format_number_with(&facility, 3.0, Some(&locale), None), "<3>");
        assert_eq!(
            *facility.calls.borrow(),
            vec![
                Some(vec!["de".to_string(), "es".to_string(), "it".to_string()]),
                Option::None,
            ]
        );
    }

    #[test]
    fn test_no_retry_on_success() {
        let facility = RecordingFacility::new(false, false);
        format_number_with(&facility, "7", Some(&context(Option::None)), None);
        assert_eq!(facility.calls.borrow().len(), 1);
    }

    #[test]
    fn test_failed_retry_falls_back_to_plain_text() {
        let facility = RecordingFacility::new(true, true);
        let locale = context(Option::None);
        assert_eq!(format_number_with(&facility, "12.5", Some(&locale), None), "12.5");
        assert_eq!(facility.calls.borrow().len(), 2);
    }

    #[test]
    fn test_bypass_never_calls_facility() {
        let facility = RecordingFacility::new(false, false);
        let locale = context(Some(NumberFormatPreference::None));
        assert_eq!(format_number_with(&facility, 1234.5, Some(&locale), None), "1234.5");
        assert_eq!(format_number_with(&facility, 0.0, Some(&locale), None), "");
        assert!(facility.calls.borrow().is_empty());
    }
}
