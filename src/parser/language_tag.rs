use icu::locale::Locale;

use crate::intl::IntlError;

/// Parse and canonicalize a BCP 47 language tag
///
/// Only the structure is checked: a tag like "zz-ZZ" is valid even though
/// CLDR has no data for it. Underscores, four-letter languages such as "TEST"
/// and empty text are rejected.
///
/// # Examples
/// ```
/// use locale_number_format::parse_language_tag;
///
/// let tag = parse_language_tag("EN-us").unwrap();
/// assert_eq!(tag.to_string(), "en-US");
/// assert!(parse_language_tag("TEST").is_err());
/// ```
pub fn parse_language_tag(text: &str) -> Result<Locale, IntlError> {
    // ICU also accepts '_' as a subtag separator; BCP 47 does not
    if text.contains('_') {
        return Err(IntlError::InvalidLanguageTag(text.to_string()));
    }

    text.parse::<Locale>()
        .map_err(|_| IntlError::InvalidLanguageTag(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_case() {
        let tag = parse_language_tag("zh-hant-tw").unwrap();
        assert_eq!(tag.id.language.as_str(), "zh");
        assert_eq!(tag.id.script.map(|s| s.to_string()).as_deref(), Some("Hant"));
        assert_eq!(tag.id.region.map(|r| r.to_string()).as_deref(), Some("TW"));
        assert_eq!(tag.to_string(), "zh-Hant-TW");
    }

    #[test]
    fn test_numeric_region_and_extensions() {
        let tag = parse_language_tag("es-419-u-nu-latn").unwrap();
        assert_eq!(tag.id.region.map(|r| r.to_string()).as_deref(), Some("419"));
        assert_eq!(tag.id.to_string(), "es-419");
        assert_eq!(tag.to_string(), "es-419-u-nu-latn");
    }

    #[test]
    fn test_rejected_tags() {
        for text in [
            "", "TEST", "en_US", "de_DE", "e", "en-", "-en", "en--US", "toolonglanguage",
            "en-u", "x-private", "en-x",
        ] {
            assert!(parse_language_tag(text).is_err(), "{text:?} should be rejected");
        }
    }

    #[test]
    fn test_error_carries_input() {
        let err = parse_language_tag("TEST").unwrap_err();
        assert_eq!(err, IntlError::InvalidLanguageTag("TEST".to_string()));
    }
}
