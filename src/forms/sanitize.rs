//! Field sanitization: trimming, HTML escaping, date coercion
//!
//! Sanitization runs on every submission regardless of validation
//! outcome; the cleaned values are what gets redisplayed on failure and
//! persisted on success.

use chrono::NaiveDate;

/// Trim and HTML-escape a text field
pub fn clean_text(value: &str) -> String {
    escape(value.trim())
}

/// Escape markup-significant characters into HTML entities
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse [`escape`] for display of stored values
pub fn unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#x2F;", "/")
        .replace("&amp;", "&")
}

/// Coerce a raw field into a date. Empty and malformed input both yield
/// `None` rather than an error; malformed dates destined to fail
/// validation must not abort sanitization.
pub fn to_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_trims_and_escapes() {
        assert_eq!(clean_text("  Jane  "), "Jane");
        assert_eq!(
            clean_text("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt;"
        );
    }

    #[test]
    fn test_escape_ampersand_first() {
        // a literal "&lt;" in the input must not collapse on escape
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_unescape_round_trip() {
        let inputs = ["O'Brien & Sons", "a < b > c", "path/to/thing", "plain"];
        for input in inputs {
            assert_eq!(unescape(&escape(input)), input);
        }
    }

    #[test]
    fn test_to_date() {
        assert_eq!(to_date("1775-12-16"), NaiveDate::from_ymd_opt(1775, 12, 16));
        assert_eq!(to_date(" 1775-12-16 "), NaiveDate::from_ymd_opt(1775, 12, 16));
        assert_eq!(to_date(""), None);
        assert_eq!(to_date("   "), None);
        assert_eq!(to_date("not-a-date"), None);
        assert_eq!(to_date("1775-13-40"), None);
    }
}
