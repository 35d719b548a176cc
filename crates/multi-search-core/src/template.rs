//! URL Template Engine
//!
//! Builds the request URL for an engine from its template and the submitted
//! query.

/// Placeholder replaced by the encoded query
pub const PLACEHOLDER: &str = "{q}";

/// Build a request URL from a template and a query
///
/// - empty template: empty URL
/// - empty query: every placeholder is removed
/// - template with placeholder: every placeholder becomes the encoded query
/// - template without placeholder: the encoded query is appended as `q`
///
/// # Example
/// ```ignore
/// let url = build_url("https://lite.duckduckgo.com/lite?q={q}", "cats");
/// // url == "https://lite.duckduckgo.com/lite?q=cats"
/// ```
pub fn build_url(template: &str, query: &str) -> String {
    if template.is_empty() {
        return String::new();
    }
    if query.is_empty() {
        return template.replace(PLACEHOLDER, "");
    }

    let encoded = urlencoding::encode(query);
    if template.contains(PLACEHOLDER) {
        return template.replace(PLACEHOLDER, &encoded);
    }

    let sep = if template.contains('?') { '&' } else { '?' };
    format!("{}{}q={}", template, sep, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ddg_lite_example() {
        let url = build_url("https://lite.duckduckgo.com/lite?q={q}", "cats");
        assert_eq!(url, "https://lite.duckduckgo.com/lite?q=cats");
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(build_url("", "cats"), "");
        assert_eq!(build_url("", ""), "");
    }

    #[test]
    fn test_query_is_encoded() {
        let url = build_url("https://example.com/search?q={q}", "rust & wasm/yew");
        assert_eq!(url, "https://example.com/search?q=rust%20%26%20wasm%2Fyew");
    }

    #[test]
    fn test_every_placeholder_replaced() {
        let url = build_url("https://example.com/{q}?q={q}", "a b");
        assert_eq!(url, "https://example.com/a%20b?q=a%20b");
    }

    #[test]
    fn test_empty_query_removes_placeholders() {
        assert_eq!(
            build_url("https://example.com/{q}?q={q}", ""),
            "https://example.com/?q="
        );
        assert_eq!(build_url("https://example.com/", ""), "https://example.com/");
    }

    #[test]
    fn test_appends_query_param() {
        assert_eq!(
            build_url("https://example.com/search", "cats"),
            "https://example.com/search?q=cats"
        );
        assert_eq!(
            build_url("https://example.com/search?lang=en", "cats"),
            "https://example.com/search?lang=en&q=cats"
        );
    }

    #[test]
    fn test_non_ascii_query() {
        assert_eq!(build_url("https://x.test/?q={q}", "café"), "https://x.test/?q=caf%C3%A9");
    }

    proptest! {
        #[test]
        fn prop_placeholder_replaced(
            prefix in "[a-z:/.?=&]{0,20}",
            suffix in "[a-z:/.?=&]{0,20}",
            query in "\\PC{1,20}",
        ) {
            let template = format!("{}{}{}", prefix, PLACEHOLDER, suffix);
            let url = build_url(&template, &query);
            let encoded = urlencoding::encode(&query).into_owned();
            prop_assert!(url.contains(&encoded));
            prop_assert!(!url.contains(PLACEHOLDER));
        }

        #[test]
        fn prop_query_param_appended(
            template in "[a-z:/.?=&]{1,30}",
            query in "\\PC{1,20}",
        ) {
            let url = build_url(&template, &query);
            let encoded = urlencoding::encode(&query).into_owned();
            let sep = if template.contains('?') { '&' } else { '?' };
            prop_assert_eq!(url, format!("{}{}q={}", template, sep, encoded));
        }

        #[test]
        fn prop_empty_query_strips_placeholders(template in "[a-z{}q?=/]{0,30}") {
            prop_assert_eq!(build_url(&template, ""), template.replace(PLACEHOLDER, ""));
        }

        #[test]
        fn prop_deterministic(template in "\\PC{0,30}", query in "\\PC{0,20}") {
            prop_assert_eq!(build_url(&template, &query), build_url(&template, &query));
        }
    }
}
