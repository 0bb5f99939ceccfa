/// Host extraction and protected-page checks
use regex::Regex;
use std::sync::LazyLock;

static SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://").expect("scheme pattern is valid")
});

/// Extract the allow-list key from a page URL
///
/// Algorithm:
/// 1. Strip a leading "http://" or "https://"
/// 2. Take everything before the first '/'
///
/// No lowercasing and no port stripping: the allow-list is written and read
/// through this same function, so keys always line up.
///
/// Examples:
/// - https://example.com/a/b → example.com
/// - example.com/a → example.com
/// - http://localhost:8080/ → localhost:8080
pub fn get_host(url: &str) -> String {
    let without_scheme = SCHEME.replace(url, "");
    without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Check whether a URL is one of the pages logging must never touch
pub fn is_protected_page(url: &str, protected_pages: &[String]) -> bool {
    protected_pages
        .iter()
        .any(|prefix| url.starts_with(prefix.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protected() -> Vec<String> {
        vec!["about:debugging".to_string()]
    }

    #[test]
    fn test_get_host_with_scheme() {
        assert_eq!(get_host("https://example.com/a/b"), "example.com");
        assert_eq!(get_host("http://example.com/page"), "example.com");
        assert_eq!(get_host("https://example.com"), "example.com");
    }

    #[test]
    fn test_get_host_without_scheme() {
        assert_eq!(get_host("example.com/a"), "example.com");
        assert_eq!(get_host("example.com"), "example.com");
    }

    #[test]
    fn test_get_host_keeps_port_and_subdomain() {
        assert_eq!(get_host("http://localhost:8080/index.php"), "localhost:8080");
        assert_eq!(get_host("https://api.example.com/v1"), "api.example.com");
    }

    #[test]
    fn test_get_host_only_strips_leading_scheme() {
        assert_eq!(
            get_host("https://example.com/redirect?to=http://other.org"),
            "example.com"
        );
        // Other schemes are left alone, same as the allow-list writer sees them
        assert_eq!(get_host("ftp://files.example.com/x"), "ftp:");
    }

    #[test]
    fn test_get_host_edge_cases() {
        assert_eq!(get_host(""), "");
        assert_eq!(get_host("https://"), "");
        assert_eq!(get_host("about:debugging"), "about:debugging");
    }

    #[test]
    fn test_is_protected_page_prefix_match() {
        assert!(is_protected_page("about:debugging", &protected()));
        assert!(is_protected_page("about:debugging#/runtime/this-firefox", &protected()));
    }

    #[test]
    fn test_is_protected_page_rejects_other_urls() {
        assert!(!is_protected_page("https://example.com", &protected()));
        assert!(!is_protected_page("about:blank", &protected()));
        // Prefix match only, not substring
        assert!(!is_protected_page("https://example.com/about:debugging", &protected()));
    }

    #[test]
    fn test_is_protected_page_empty_denylist() {
        assert!(!is_protected_page("about:debugging", &[]));
    }
}
