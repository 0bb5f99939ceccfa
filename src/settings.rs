/// Extension settings, overridable from the JS glue at startup
use serde::{Deserialize, Serialize};

pub const HEADER_NAME: &str = "X-ChromeLogger-Data";
pub const INACTIVE_SUFFIX: &str = " (inactive)";
pub const ENABLED_ICON: &str = "icons/icon38.png";
pub const DISABLED_ICON: &str = "icons/icon38_disabled.png";
pub const PROTECTED_PAGE_WARNING: &str = "You cannot use browser Logger on this page.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub header_name: String,
    /// URL prefixes where logging is never enabled
    pub protected_pages: Vec<String>,
    pub inactive_suffix: String,
    pub enabled_icon: String,
    pub disabled_icon: String,
    pub protected_page_warning: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            header_name: HEADER_NAME.to_string(),
            protected_pages: vec!["about:debugging".to_string()],
            inactive_suffix: INACTIVE_SUFFIX.to_string(),
            enabled_icon: ENABLED_ICON.to_string(),
            disabled_icon: DISABLED_ICON.to_string(),
            protected_page_warning: PROTECTED_PAGE_WARNING.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.header_name, "X-ChromeLogger-Data");
        assert_eq!(settings.protected_pages, vec!["about:debugging".to_string()]);
        assert_eq!(settings.inactive_suffix, " (inactive)");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let settings: Settings = serde_json::from_str(
            r#"{"protectedPages": ["about:debugging", "about:config"]}"#,
        )
        .unwrap();

        assert_eq!(settings.protected_pages.len(), 2);
        assert_eq!(settings.header_name, HEADER_NAME);
        assert_eq!(settings.enabled_icon, ENABLED_ICON);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["inactiveSuffix"], " (inactive)");
        assert_eq!(json["disabledIcon"], "icons/icon38_disabled.png");
    }
}
