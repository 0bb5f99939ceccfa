/// Data structures the browser hands to event handlers
use serde::{Deserialize, Serialize};

/// Host-assigned tab handle
pub type TabId = i32;

/// Snapshot of a browser tab as reported by tabs events
///
/// Every field is optional because different events fill in different parts
/// of the object. Handlers decide what a missing field means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<TabId>,
    #[serde(default)]
    pub url: Option<String>,
    /// Foreground tab of its window
    #[serde(default)]
    pub active: bool,
    #[serde(default, rename = "sessionID", alias = "sessionId")]
    pub session_id: Option<String>,
}

impl TabInfo {
    pub fn new(id: TabId, url: &str, active: bool) -> TabInfo {
        TabInfo {
            id: Some(id),
            url: Some(url.to_string()),
            active,
            session_id: None,
        }
    }
}

/// Payload of tabs.onActivated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveInfo {
    #[serde(default)]
    pub tab_id: Option<TabId>,
    #[serde(default)]
    pub window_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpHeader {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Payload of webRequest.onResponseStarted with responseHeaders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDetails {
    /// -1 when the request does not belong to a tab
    pub tab_id: TabId,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub response_headers: Vec<HttpHeader>,
}

impl ResponseDetails {
    /// Values of every header matching `name`, in the order they arrived
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.response_headers
            .iter()
            .filter(move |header| header.name.eq_ignore_ascii_case(name))
            .filter_map(|header| header.value.as_deref())
    }
}
