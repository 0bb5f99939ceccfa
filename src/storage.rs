/// Host allow-list persistence
use crate::error::StoreError;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// Async key-value store mapping host → "logging enabled"
///
/// An absent key means disabled. Implementations only ever see hosts produced
/// by [`crate::host::get_host`].
#[allow(async_fn_in_trait)]
pub trait AllowListStore {
    async fn get(&self, host: &str) -> Result<Option<bool>, StoreError>;

    async fn set(&self, host: &str, enabled: bool) -> Result<(), StoreError>;

    async fn remove(&self, host: &str) -> Result<(), StoreError>;

    /// Absent and anything but `true` both read as disabled
    async fn is_enabled(&self, host: &str) -> Result<bool, StoreError> {
        Ok(self.get(host).await? == Some(true))
    }
}

/// Interpret a raw stored value; only JSON `true` enables a host
pub fn stored_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(*flag),
        _ => Some(false),
    }
}

/// Allow-list kept in process memory
#[derive(Debug, Default)]
pub struct MemoryAllowList {
    hosts: RefCell<HashMap<String, bool>>,
}

impl MemoryAllowList {
    pub fn new() -> Self {
        MemoryAllowList {
            hosts: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_hosts<'a>(hosts: impl IntoIterator<Item = &'a str>) -> Self {
        let store = MemoryAllowList::new();
        store
            .hosts
            .borrow_mut()
            .extend(hosts.into_iter().map(|host| (host.to_string(), true)));
        store
    }

    pub fn contains(&self, host: &str) -> bool {
        self.hosts.borrow().contains_key(host)
    }

    pub fn len(&self) -> usize {
        self.hosts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.borrow().is_empty()
    }
}

impl AllowListStore for MemoryAllowList {
    async fn get(&self, host: &str) -> Result<Option<bool>, StoreError> {
        Ok(self.hosts.borrow().get(host).copied())
    }

    async fn set(&self, host: &str, enabled: bool) -> Result<(), StoreError> {
        self.hosts.borrow_mut().insert(host.to_string(), enabled);
        Ok(())
    }

    async fn remove(&self, host: &str) -> Result<(), StoreError> {
        self.hosts.borrow_mut().remove(host);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_memory_store_new() {
        let store = MemoryAllowList::new();
        assert!(store.is_empty());
        assert_eq!(block_on(store.get("example.com")).unwrap(), None);
    }

    #[test]
    fn test_set_and_remove() {
        let store = MemoryAllowList::new();

        block_on(store.set("example.com", true)).unwrap();
        assert_eq!(block_on(store.get("example.com")).unwrap(), Some(true));
        assert!(block_on(store.is_enabled("example.com")).unwrap());

        block_on(store.remove("example.com")).unwrap();
        assert!(!store.contains("example.com"));
        assert!(!block_on(store.is_enabled("example.com")).unwrap());
    }

    #[test]
    fn test_remove_nonexistent_host() {
        let store = MemoryAllowList::with_hosts(["example.com"]);

        block_on(store.remove("other.org")).unwrap();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_false_entry_is_disabled() {
        let store = MemoryAllowList::new();
        block_on(store.set("example.com", false)).unwrap();

        assert!(store.contains("example.com"));
        assert!(!block_on(store.is_enabled("example.com")).unwrap());
    }

    #[test]
    fn test_stored_flag() {
        assert_eq!(stored_flag(&json!(true)), Some(true));
        assert_eq!(stored_flag(&json!(false)), Some(false));
        assert_eq!(stored_flag(&json!(null)), None);
        assert_eq!(stored_flag(&json!("true")), Some(false));
        assert_eq!(stored_flag(&json!(1)), Some(false));
    }
}
