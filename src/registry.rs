/// In-memory set of tabs currently forwarding logs
use crate::tab_data::TabId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-tab activation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabState {
    Active,
    Inactive,
}

impl TabState {
    pub fn is_active(self) -> bool {
        self == TabState::Active
    }
}

impl From<bool> for TabState {
    fn from(enabled: bool) -> Self {
        if enabled {
            TabState::Active
        } else {
            TabState::Inactive
        }
    }
}

/// Tabs not in the set are `Inactive`. Nothing here is persisted; membership
/// is rebuilt from the allow-list as tab events come in.
#[derive(Debug, Clone, Default)]
pub struct ActivationRegistry {
    enabled: HashSet<TabId>,
}

impl ActivationRegistry {
    pub fn new() -> Self {
        ActivationRegistry {
            enabled: HashSet::new(),
        }
    }

    /// Returns true if the tab was not active before
    pub fn activate(&mut self, tab_id: TabId) -> bool {
        self.enabled.insert(tab_id)
    }

    /// Returns true if the tab was active before
    pub fn deactivate(&mut self, tab_id: TabId) -> bool {
        self.enabled.remove(&tab_id)
    }

    pub fn apply(&mut self, tab_id: TabId, state: TabState) -> bool {
        match state {
            TabState::Active => self.activate(tab_id),
            TabState::Inactive => self.deactivate(tab_id),
        }
    }

    pub fn is_active(&self, tab_id: TabId) -> bool {
        self.enabled.contains(&tab_id)
    }

    pub fn state(&self, tab_id: TabId) -> TabState {
        TabState::from(self.is_active(tab_id))
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_starts_empty() {
        let registry = ActivationRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.state(1), TabState::Inactive);
    }

    #[test]
    fn test_activate_and_deactivate() {
        let mut registry = ActivationRegistry::new();

        assert!(registry.activate(1));
        assert!(registry.is_active(1));
        assert_eq!(registry.state(1), TabState::Active);

        assert!(registry.deactivate(1));
        assert!(!registry.is_active(1));
    }

    #[test]
    fn test_activate_is_idempotent() {
        let mut registry = ActivationRegistry::new();

        assert!(registry.activate(3));
        assert!(!registry.activate(3));
        assert_eq!(registry.len(), 1);

        assert!(registry.deactivate(3));
        assert!(!registry.deactivate(3));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_tabs_are_independent() {
        let mut registry = ActivationRegistry::new();
        registry.apply(1, TabState::Active);
        registry.apply(2, TabState::Active);
        registry.apply(1, TabState::Inactive);

        assert!(!registry.is_active(1));
        assert!(registry.is_active(2));
    }

    #[test]
    fn test_tab_state_from_bool() {
        assert_eq!(TabState::from(true), TabState::Active);
        assert_eq!(TabState::from(false), TabState::Inactive);
        assert!(TabState::Active.is_active());
    }
}
