/// Tab lifecycle classification, toggling, and log relaying
use crate::dispatcher::Dispatcher;
use crate::envelope::{LogEntry, decode};
use crate::error::{Error, Result};
use crate::host::{get_host, is_protected_page};
use crate::indicator::Indicator;
use crate::registry::{ActivationRegistry, TabState};
use crate::settings::Settings;
use crate::storage::AllowListStore;
use crate::tab_data::{ResponseDetails, TabId, TabInfo};
use log::{debug, error, warn};
use std::cell::RefCell;

/// Why an event left a tab untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Not the foreground tab of its window
    Background,
    /// No tab id (session-only events)
    MissingId,
    MissingUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Skipped(SkipReason),
    Applied(TabState),
}

/// Owns the activation registry and drives it from browser events
///
/// Handlers may interleave at every `.await` on the store or dispatcher.
/// No registry borrow is held across one, and a lookup that resolves after
/// the tab navigated still applies to the id it was started for.
pub struct Controller<S, D> {
    store: S,
    dispatcher: D,
    registry: RefCell<ActivationRegistry>,
    settings: Settings,
}

impl<S: AllowListStore, D: Dispatcher> Controller<S, D> {
    pub fn new(store: S, dispatcher: D, settings: Settings) -> Self {
        Controller {
            store,
            dispatcher,
            registry: RefCell::new(ActivationRegistry::new()),
            settings,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_active(&self, tab_id: TabId) -> bool {
        self.registry.borrow().is_active(tab_id)
    }

    pub fn tab_state(&self, tab_id: TabId) -> TabState {
        self.registry.borrow().state(tab_id)
    }

    pub fn is_protected(&self, url: &str) -> bool {
        is_protected_page(url, &self.settings.protected_pages)
    }

    /// Bring a tab's activation in line with the allow-list
    ///
    /// On a store error nothing is changed and the error is returned.
    pub async fn classify(&self, tab: &TabInfo) -> Result<Classification> {
        if !tab.active {
            return Ok(Classification::Skipped(SkipReason::Background));
        }

        let Some(tab_id) = tab.id else {
            return Ok(Classification::Skipped(SkipReason::MissingId));
        };

        let state = match tab.url.as_deref() {
            None => TabState::Inactive,
            Some(url) if self.is_protected(url) => TabState::Inactive,
            Some(url) => TabState::from(self.store.is_enabled(&get_host(url)).await?),
        };

        self.apply(tab_id, state).await;
        Ok(Classification::Applied(state))
    }

    /// Flip the allow-list entry for the tab's host and apply the result
    ///
    /// Two tabs toggling the same host at once race; the last write wins.
    pub async fn toggle(&self, tab: &TabInfo) -> Result<Classification> {
        let Some(tab_id) = tab.id else {
            return Ok(Classification::Skipped(SkipReason::MissingId));
        };
        let Some(url) = tab.url.as_deref() else {
            return Ok(Classification::Skipped(SkipReason::MissingUrl));
        };

        if self.is_protected(url) {
            return Err(Error::ProtectedPage {
                url: url.to_string(),
            });
        }

        let host = get_host(url);
        let state = if self.store.get(&host).await? == Some(true) {
            self.store.remove(&host).await?;
            TabState::Inactive
        } else {
            self.store.set(&host, true).await?;
            TabState::Active
        };

        debug!("Toggled logging for {} to {:?}", host, state);
        self.apply(tab_id, state).await;
        Ok(Classification::Applied(state))
    }

    async fn apply(&self, tab_id: TabId, state: TabState) {
        if self.registry.borrow_mut().apply(tab_id, state) {
            debug!("Tab {} is now {:?}", tab_id, state);
        }

        let indicator = Indicator::for_state(state, &self.settings);
        if let Err(e) = self.dispatcher.set_indicator(tab_id, &indicator).await {
            error!("Failed to update indicator: {}", e);
        }
    }

    /// tabs.onCreated / tabs.onUpdated / resolved tabs.onActivated
    pub async fn on_tab_event(&self, tab: &TabInfo) {
        match self.classify(tab).await {
            Ok(Classification::Skipped(reason)) => {
                debug!("Ignoring tab event: {:?}", reason);
            }
            Ok(Classification::Applied(_)) => {}
            Err(e) => error!("Error retrieving stored settings: {}", e),
        }
    }

    /// browserAction.onClicked
    pub async fn on_icon_clicked(&self, tab: &TabInfo) {
        match self.toggle(tab).await {
            Ok(Classification::Skipped(reason)) => {
                warn!("Icon click without a usable tab: {:?}", reason);
            }
            Ok(Classification::Applied(_)) => {}
            Err(Error::ProtectedPage { url }) => {
                debug!("Refusing to toggle protected page {}", url);
                self.dispatcher.warn_user(&self.settings.protected_page_warning);
            }
            Err(e) => error!("Error retrieving stored settings: {}", e),
        }
    }

    /// tabs.onRemoved
    pub fn on_tab_removed(&self, tab_id: TabId) {
        if self.registry.borrow_mut().deactivate(tab_id) {
            debug!("Evicted closed tab {}", tab_id);
        }
    }

    /// webRequest.onResponseStarted; returns the number of entries delivered
    pub async fn on_response_started(&self, details: &ResponseDetails) -> usize {
        // Responses for tabs that are not enabled are never decoded
        if !self.is_active(details.tab_id) {
            return 0;
        }

        let mut delivered = 0;
        for entries in decode_response(details, &self.settings.header_name) {
            match self.dispatcher.deliver(details.tab_id, &entries).await {
                Ok(()) => delivered += entries.len(),
                Err(e) => error!("Error: {}", e),
            }
        }
        delivered
    }
}

/// Decode every logger header of a response into non-empty batches
///
/// Each header stands alone: a malformed one is logged and dropped without
/// affecting the others.
pub fn decode_response(details: &ResponseDetails, header_name: &str) -> Vec<Vec<LogEntry>> {
    details
        .header_values(header_name)
        .filter_map(|value| match decode(value) {
            Ok(entries) if entries.is_empty() => None,
            Ok(entries) => Some(entries),
            Err(e) => {
                warn!("Dropping {} header: {}", header_name, e);
                None
            }
        })
        .collect()
}
