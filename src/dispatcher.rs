/// Boundary to the browser: tab messaging, toolbar indicator, user warnings
use crate::envelope::LogEntry;
use crate::error::DeliveryError;
use crate::indicator::Indicator;
use crate::tab_data::TabId;

#[allow(async_fn_in_trait)]
pub trait Dispatcher {
    /// Send one batch to the tab's content script. Best effort, never retried.
    async fn deliver(&self, tab_id: TabId, entries: &[LogEntry]) -> Result<(), DeliveryError>;

    /// Show `indicator` on the tab's toolbar button
    async fn set_indicator(&self, tab_id: TabId, indicator: &Indicator) -> Result<(), DeliveryError>;

    /// Blocking notification to the user
    fn warn_user(&self, message: &str);
}
