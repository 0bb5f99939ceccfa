/// Toolbar icon and title for a tab's activation state
use crate::registry::TabState;
use crate::settings::Settings;

/// Absolute indicator appearance for one tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub icon: String,
    pub state: TabState,
    pub inactive_suffix: String,
}

impl Indicator {
    pub fn for_state(state: TabState, settings: &Settings) -> Indicator {
        let icon = match state {
            TabState::Active => settings.enabled_icon.clone(),
            TabState::Inactive => settings.disabled_icon.clone(),
        };
        Indicator {
            icon,
            state,
            inactive_suffix: settings.inactive_suffix.clone(),
        }
    }

    /// Title to show given whatever the toolbar currently displays
    pub fn title(&self, current_title: &str) -> String {
        title_for(current_title, self.state, &self.inactive_suffix)
    }
}

/// Compute the toolbar title for `state`
///
/// Every copy of the suffix is stripped first, so the result depends only on
/// the base title and the state. Applying it twice, or applying two stale
/// reads in either order, ends on the same text as a single call.
pub fn title_for(current_title: &str, state: TabState, inactive_suffix: &str) -> String {
    let base = if inactive_suffix.is_empty() {
        current_title.to_string()
    } else {
        current_title.replace(inactive_suffix, "")
    };

    match state {
        TabState::Active => base,
        TabState::Inactive => format!("{}{}", base, inactive_suffix),
    }
}
