//! Layout shell selection and the desktop sidebar preference.
//!
//! DESIGN
//! ======
//! Which shell to mount is derived state: it is recomputed from the device
//! class on every change and never persisted. The only persisted layout data
//! is the desktop sidebar preference, read once when the desktop shell
//! activates and written on each user toggle.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::util::dark_mode;
use crate::util::ui_persistence::{PreferenceStore, load_json, save_json};

/// Storage key for the sidebar collapse flag.
pub const SIDEBAR_COLLAPSED_KEY: &str = "finboard.sidebar.collapsed";
/// Storage key for the sidebar accent color.
pub const SIDEBAR_COLOR_KEY: &str = "finboard.sidebar.color";
/// Every key the layout reset route clears.
pub const LAYOUT_STORAGE_KEYS: [&str; 3] = [SIDEBAR_COLLAPSED_KEY, SIDEBAR_COLOR_KEY, dark_mode::STORAGE_KEY];

pub const DEFAULT_ACCENT_COLOR: &str = "#2563eb";
/// Accent colors offered by the sidebar picker.
pub const ACCENT_PALETTE: [&str; 5] = [DEFAULT_ACCENT_COLOR, "#059669", "#7c3aed", "#db2777", "#ea580c"];

pub const SIDEBAR_EXPANDED_WIDTH_PX: u32 = 256;
pub const SIDEBAR_COLLAPSED_WIDTH_PX: u32 = 72;

// =============================================================================
// SHELL SELECTION
// =============================================================================

/// Top-level UI chrome variant hosting page content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellKind {
    Mobile,
    Desktop,
}

impl ShellKind {
    #[must_use]
    pub fn for_device(is_mobile: bool) -> Self {
        if is_mobile { Self::Mobile } else { Self::Desktop }
    }
}

/// Layout selector lifecycle.
///
/// `Unmounted` renders nothing. `mount` moves to `Mounted` exactly once and is
/// never undone; after that every device observation re-picks the shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectorState {
    #[default]
    Unmounted,
    /// `shell` is `None` until the device class has been read.
    Mounted { shell: Option<ShellKind> },
}

impl SelectorState {
    /// Record that the first client-side render pass has completed.
    #[must_use]
    pub fn mount(self) -> Self {
        match self {
            Self::Unmounted => Self::Mounted { shell: None },
            mounted @ Self::Mounted { .. } => mounted,
        }
    }

    /// Feed the latest device class. Ignored until mounted.
    #[must_use]
    pub fn observe(self, is_mobile: bool) -> Self {
        match self {
            Self::Unmounted => Self::Unmounted,
            Self::Mounted { .. } => Self::Mounted { shell: Some(ShellKind::for_device(is_mobile)) },
        }
    }

    #[cfg(test)]
    pub(crate) fn is_mounted(self) -> bool {
        matches!(self, Self::Mounted { .. })
    }

    /// The shell to render, if any.
    #[must_use]
    pub fn shell(self) -> Option<ShellKind> {
        match self {
            Self::Unmounted => None,
            Self::Mounted { shell } => shell,
        }
    }
}

// =============================================================================
// DESKTOP PREFERENCE
// =============================================================================

/// Persisted desktop sidebar preference. Missing keys mean expanded with the
/// default accent color.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutPreference {
    pub collapsed: bool,
    pub color: Option<String>,
}

impl LayoutPreference {
    /// Read the preference, substituting defaults for absent or unreadable
    /// values.
    pub fn load(store: &impl PreferenceStore) -> Self {
        Self {
            collapsed: load_json::<bool>(store, SIDEBAR_COLLAPSED_KEY).unwrap_or(false),
            color: load_json::<String>(store, SIDEBAR_COLOR_KEY).filter(|c| !c.trim().is_empty()),
        }
    }

    /// Flip the collapse flag and persist it.
    pub fn toggle_collapsed(&mut self, store: &impl PreferenceStore) {
        self.collapsed = !self.collapsed;
        save_json(store, SIDEBAR_COLLAPSED_KEY, &self.collapsed);
    }

    /// Set (or clear, with `None`) the accent color and persist it.
    pub fn set_color(&mut self, color: Option<String>, store: &impl PreferenceStore) {
        match &color {
            Some(c) => save_json(store, SIDEBAR_COLOR_KEY, c),
            None => store.remove(SIDEBAR_COLOR_KEY),
        }
        self.color = color;
    }

    #[must_use]
    pub fn accent(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_ACCENT_COLOR)
    }

    #[must_use]
    pub fn sidebar_width_px(&self) -> u32 {
        if self.collapsed { SIDEBAR_COLLAPSED_WIDTH_PX } else { SIDEBAR_EXPANDED_WIDTH_PX }
    }

    /// Left inset applied to page content so it clears the sidebar.
    #[must_use]
    pub fn content_inset_px(&self) -> u32 {
        self.sidebar_width_px()
    }
}

/// Remove every persisted layout key so the shells fall back to defaults.
pub fn clear_layout_storage(store: &impl PreferenceStore) {
    for key in LAYOUT_STORAGE_KEYS {
        store.remove(key);
    }
}

// =============================================================================
// MOBILE OVERLAY
// =============================================================================

/// The one transient overlay the mobile shell may show. Never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MobileOverlay {
    #[default]
    Closed,
    QuickAdd,
    /// Account sheet asking the user to confirm sign-out.
    Account,
}

impl MobileOverlay {
    /// The "+" button: opens quick add, or closes whatever is open.
    #[must_use]
    pub fn toggle_quick_add(self) -> Self {
        match self {
            Self::Closed => Self::QuickAdd,
            Self::QuickAdd | Self::Account => Self::Closed,
        }
    }

    #[must_use]
    pub fn toggle_account(self) -> Self {
        match self {
            Self::Account => Self::Closed,
            Self::Closed | Self::QuickAdd => Self::Account,
        }
    }

    /// Sign-out is only confirmed from the open account sheet.
    #[must_use]
    pub fn confirms_sign_out(self) -> bool {
        self == Self::Account
    }
}
