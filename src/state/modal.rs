//! Modal overlays drawn above the inventory list.

/// Modal dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    /// No modal is active.
    #[default]
    None,
    /// Informational alert with a non-interactive message.
    Alert {
        /// Text to display.
        message: String,
    },
    /// Key binding overview.
    Help,
}

impl Modal {
    /// Whether a modal currently captures input.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}
