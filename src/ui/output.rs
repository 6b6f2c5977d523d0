//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show progress and status.
    #[default]
    Normal,
    /// Only warnings, errors and the summary.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows progress and success messages.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
