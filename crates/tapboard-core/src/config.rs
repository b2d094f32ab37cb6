use web_time::Duration;

/// Delays for the manager's two deferred effects. Both are tunable; the
/// defaults are "long enough for a key tap to land" and "after the open
/// animation settles".
#[derive(Clone, Copy, Debug)]
pub struct KeyboardTiming {
    /// Grace period between a blur and the close re-check, so the transient
    /// blur from tapping a rendered key never tears the keyboard down.
    pub close_grace: Duration,
    /// Delay before asking the host to scroll the focused field into the
    /// vertical center of what the keyboard leaves visible.
    pub scroll_delay: Duration,
}

impl Default for KeyboardTiming {
    fn default() -> Self {
        Self {
            close_grace: Duration::from_millis(100),
            scroll_delay: Duration::from_millis(300),
        }
    }
}
