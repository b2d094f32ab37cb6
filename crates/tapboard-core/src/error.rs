use thiserror::Error;

/// Why a keystroke went nowhere. Nothing here is fatal: the manager logs the
/// reason at debug level and drops the event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyEventError {
    /// No keyboard is open, so there is no target to edit.
    #[error("no keyboard is open")]
    NotOpen,
    /// The target field was unmounted between open and keystroke.
    #[error("keystroke target is no longer mounted")]
    StaleTarget,
}
