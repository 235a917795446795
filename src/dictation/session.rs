//! Dictation session state

/// State of one recording interval, created on start and discarded on stop.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    /// True from start until stop/error/end.
    pub(crate) recording: bool,
    /// Set when the user stopped the session explicitly, so a provider
    /// end signal arriving afterwards is not treated as news.
    pub(crate) manually_stopped: bool,
}

impl SessionState {
    pub(crate) fn started() -> Self {
        Self {
            recording: true,
            manually_stopped: false,
        }
    }
}
