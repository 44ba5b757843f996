//! Collaborator interfaces the surrounding shell injects into a session.
//!
//! The session never renders anything itself: it raises a busy signal while
//! a gateway call is in flight and hands toast-worthy strings to a
//! [`Notifier`]. Both collaborators are explicit constructor arguments with
//! session lifetime — there are no process-wide singletons to reach for.

use std::sync::Arc;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
    Error,
    Warning,
}

/// Global busy indicator with an optional status message.
pub trait ProgressSink: Send + Sync {
    /// Raises the busy signal, optionally with a status message.
    fn begin(&self, message: Option<&str>);

    /// Lowers the busy signal.
    fn end(&self);
}

/// Receives toast-worthy success/error strings from the session.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice, message: &str);
}

/// A `ProgressSink` that ignores everything. Default for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn begin(&self, _message: Option<&str>) {}
    fn end(&self) {}
}

/// A `Notifier` that ignores everything. Default for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notice: Notice, _message: &str) {}
}

/// The bundle of shell collaborators a session is constructed with.
#[derive(Clone)]
pub struct ShellContext {
    progress: Arc<dyn ProgressSink>,
    notifier: Arc<dyn Notifier>,
}

impl ShellContext {
    pub fn new(progress: Arc<dyn ProgressSink>, notifier: Arc<dyn Notifier>) -> Self {
        Self { progress, notifier }
    }

    pub(crate) fn begin(&self, message: Option<&str>) {
        self.progress.begin(message);
    }

    pub(crate) fn end(&self) {
        self.progress.end();
    }

    pub(crate) fn notify(&self, notice: Notice, message: &str) {
        self.notifier.notify(notice, message);
    }
}

impl Default for ShellContext {
    fn default() -> Self {
        Self::new(Arc::new(NullProgress), Arc::new(NullNotifier))
    }
}

impl std::fmt::Debug for ShellContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellContext").finish_non_exhaustive()
    }
}
