//! Per-call context shared by every handler of one toolkit invocation.

use tokio_util::sync::CancellationToken;

/// Context passed from [`Toolkit::handle`](crate::Toolkit::handle) through
/// category dispatch down to each tool handler.
///
/// One context belongs to one call. Every handler of that call observes the
/// same cancellation token, so cancelling it stops the handler that is
/// currently running and every handler that has not started yet.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
}

impl CallContext {
    /// A context that is never cancelled unless [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context driven by a caller-owned token.
    pub fn with_token(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// A context cancelled together with `parent`, but cancellable on its own.
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            cancel: parent.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once the call is cancelled.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }
}
