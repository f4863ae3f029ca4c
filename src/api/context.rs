use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::api::error::TransportCause;

/// Cancellation and deadline for a single API call
///
/// Cloning a context shares its cancellation token.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// Context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Context::default()
    }

    /// Context cancelled through `token`
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Context {
            cancel: token,
            deadline: None,
        }
    }

    /// Same context, expiring at `deadline` (an earlier existing deadline wins)
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(d) if d < deadline => d,
            _ => deadline,
        });
        self
    }

    /// Same context, expiring `timeout` from now
    pub fn timeout(self, timeout: Duration) -> Self {
        self.deadline(Instant::now() + timeout)
    }

    /// Cancel every call using this context (or a clone of it)
    pub fn cancel(&self) {
        self.cancel.cancel()
    }

    /// Token backing this context
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Deadline, if any
    pub fn get_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Why the context is done, or `None` while it is still live
    pub fn err(&self) -> Option<TransportCause> {
        if self.cancel.is_cancelled() {
            return Some(TransportCause::Cancelled);
        }
        match self.deadline {
            Some(d) if d <= Instant::now() => Some(TransportCause::DeadlineExceeded),
            _ => None,
        }
    }

    /// Drives `fut` until it finishes or the context is done
    pub(crate) async fn run<F, T>(&self, fut: F) -> Result<T, TransportCause>
    where
        F: std::future::Future<Output = T>,
    {
        if let Some(cause) = self.err() {
            return Err(cause);
        }
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.cancel.cancelled() => Err(TransportCause::Cancelled),
                    _ = tokio::time::sleep_until(deadline) => Err(TransportCause::DeadlineExceeded),
                    out = fut => Ok(out),
                }
            }
            None => {
                tokio::select! {
                    _ = self.cancel.cancelled() => Err(TransportCause::Cancelled),
                    out = fut => Ok(out),
                }
            }
        }
    }
}
