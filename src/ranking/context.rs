use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::error::{AggregationCause, RankingError, StoreError};

/// Caller-side switch that cancels every `RequestContext` cloned from its pair.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Per-call cancellation signal and optional deadline.
#[derive(Debug, Clone)]
pub struct RequestContext {
    cancel: watch::Receiver<bool>,
    deadline: Option<Duration>,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        let (_, rx) = watch::channel(false);
        Self {
            cancel: rx,
            deadline: None,
        }
    }

    pub fn cancellable() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            cancel: rx,
            deadline: None,
        };
        (ctx, CancelHandle { tx: Arc::new(tx) })
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Runs one store read, failing as a whole if the caller cancels or the
    /// deadline passes first. The read future is dropped on either.
    pub(crate) async fn run<T, F>(
        &self,
        stage: &'static str,
        fallback_deadline: Option<Duration>,
        read: F,
    ) -> Result<T, RankingError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        if self.is_cancelled() {
            return Err(RankingError::aggregation(stage, AggregationCause::Cancelled));
        }

        let mut cancel = self.cancel.clone();
        let cancelled = async move {
            // A dropped sender can never cancel.
            let closed = cancel.wait_for(|cancelled| *cancelled).await.is_err();
            if closed {
                std::future::pending::<()>().await;
            }
        };

        let deadline = self.deadline.or(fallback_deadline);
        let bounded = async move {
            match deadline {
                Some(limit) => match tokio::time::timeout(limit, read).await {
                    Ok(result) => result.map_err(AggregationCause::from),
                    Err(_) => Err(AggregationCause::TimedOut(limit)),
                },
                None => read.await.map_err(AggregationCause::from),
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(RankingError::aggregation(stage, AggregationCause::Cancelled)),
            result = bounded => result.map_err(|cause| RankingError::aggregation(stage, cause)),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}
