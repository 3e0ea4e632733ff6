//! Callback-to-future bridging for HealthKit completions.

use bridge_traits::healthkit::{HealthKitError, HealthKitStore, QueryHandle};
use futures::channel::oneshot;
use std::sync::Arc;
use tracing::debug;

use crate::error::{HealthKitProviderError, Result};

/// Boxed completion handler as accepted by every [`HealthKitStore`] call.
pub(crate) type Completion<T> =
    Box<dyn FnOnce(std::result::Result<T, HealthKitError>) + Send + 'static>;

/// Receiving half of a completion handler.
pub(crate) struct PendingCompletion<T> {
    receiver: oneshot::Receiver<std::result::Result<T, HealthKitError>>,
}

/// Create a completion handler and the future-side handle that resolves once
/// the handler is called.
pub(crate) fn completion_channel<T: Send + 'static>() -> (Completion<T>, PendingCompletion<T>) {
    let (sender, receiver) = oneshot::channel();
    let completion: Completion<T> = Box::new(move |result| {
        // The receiver is gone when the caller was cancelled.
        let _ = sender.send(result);
    });

    (completion, PendingCompletion { receiver })
}

impl<T> PendingCompletion<T> {
    pub(crate) async fn wait(self) -> Result<T> {
        match self.receiver.await {
            Ok(result) => result.map_err(HealthKitProviderError::from),
            Err(oneshot::Canceled) => Err(HealthKitProviderError::CompletionDropped),
        }
    }
}

/// Stops a running query if dropped before [`QueryGuard::disarm`].
pub(crate) struct QueryGuard {
    store: Arc<dyn HealthKitStore>,
    handle: Option<QueryHandle>,
}

impl QueryGuard {
    pub(crate) fn new(store: Arc<dyn HealthKitStore>, handle: QueryHandle) -> Self {
        Self {
            store,
            handle: Some(handle),
        }
    }

    pub(crate) fn disarm(mut self) {
        self.handle = None;
    }
}

impl Drop for QueryGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!(%handle, "Stopping cancelled HealthKit query");
            self.store.stop_query(handle);
        }
    }
}
