//! Single-writer request state cell with broadcast capabilities

use crate::{error::StateError, types::RequestState};
use std::sync::{Arc, Weak};
use tokio::sync::{broadcast, RwLock};

/// Capacity of the transition broadcast channel
const TRANSITION_CHANNEL_CAPACITY: usize = 16;

/// Single-writer cell holding the published request state
///
/// The container is the only writer; any number of handles read. Writes
/// replace the whole value and broadcast it to every active subscriber.
pub struct TpPricesStore {
    /// Current request state
    state: RwLock<RequestState>,

    /// Transition fan-out to subscribers
    tx: broadcast::Sender<RequestState>,
}

impl TpPricesStore {
    /// Creates a new store holding the idle state
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(TRANSITION_CHANNEL_CAPACITY);

        Self {
            state: RwLock::new(RequestState::idle()),
            tx,
        }
    }

    /// Gets a snapshot of the current request state
    pub async fn current(&self) -> RequestState {
        self.state.read().await.clone()
    }

    /// Replaces the state and broadcasts the new value
    ///
    /// Success and failure are never left: transitions attempted after a
    /// terminal state are ignored.
    pub async fn transition(&self, next: RequestState) {
        let mut state = self.state.write().await;
        if state.is_terminal() {
            tracing::warn!("Ignoring state transition after a terminal state");
            return;
        }
        *state = next.clone();
        drop(state);

        // send only errs when no subscriber is active
        let _ = self.tx.send(next);
    }

    /// Creates a read handle subscribed to state transitions
    ///
    /// Takes the shared store so the handle can hold a weak reference; the
    /// handle detaches when the last strong reference is dropped.
    pub fn subscribe(store: &Arc<Self>) -> TpPricesHandle {
        TpPricesHandle {
            store: Arc::downgrade(store),
            rx: store.tx.subscribe(),
        }
    }
}

impl Default for TpPricesStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only accessor for the published request state
///
/// Handles are only obtainable from a live container, so the dependency on
/// the state is explicit. Once the container is dropped, every read yields
/// [`StateError::Detached`].
pub struct TpPricesHandle {
    store: Weak<TpPricesStore>,
    rx: broadcast::Receiver<RequestState>,
}

impl TpPricesHandle {
    /// Gets a snapshot of the current request state
    ///
    /// Pure read; repeated calls between transitions return equal states.
    pub async fn current(&self) -> Result<RequestState, StateError> {
        let store = self.store.upgrade().ok_or(StateError::Detached)?;
        Ok(store.current().await)
    }

    /// Waits for the next state transition
    ///
    /// A lagged receiver falls back to the current snapshot.
    pub async fn changed(&mut self) -> Result<RequestState, StateError> {
        match self.rx.recv().await {
            Ok(state) => Ok(state),
            Err(broadcast::error::RecvError::Lagged(_)) => self.current().await,
            Err(broadcast::error::RecvError::Closed) => Err(StateError::Detached),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::types::Price;

    #[tokio::test]
    async fn transitions_reach_active_subscribers() {
        let store = Arc::new(TpPricesStore::new());
        let mut handle = TpPricesStore::subscribe(&store);

        store.transition(RequestState::loading()).await;

        let seen = handle.changed().await.expect("store is alive");
        assert!(seen.loading);
        assert!(!seen.loaded);
    }

    #[tokio::test]
    async fn current_reads_are_idempotent() {
        let store = Arc::new(TpPricesStore::new());
        let handle = TpPricesStore::subscribe(&store);
        store
            .transition(RequestState::success(vec![Price {
                id: 19721,
                buy: 3200,
                sell: 3450,
            }]))
            .await;

        let first = handle.current().await.expect("store is alive");
        let second = handle.current().await.expect("store is alive");

        assert_eq!(first.prices, second.prices);
        assert_eq!(first.loading, second.loading);
        assert_eq!(first.loaded, second.loaded);
        assert_eq!(first.fetched_at, second.fetched_at);
    }

    #[tokio::test]
    async fn terminal_states_are_sticky() {
        let store = Arc::new(TpPricesStore::new());
        store.transition(RequestState::success(Vec::new())).await;
        store
            .transition(RequestState::failure(ProviderError::ApiError(
                "boom".to_string(),
            )))
            .await;

        let state = store.current().await;
        assert!(state.loaded);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn reads_after_container_drop_are_detached() {
        let store = Arc::new(TpPricesStore::new());
        let mut handle = TpPricesStore::subscribe(&store);
        drop(store);

        assert!(matches!(handle.current().await, Err(StateError::Detached)));
        assert!(matches!(handle.changed().await, Err(StateError::Detached)));
    }
}
