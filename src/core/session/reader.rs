use tokio::sync::watch;

use crate::core::SessionState;

/// Read side of the session state. Cheap to clone; every clone observes
/// the transitions published by the single [`Authenticator`](crate::core::Authenticator).
#[derive(Debug, Clone)]
pub struct SessionReader {
    rx: watch::Receiver<SessionState>,
}

impl SessionReader {
    pub(crate) fn new(rx: watch::Receiver<SessionState>) -> Self {
        Self { rx }
    }

    pub fn current(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    /// Wait for the next transition. Returns false once the authenticator is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Wait until no operation is in flight and return that state.
    pub async fn settled(&mut self) -> SessionState {
        if let Ok(state) = self.rx.wait_for(|state| !state.is_loading()).await {
            return state.clone();
        }
        self.current()
    }
}
