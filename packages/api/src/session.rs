//! Auth-event subscription.
//!
//! The facade publishes a [`AuthChange`] after every successful auth
//! operation; the UI holds one long-lived [`AuthEvents`] and derives panel
//! visibility from the latest transition.

use std::sync::{Arc, Mutex};

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;

use crate::models::User;

/// A session-state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthChange {
    SignedIn(User),
    SignedOut,
}

/// Receiving half of a subscription.
///
/// Yields transitions for as long as the value is held; dropping it cancels
/// the subscription.
pub struct AuthEvents {
    receiver: UnboundedReceiver<AuthChange>,
}

impl AuthEvents {
    /// The next transition. Pends until one arrives.
    pub async fn next(&mut self) -> Option<AuthChange> {
        self.receiver.next().await
    }
}

/// Publishing half: fans each change out to every live subscriber.
#[derive(Clone, Default)]
pub(crate) struct AuthEventBus {
    subscribers: Arc<Mutex<Vec<UnboundedSender<AuthChange>>>>,
}

impl AuthEventBus {
    pub(crate) fn subscribe(&self) -> AuthEvents {
        let (sender, receiver) = mpsc::unbounded();
        self.subscribers.lock().unwrap().push(sender);
        AuthEvents { receiver }
    }

    pub(crate) fn publish(&self, change: AuthChange) {
        // Sends to dropped receivers fail; those subscribers are gone.
        self.subscribers
            .lock()
            .unwrap()
            .retain(|subscriber| subscriber.unbounded_send(change.clone()).is_ok());
    }
}
