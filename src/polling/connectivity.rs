//! Network connectivity as an injected capability.

use std::sync::Arc;
use tokio::sync::watch;

/// Reports whether the network is reachable and notifies on changes.
///
/// The controller reads [`ConnectivityProbe::is_online`] once at start and then follows the
/// [`watch::Receiver`] returned by [`ConnectivityProbe::subscribe`]. Dropping that receiver
/// is how the controller unregisters.
pub trait ConnectivityProbe: Send + Sync {
    fn is_online(&self) -> bool;

    fn subscribe(&self) -> watch::Receiver<bool>;
}

/// A probe whose state is set by the application, e.g. from OS network events.
///
/// Clones share the same state.
///
/// # Examples
///
/// ```
/// use envsense::{ConnectivityProbe, ManualConnectivity};
///
/// let connectivity = ManualConnectivity::new(true);
/// let mut events = connectivity.subscribe();
///
/// connectivity.set_online(false);
/// assert!(!connectivity.is_online());
/// assert!(events.has_changed().unwrap());
/// assert!(!*events.borrow_and_update());
/// ```
#[derive(Debug, Clone)]
pub struct ManualConnectivity {
    sender: Arc<watch::Sender<bool>>,
}

impl ManualConnectivity {
    pub fn new(online: bool) -> Self {
        let (sender, _) = watch::channel(online);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publishes a new state. Subscribers are only woken when the state actually changes.
    pub fn set_online(&self, online: bool) {
        self.sender.send_if_modified(|current| {
            if *current == online {
                false
            } else {
                *current = online;
                true
            }
        });
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ManualConnectivity {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConnectivityProbe for ManualConnectivity {
    fn is_online(&self) -> bool {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}
