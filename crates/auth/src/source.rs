//! Session and location sources (explicitly injected collaborators).
//!
//! The guard never looks these up ambiently: hosts construct a source and
//! hand it to whatever drives render passes.

use std::sync::{Mutex, mpsc};
use std::time::Duration;

use thiserror::Error;

use ems_core::Location;

use crate::Session;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// A publisher panicked while holding the state lock.
    #[error("session source lock poisoned")]
    Poisoned,
}

/// A receiver of session change notifications.
///
/// Each subscription gets every snapshot published after it was created.
/// Consume from a single thread.
#[derive(Debug)]
pub struct SessionSubscription {
    rx: mpsc::Receiver<Session>,
}

impl SessionSubscription {
    pub fn new(rx: mpsc::Receiver<Session>) -> Self {
        Self { rx }
    }

    pub fn recv(&self) -> Result<Session, mpsc::RecvError> {
        self.rx.recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Session, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn try_recv(&self) -> Result<Session, mpsc::TryRecvError> {
        self.rx.try_recv()
    }
}

/// Owner of authentication state and its resolution lifecycle.
pub trait SessionSource {
    /// One consistent snapshot of the current session.
    fn snapshot(&self) -> Result<Session, SourceError>;

    /// Register for change notifications.
    fn subscribe(&self) -> SessionSubscription;
}

/// Supplies the location the viewer is trying to reach.
pub trait LocationSource {
    fn current(&self) -> Location;
}

/// A fixed location (single-view hosts, tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLocation(pub Location);

impl LocationSource for StaticLocation {
    fn current(&self) -> Location {
        self.0.clone()
    }
}

/// In-memory session source with fan-out notifications.
///
/// - No IO / no async
/// - Every `publish` replaces the snapshot, then notifies subscribers
/// - Subscribers whose receiver was dropped are pruned on publish
///
/// Snapshot and subscriber list share one lock, so concurrent publishers
/// deliver in the order they replace the snapshot: the last session any
/// subscriber receives is always the current snapshot.
#[derive(Debug)]
pub struct InMemorySessionSource {
    state: Mutex<SourceState>,
}

#[derive(Debug)]
struct SourceState {
    current: Session,
    subscribers: Vec<mpsc::Sender<Session>>,
}

impl InMemorySessionSource {
    /// Starts in the loading state, as a freshly mounted provider does.
    pub fn new() -> Self {
        Self::with_session(Session::loading())
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            state: Mutex::new(SourceState {
                current: session,
                subscribers: Vec::new(),
            }),
        }
    }

    pub fn publish(&self, session: Session) -> Result<(), SourceError> {
        let mut state = self.state.lock().map_err(|_| SourceError::Poisoned)?;
        state.current = session.clone();
        state.subscribers.retain(|tx| tx.send(session.clone()).is_ok());

        tracing::debug!(
            loading = session.loading,
            authenticated = session.user.is_some(),
            subscribers = state.subscribers.len(),
            "session published"
        );

        Ok(())
    }

    /// Drop every subscriber; their `recv` calls then report disconnection.
    pub fn close(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.subscribers.clear();
        }
    }
}

impl Default for InMemorySessionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSource for InMemorySessionSource {
    fn snapshot(&self) -> Result<Session, SourceError> {
        self.state
            .lock()
            .map(|state| state.current.clone())
            .map_err(|_| SourceError::Poisoned)
    }

    fn subscribe(&self) -> SessionSubscription {
        let (tx, rx) = mpsc::channel();

        // On a poisoned lock the subscription is still returned; it simply
        // never receives anything.
        if let Ok(mut state) = self.state.lock() {
            state.subscribers.push(tx);
        }

        SessionSubscription::new(rx)
    }
}
