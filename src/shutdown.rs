use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The hardware button was pressed
    Input,
    /// Ctrl+C
    Interrupt,
}

impl ShutdownReason {
    pub fn exit_code(&self) -> u8 {
        match self {
            ShutdownReason::Input => 1,
            ShutdownReason::Interrupt => 130,
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Input => write!(f, "button pressed"),
            ShutdownReason::Interrupt => write!(f, "interrupted"),
        }
    }
}

/// Fires the shutdown token. Cheap to clone and safe to use from plain threads.
#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    tx: Arc<watch::Sender<Option<ShutdownReason>>>,
}

impl ShutdownTrigger {
    /// Request shutdown. Only the first reason sticks.
    pub fn fire(&self, reason: ShutdownReason) {
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });
    }
}

/// The main loop's side of the token.
#[derive(Debug)]
pub struct Shutdown {
    rx: watch::Receiver<Option<ShutdownReason>>,
}

impl Shutdown {
    #[cfg(test)]
    pub fn reason(&self) -> Option<ShutdownReason> {
        *self.rx.borrow()
    }

    /// Resolves once shutdown has been requested.
    ///
    /// If every trigger is dropped without firing this never resolves.
    pub async fn triggered(&mut self) -> ShutdownReason {
        let reason = match self.rx.wait_for(|reason| reason.is_some()).await {
            Ok(reason) => *reason,
            Err(_) => None,
        };
        match reason {
            Some(reason) => reason,
            None => std::future::pending().await,
        }
    }
}

pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(None);
    (ShutdownTrigger { tx: Arc::new(tx) }, Shutdown { rx })
}
