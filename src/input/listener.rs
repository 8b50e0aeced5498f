use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use tracing::{info, warn};

use crate::shutdown::{ShutdownReason, ShutdownTrigger};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input closed before any event arrived")]
    Closed,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Something that can block until the user presses the button.
pub trait InputSource: Send {
    fn wait_for_event(&mut self) -> Result<(), InputError>;
}

/// Treats a line on stdin (the Enter key) as a button press.
pub struct StdinButton;

impl InputSource for StdinButton {
    fn wait_for_event(&mut self) -> Result<(), InputError> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(InputError::Closed);
        }
        Ok(())
    }
}

/// Start the listener thread.
///
/// It waits for exactly one event, fires the shutdown token and ends. An
/// input that fails or closes leaves the token untouched.
pub fn spawn<S>(mut source: S, trigger: ShutdownTrigger) -> io::Result<JoinHandle<()>>
where
    S: InputSource + 'static,
{
    thread::Builder::new()
        .name("input-listener".to_string())
        .spawn(move || match source.wait_for_event() {
            Ok(()) => {
                info!("Button pressed, shutting down");
                trigger.fire(ShutdownReason::Input);
            }
            Err(e) => {
                warn!("Input listener stopped, exit on button press disabled: {}", e);
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown;

    struct Pressed;

    impl InputSource for Pressed {
        fn wait_for_event(&mut self) -> Result<(), InputError> {
            Ok(())
        }
    }

    struct Unplugged;

    impl InputSource for Unplugged {
        fn wait_for_event(&mut self) -> Result<(), InputError> {
            Err(InputError::Closed)
        }
    }

    #[test]
    fn test_press_fires_shutdown() {
        let (trigger, shutdown) = shutdown::channel();
        spawn(Pressed, trigger).unwrap().join().unwrap();
        assert_eq!(shutdown.reason(), Some(ShutdownReason::Input));
    }

    #[test]
    fn test_closed_input_does_not_fire() {
        let (trigger, shutdown) = shutdown::channel();
        spawn(Unplugged, trigger).unwrap().join().unwrap();
        assert_eq!(shutdown.reason(), None);
    }
}
