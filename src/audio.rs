//! Audio capture hosts.
//!
//! A host owns the driver-side resources (stream or client + port) and the
//! [`Analyzer`] that its real-time callback drives. Closing the host stops
//! the callback first, so the analyzer is never used after it is freed.

mod cpal_host;
#[cfg(feature = "jack")]
mod jack_host;

pub use cpal_host::CpalCapture;
#[cfg(feature = "jack")]
pub use jack_host::JackCapture;

use clap::ValueEnum;

use crate::analysis::Analyzer;
use crate::error::CaptureError;

/// Capture backend selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// Default input device through cpal
    #[default]
    Cpal,
    /// Named JACK client with a single input port
    Jack,
}

/// A running capture session
pub trait CaptureHost {
    /// Name the session was registered under
    fn client_name(&self) -> &str;

    /// Sample rate reported by the driver (Hz)
    fn sample_rate(&self) -> u32;

    /// Deactivate and close; no callback runs after this returns
    fn close(self: Box<Self>);
}

/// Open `backend` under `client_name` and start feeding `analyzer`
pub fn start(
    backend: Backend,
    client_name: &str,
    device_filter: Option<&str>,
    analyzer: Analyzer,
) -> Result<Box<dyn CaptureHost>, CaptureError> {
    match backend {
        Backend::Cpal => Ok(Box::new(CpalCapture::start(
            client_name,
            device_filter,
            analyzer,
        )?)),
        #[cfg(feature = "jack")]
        Backend::Jack => {
            if device_filter.is_some() {
                log::warn!("--device is ignored by the jack backend; connect ports with your patchbay");
            }
            Ok(Box::new(JackCapture::start(client_name, analyzer)?))
        }
        #[cfg(not(feature = "jack"))]
        Backend::Jack => Err(CaptureError::BackendUnavailable("jack")),
    }
}
