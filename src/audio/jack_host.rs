//! Capture through a named JACK client with one mono input port.

use log::{debug, info, warn};

use super::CaptureHost;
use crate::analysis::{Analyzer, CallbackStatus};
use crate::error::CaptureError;

/// Name of the registered input port
pub const INPUT_PORT_NAME: &str = "input";

/// Process handler run by JACK on its real-time thread
struct InputHandler {
    port: jack::Port<jack::AudioIn>,
    analyzer: Analyzer,
}

impl jack::ProcessHandler for InputHandler {
    fn process(&mut self, _: &jack::Client, process_scope: &jack::ProcessScope) -> jack::Control {
        let chunk = self.port.as_slice(process_scope);
        match self.analyzer.process(chunk) {
            CallbackStatus::Continue => jack::Control::Continue,
            CallbackStatus::Quit => jack::Control::Quit,
        }
    }
}

/// Active JACK client feeding an [`Analyzer`]
pub struct JackCapture {
    client_name: String,
    sample_rate: u32,
    active: Option<jack::AsyncClient<(), InputHandler>>,
}

impl JackCapture {
    /// Open a client named `client_name`, register the input port and
    /// activate it. Never auto-starts a JACK server.
    pub fn start(client_name: &str, analyzer: Analyzer) -> Result<Self, CaptureError> {
        let (client, status) = jack::Client::new(client_name, jack::ClientOptions::NO_START_SERVER)?;
        debug!("JACK client status: {:?}", status);

        // The server may rename the client to keep names unique
        let client_name = client.name().to_string();
        info!("Created client {}", client_name);

        let port = client.register_port(INPUT_PORT_NAME, jack::AudioIn::default())?;
        let sample_rate = client.sample_rate() as u32;
        info!(
            "JACK input: {}:{} @ {}Hz, buffer {} frames",
            client_name,
            INPUT_PORT_NAME,
            sample_rate,
            client.buffer_size()
        );

        let active = client.activate_async((), InputHandler { port, analyzer })?;

        Ok(Self {
            client_name,
            sample_rate,
            active: Some(active),
        })
    }

    fn deactivate(&mut self) {
        if let Some(active) = self.active.take() {
            info!("Closing client {}", self.client_name);
            // Deactivation returns the handler (and the analyzer with it)
            // only after the process thread has stopped.
            if let Err(e) = active.deactivate() {
                warn!("Failed to deactivate JACK client: {}", e);
            }
        }
    }
}

impl CaptureHost for JackCapture {
    fn client_name(&self) -> &str {
        &self.client_name
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn close(mut self: Box<Self>) {
        self.deactivate();
    }
}

impl Drop for JackCapture {
    fn drop(&mut self) {
        self.deactivate();
    }
}
