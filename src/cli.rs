//! Command-line argument parsing.

use clap::Parser;

use crate::audio::Backend;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "specscope")]
#[command(about = "Real-time audio spectrum and waveform visualizer", long_about = None)]
pub struct Args {
    /// Client name registered with the audio host
    #[arg(value_name = "CLIENT_NAME")]
    pub client_name: String,

    /// Capture backend
    #[arg(long, value_enum, default_value_t = Backend::Cpal)]
    pub backend: Backend,

    /// Input device to open, matched by name substring (cpal backend)
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_client_name_is_required() {
        let err = Args::try_parse_from(["specscope"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["specscope", "scope"]).unwrap();
        assert_eq!(args.client_name, "scope");
        assert_eq!(args.backend, Backend::Cpal);
        assert!(args.device.is_none());
    }

    #[test]
    fn test_backend_and_device() {
        let args =
            Args::try_parse_from(["specscope", "scope", "--backend", "jack", "--device", "USB"])
                .unwrap();
        assert_eq!(args.backend, Backend::Jack);
        assert_eq!(args.device.as_deref(), Some("USB"));
    }

    #[test]
    fn test_rejects_unknown_backend() {
        let err = Args::try_parse_from(["specscope", "scope", "--backend", "alsa"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }
}
