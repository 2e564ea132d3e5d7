//! Capture through cpal's default host.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample};
use log::{info, warn};

use super::CaptureHost;
use crate::analysis::Analyzer;
use crate::error::CaptureError;

/// Running cpal input stream feeding an [`Analyzer`]
pub struct CpalCapture {
    client_name: String,
    device_name: String,
    sample_rate: u32,
    /// Input stream (kept alive; dropping it stops the callback)
    stream: cpal::Stream,
}

impl CpalCapture {
    /// Open the input device (default, or first whose name contains
    /// `device_filter`), and start streaming into `analyzer`
    pub fn start(
        client_name: &str,
        device_filter: Option<&str>,
        analyzer: Analyzer,
    ) -> Result<Self, CaptureError> {
        let host = cpal::default_host();
        let device = select_device(&host, device_filter)?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

        let supported = device.default_input_config()?;
        let sample_rate = supported.sample_rate().0;
        let sample_format = supported.sample_format();
        let config = supported.config();

        info!(
            "Audio input: {} @ {}Hz, {} channel(s), {:?}",
            device_name, sample_rate, config.channels, sample_format
        );

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, analyzer)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, analyzer)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, analyzer)?,
            other => return Err(CaptureError::UnsupportedSampleFormat(other)),
        };

        stream.play()?;
        info!("Capturing for client {}", client_name);

        Ok(Self {
            client_name: client_name.to_string(),
            device_name,
            sample_rate,
            stream,
        })
    }
}

impl CaptureHost for CpalCapture {
    fn client_name(&self) -> &str {
        &self.client_name
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn close(self: Box<Self>) {
        let this = *self;
        info!("Closing client {} ({})", this.client_name, this.device_name);
        if let Err(e) = this.stream.pause() {
            warn!("Failed to pause input stream: {}", e);
        }
        // Dropping the stream stops the callback before the analyzer it owns
        // is freed.
        drop(this.stream);
    }
}

fn select_device(
    host: &cpal::Host,
    device_filter: Option<&str>,
) -> Result<cpal::Device, CaptureError> {
    match device_filter {
        None => host
            .default_input_device()
            .ok_or(CaptureError::NoInputDevice),
        Some(wanted) => host
            .input_devices()?
            .find(|device| {
                device
                    .name()
                    .map(|name| name.contains(wanted))
                    .unwrap_or(false)
            })
            .ok_or_else(|| CaptureError::DeviceNotFound(wanted.to_string())),
    }
}

/// Build an input stream that keeps the first channel of each frame.
///
/// Oversized callbacks are cut to the analyzer's window length here, which
/// matches what the sliding window would keep anyway.
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut analyzer: Analyzer,
) -> Result<cpal::Stream, CaptureError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = usize::from(config.channels.max(1));
    let mut mono = vec![0.0f32; analyzer.window_len()];

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let frames = downmix_first_channel(data, channels, &mut mono);
            // cpal offers no way to stop from inside the callback
            let _ = analyzer.process(&mono[..frames]);
        },
        |err| warn!("Audio stream error: {}", err),
        None,
    )?;

    Ok(stream)
}

/// Copy channel 0 of interleaved `data` into `mono`; returns frames written
fn downmix_first_channel<T>(data: &[T], channels: usize, mono: &mut [f32]) -> usize
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let mut written = 0;
    for (slot, frame) in mono.iter_mut().zip(data.chunks_exact(channels)) {
        *slot = <f32 as FromSample<T>>::from_sample_(frame[0]);
        written += 1;
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_channel() {
        let data = [0.1f32, 9.0, 0.2, 9.0, 0.3, 9.0];
        let mut mono = [0.0f32; 8];

        let frames = downmix_first_channel(&data, 2, &mut mono);
        assert_eq!(frames, 3);
        assert_eq!(&mono[..3], &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_truncates_to_window() {
        let data = [1.0f32; 10];
        let mut mono = [0.0f32; 4];

        assert_eq!(downmix_first_channel(&data, 1, &mut mono), 4);
    }

    #[test]
    fn test_converts_integer_samples() {
        let data = [i16::MAX, 0, i16::MIN, 0];
        let mut mono = [0.0f32; 4];

        let frames = downmix_first_channel(&data, 2, &mut mono);
        assert_eq!(frames, 2);
        assert!((mono[0] - 1.0).abs() < 1e-3);
        assert_eq!(mono[1], -1.0);
    }
}
