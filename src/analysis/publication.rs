//! Lock-free handoff of analysis frames from the audio thread to the renderer.
//!
//! Backed by a triple buffer: the producer always owns a private back buffer,
//! publishing is an atomic index swap, and the consumer always reads the most
//! recently completed frame. Intermediate frames the consumer did not get to
//! are dropped. Neither side blocks and no frame is ever visible half-written.

use triple_buffer::TripleBuffer;

/// One published analysis result.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Incremented on every publish; 0 means nothing has been published yet
    pub sequence: u64,

    /// Sliding window snapshot, oldest sample first (waveform mode)
    pub samples: Vec<f32>,

    /// Clamped display magnitudes (spectrum mode)
    pub magnitudes: Vec<u32>,
}

impl Frame {
    /// Silent frame with storage for `window_len` samples and `bins` magnitudes
    pub fn silent(window_len: usize, bins: usize) -> Self {
        Self {
            sequence: 0,
            samples: vec![0.0; window_len],
            magnitudes: vec![0; bins],
        }
    }
}

/// Audio-side half. Owned by the capture callback.
pub struct FrameProducer {
    input: triple_buffer::Input<Frame>,
    sequence: u64,
}

impl FrameProducer {
    /// Fill the back buffer in place, then publish it.
    ///
    /// The back buffer holds stale data from an older frame; `fill` must
    /// overwrite every field it cares about. No allocation happens here as
    /// long as `fill` keeps the vector lengths unchanged.
    pub fn publish_with<F>(&mut self, fill: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.sequence += 1;
        let frame = self.input.input_buffer_mut();
        fill(frame);
        frame.sequence = self.sequence;
        self.input.publish();
    }

    /// Number of frames published so far
    pub fn published(&self) -> u64 {
        self.sequence
    }
}

/// Render-side half.
pub struct FrameConsumer {
    output: triple_buffer::Output<Frame>,
}

impl FrameConsumer {
    /// Newest completed frame, or the previous one if nothing new arrived
    pub fn latest(&mut self) -> &Frame {
        self.output.read()
    }
}

/// Allocate all three frame buffers up front and split them into halves
pub fn channel(window_len: usize, bins: usize) -> (FrameProducer, FrameConsumer) {
    let (input, output) = TripleBuffer::new(&Frame::silent(window_len, bins)).split();
    (
        FrameProducer { input, sequence: 0 },
        FrameConsumer { output },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_initial_frame_is_silent() {
        let (_producer, mut consumer) = channel(16, 4);
        let frame = consumer.latest();

        assert_eq!(frame.sequence, 0);
        assert_eq!(frame.samples, vec![0.0; 16]);
        assert_eq!(frame.magnitudes, vec![0; 4]);
    }

    #[test]
    fn test_consumer_sees_latest_frame_only() {
        let (mut producer, mut consumer) = channel(4, 1);

        for value in 1..=3u32 {
            producer.publish_with(|frame| {
                frame.samples.fill(value as f32);
                frame.magnitudes.fill(value);
            });
        }

        let frame = consumer.latest();
        assert_eq!(frame.sequence, 3);
        assert_eq!(frame.magnitudes, vec![3]);
        assert_eq!(frame.samples, vec![3.0; 4]);
        assert_eq!(producer.published(), 3);
    }

    #[test]
    fn test_reads_repeat_without_new_publish() {
        let (mut producer, mut consumer) = channel(2, 2);
        producer.publish_with(|frame| frame.magnitudes.copy_from_slice(&[4, 5]));

        let first = consumer.latest().clone();
        let second = consumer.latest().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_publish_never_tears() {
        const ITERATIONS: u32 = 10_000;
        const HEIGHT: u32 = 512;
        let window_len = 1024;
        let bins = 256;

        let (mut producer, mut consumer) = channel(window_len, bins);

        let writer = thread::spawn(move || {
            for i in 1..=ITERATIONS {
                let value = i % HEIGHT;
                producer.publish_with(|frame| {
                    frame.magnitudes.fill(value);
                    frame.samples.fill(i as f32);
                });
            }
            producer.published()
        });

        let reader = thread::spawn(move || {
            let mut last_sequence = 0;
            for _ in 0..ITERATIONS {
                let frame = consumer.latest();
                assert!(frame.sequence >= last_sequence);
                last_sequence = frame.sequence;

                let first = frame.magnitudes[0];
                assert!(frame.magnitudes.iter().all(|&m| m == first && m < HEIGHT));
                if frame.sequence > 0 {
                    assert_eq!(first, frame.sequence as u32 % HEIGHT);
                    assert!(frame
                        .samples
                        .iter()
                        .all(|&s| s == frame.sequence as f32));
                }
            }
        });

        assert_eq!(writer.join().unwrap(), ITERATIONS as u64);
        reader.join().unwrap();
    }
}
