//! Fixed-length sliding window over the incoming sample stream.

/// Most recent `len` samples in chronological order (oldest first).
///
/// Storage is allocated once; `ingest` only shifts and copies.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: Vec<f32>,
}

impl SampleWindow {
    /// Create a silent window of `len` samples
    pub fn new(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
        }
    }

    /// Absorb a capture chunk of any length.
    ///
    /// A chunk at least as long as the window replaces it with the chunk's
    /// first `len` samples; anything past that is dropped. Shorter chunks
    /// shift the history left by `chunk.len()` and land at the tail.
    pub fn ingest(&mut self, chunk: &[f32]) {
        let len = self.samples.len();
        let incoming = chunk.len();

        if incoming == 0 {
            return;
        }

        if incoming >= len {
            self.samples.copy_from_slice(&chunk[..len]);
        } else {
            self.samples.copy_within(incoming.., 0);
            self.samples[len - incoming..].copy_from_slice(chunk);
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
