use std::collections::VecDeque;

/// Five seconds of mono audio at 48 kHz.
pub const DEFAULT_CAPACITY: usize = 48000 * 5;

/// Bounded queue of f32 samples for one audio track.
///
/// Every sample has an absolute position that only grows. Readers that must
/// not disturb each other keep their own position and use `read_at`; a plain
/// `read` consumes from the head. Overflow drops the oldest samples, and
/// positions that fell behind resume at the oldest retained sample.
#[derive(Debug)]
pub struct SampleBuffer {
    samples: VecDeque<f32>,
    start: u64,
    capacity: usize,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            start: 0,
            capacity,
        }
    }

    /// Append samples, keeping at most `capacity` of the newest.
    pub fn write(&mut self, samples: &[f32]) {
        if samples.is_empty() || self.capacity == 0 {
            return;
        }

        let tail = &samples[samples.len().saturating_sub(self.capacity)..];
        let overflow = (self.samples.len() + tail.len()).saturating_sub(self.capacity);
        if overflow > 0 {
            log::debug!("Sample buffer overflow, dropping {} oldest samples", overflow);
            self.samples.drain(..overflow);
            self.start += overflow as u64;
        }
        self.samples.extend(tail.iter().copied());
    }

    /// Remove and return up to `count` samples from the head.
    pub fn read(&mut self, count: usize) -> Vec<f32> {
        let to_read = count.min(self.samples.len());
        self.start += to_read as u64;
        self.samples.drain(..to_read).collect()
    }

    /// Copy up to `count` samples starting at absolute `position`.
    ///
    /// Returns the samples and the position just after them.
    pub fn read_at(&self, position: u64, count: usize) -> (Vec<f32>, u64) {
        let from = position.max(self.start);
        let offset = (from - self.start) as usize;
        let samples: Vec<f32> = self.samples.iter().skip(offset).take(count).copied().collect();
        let next = from + samples.len() as u64;
        (samples, next)
    }

    /// Absolute position of the oldest retained sample.
    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn clear(&mut self) {
        self.start += self.samples.len() as u64;
        self.samples.clear();
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
