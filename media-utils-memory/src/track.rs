use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use media_utils_core::{MediaError, MediaStreamTrack, TrackKind, TrackState};

use crate::sample_buffer::SampleBuffer;

/// In-memory track. Audio tracks carry a buffer of pending samples that
/// audio contexts pull from when rendering.
pub struct MemoryTrack {
    id: String,
    kind: TrackKind,
    label: String,
    state: Mutex<TrackState>,
    samples: Option<Mutex<SampleBuffer>>,
    stop_calls: AtomicUsize,
}

impl MemoryTrack {
    pub fn new(kind: TrackKind, label: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            label: label.into(),
            state: Mutex::new(TrackState::Live),
            samples: match kind {
                TrackKind::Audio => Some(Mutex::new(SampleBuffer::default())),
                TrackKind::Video => None,
            },
            stop_calls: AtomicUsize::new(0),
        }
    }

    /// Queue captured samples. Only live audio tracks accept input.
    pub fn push_samples(&self, samples: &[f32]) -> Result<(), MediaError> {
        let Some(buffer) = &self.samples else {
            return Err(MediaError::NotSupported(format!(
                "{} track {} does not carry samples",
                self.kind, self.id
            )));
        };
        if self.state().is_ended() {
            return Err(MediaError::InvalidState(format!("track {} has ended", self.id)));
        }
        buffer.lock().write(samples);
        Ok(())
    }

    /// Take up to `count` pending samples. Ended and video tracks yield none.
    pub fn drain(&self, count: usize) -> Vec<f32> {
        match &self.samples {
            Some(buffer) if self.state().is_live() => buffer.lock().read(count),
            _ => Vec::new(),
        }
    }

    /// Copy up to `count` samples from absolute `position` without consuming them.
    ///
    /// Returns the samples and the next position. Ended and video tracks
    /// yield none and leave the position unchanged.
    pub fn read_at(&self, position: u64, count: usize) -> (Vec<f32>, u64) {
        match &self.samples {
            Some(buffer) if self.state().is_live() => buffer.lock().read_at(position, count),
            _ => (Vec::new(), position),
        }
    }

    pub fn pending(&self) -> usize {
        self.samples.as_ref().map(|b| b.lock().count()).unwrap_or(0)
    }

    /// Number of `stop` calls received, including no-op calls on an ended track.
    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

impl MediaStreamTrack for MemoryTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn state(&self) -> TrackState {
        *self.state.lock()
    }

    fn stop(&self) -> Result<(), MediaError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        {
            let mut state = self.state.lock();
            if state.is_ended() {
                return Ok(());
            }
            *state = TrackState::Ended;
        }
        if let Some(buffer) = &self.samples {
            buffer.lock().clear();
        }
        log::debug!("Stopped {} track {} ({})", self.kind, self.id, self.label);
        Ok(())
    }
}
