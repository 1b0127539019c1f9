use std::sync::Arc;

use crate::models::config::MixerConfiguration;
use crate::models::error::MediaError;
use crate::models::media_kinds::AudioContextState;
use crate::traits::audio_graph::{AudioContext, AudioContextFactory, AudioNode, AudioSourceNode, MediaStreamDestinationNode};
use crate::traits::media_stream::StreamHandle;

/// Combines several audio-bearing streams into one audio-only stream.
///
/// Each `combine` call builds a fresh graph on a new host context:
/// ```text
/// [stream 0] → [source 0] ─┐
/// [stream 1] → [source 1] ─┼→ [destination] → output stream
/// [stream n] → [source n] ─┘
/// ```
/// Streams without audio tracks are skipped. Video is never routed.
#[derive(Clone)]
pub struct StreamMixer {
    factory: Arc<dyn AudioContextFactory>,
    config: MixerConfiguration,
}

impl StreamMixer {
    pub fn new(factory: Arc<dyn AudioContextFactory>, config: MixerConfiguration) -> Result<Self, MediaError> {
        config.validate().map_err(MediaError::ConfigurationFailed)?;
        Ok(Self { factory, config })
    }

    pub fn with_defaults(factory: Arc<dyn AudioContextFactory>) -> Self {
        Self {
            factory,
            config: MixerConfiguration::default(),
        }
    }

    pub fn config(&self) -> &MixerConfiguration {
        &self.config
    }

    /// Mix the audio of `streams` into a single output stream.
    ///
    /// Input streams and their tracks are never modified. With no
    /// audio-bearing input the result is a valid stream with a silent sink.
    pub fn combine(&self, streams: &[StreamHandle]) -> Result<MixedStream, MediaError> {
        let context = self.factory.create_context(&self.config)?;
        let destination = context.create_media_stream_destination()?;
        log::debug!(
            "Created mixing context ({} Hz), destination {}",
            context.sample_rate(),
            destination.node_id()
        );

        let audible: Vec<&StreamHandle> = streams.iter().filter(|stream| stream.has_audio()).collect();
        if audible.len() < streams.len() {
            log::debug!(
                "Skipping {} of {} streams without audio tracks",
                streams.len() - audible.len(),
                streams.len()
            );
        }

        let mut sources = Vec::with_capacity(audible.len());
        for stream in audible {
            sources.push(context.create_media_stream_source(stream)?);
        }

        for source in &sources {
            source.connect(destination.as_ref())?;
            log::debug!(
                "Connected stream {} ({}) to {}",
                source.media_stream().id(),
                source.node_id(),
                destination.node_id()
            );
        }

        Ok(MixedStream {
            context,
            destination,
            sources,
        })
    }
}

/// Mix `streams` with the default configuration.
pub fn combine_audio_streams(
    factory: Arc<dyn AudioContextFactory>,
    streams: &[StreamHandle],
) -> Result<MixedStream, MediaError> {
    StreamMixer::with_defaults(factory).combine(streams)
}

/// The result of a `combine` call.
///
/// Keeps the per-call context and its nodes alive. Dropping this value does
/// not close the context; call `close` to release it explicitly.
pub struct MixedStream {
    context: Box<dyn AudioContext>,
    destination: Box<dyn MediaStreamDestinationNode>,
    sources: Vec<Box<dyn AudioSourceNode>>,
}

impl MixedStream {
    /// The mixed, audio-only output stream.
    pub fn stream(&self) -> StreamHandle {
        self.destination.stream()
    }

    /// Number of input streams routed into the destination.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn sources(&self) -> &[Box<dyn AudioSourceNode>] {
        &self.sources
    }

    pub fn context(&self) -> &dyn AudioContext {
        self.context.as_ref()
    }

    pub fn context_state(&self) -> AudioContextState {
        self.context.state()
    }

    pub fn close(&self) -> Result<(), MediaError> {
        self.context.close()
    }
}
