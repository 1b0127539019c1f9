//! Sample math used when rendering a mixing graph.
//!
//! Blocks are mono f32 in `[-1.0, 1.0]`. Shorter inputs are treated as
//! trailing silence.

use media_utils_core::NodeId;

/// Add `input` into `block` sample by sample.
pub fn accumulate(block: &mut [f32], input: &[f32]) {
    for (out, sample) in block.iter_mut().zip(input) {
        *out += sample;
    }
}

/// Clamp every sample to the normalized range.
pub fn clamp_block(block: &mut [f32]) {
    for sample in block.iter_mut() {
        *sample = sample.clamp(-1.0, 1.0);
    }
}

/// What one `render` call produced for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub destination: NodeId,
    pub frames: usize,
    /// Input tracks summed into the block.
    pub inputs: usize,
}
