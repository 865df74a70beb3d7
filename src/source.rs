//! The synthesis-engine interface.
//!
//! The pipeline treats the synthesis engine as an opaque producer of
//! fixed-size blocks of normalized frames. Anything that can fill a
//! `&mut [f32]` on demand can feed the DAC: a compiled patch, a wavetable
//! oscillator, a test ramp.

/// A producer of normalized audio/control frames.
///
/// Implementations fill the whole slice with samples in `[-1.0, 1.0]`.
/// `render` runs in the cooperative domain and may take as long as it
/// needs; the ring buffer absorbs the burst.
pub trait SampleSource {
    /// Render the next block of frames into `frames`.
    fn render(&mut self, frames: &mut [f32]);
}

/// A source that renders silence (mid-scale output).
pub struct Silence;

impl SampleSource for Silence {
    fn render(&mut self, frames: &mut [f32]) {
        frames.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_renders_zeros() {
        let mut frames = [1.0f32; 16];
        Silence.render(&mut frames);
        assert!(frames.iter().all(|&s| s == 0.0));
    }
}
