//! Sine oscillator source.

use crate::source::SampleSource;

/// Sine wave source using a normalized phase accumulator.
///
/// The phase advances by `frequency / sample_rate` per frame and wraps in
/// `[0, 1)`. The sample rate handed to [`new()`](SineSource::new) must be
/// the rate the consumer actually drains at
/// ([`NOMINAL_SAMPLE_RATE_HZ`](crate::constants::NOMINAL_SAMPLE_RATE_HZ)
/// by default), or the output frequency scales with the mismatch.
pub struct SineSource {
    phase: f32,
    step: f32,
    amplitude: f32,
}

impl SineSource {
    /// Create an oscillator at `frequency_hz` against `sample_rate_hz`,
    /// initially at full amplitude.
    pub fn new(frequency_hz: f32, sample_rate_hz: f32) -> Self {
        SineSource {
            phase: 0.0,
            step: frequency_hz / sample_rate_hz,
            amplitude: 1.0,
        }
    }

    /// Set the output amplitude (0.0 = silent, 1.0 = full scale).
    pub fn amplitude(&mut self, level: f32) {
        self.amplitude = level.clamp(0.0, 1.0);
    }

    /// Change the frequency without resetting phase.
    pub fn frequency(&mut self, frequency_hz: f32, sample_rate_hz: f32) {
        self.step = frequency_hz / sample_rate_hz;
    }
}

impl SampleSource for SineSource {
    fn render(&mut self, frames: &mut [f32]) {
        for frame in frames.iter_mut() {
            *frame = self.amplitude * libm::sinf(core::f32::consts::TAU * self.phase);
            self.phase += self.step;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }
        }
    }
}
