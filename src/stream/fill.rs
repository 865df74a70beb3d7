//! Cooperative producer.
//!
//! [`FillController`] runs in the main loop. Each
//! [`poll()`](FillController::poll) checks ring occupancy against the
//! watermark and, when the ring has drained below it, renders one block
//! from the synthesis engine, quantizes it and pushes the codes. The
//! caller backs off briefly when told the ring is saturated:
//!
//! ```ignore
//! loop {
//!     if let FillOutcome::Saturated = fill.poll() {
//!         delay.delay_us(FILL_BACKOFF_US);
//!     }
//!     if let Some(report) = collector.poll(timer.now(), pipeline.stats()) {
//!         log::info!("{report}");
//!     }
//! }
//! ```

use crate::quantize::quantize;
use crate::ring::CodeRing;
use crate::source::SampleSource;

use super::stats::PipelineStats;

/// What one producer iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// A block was rendered; this many of its codes were enqueued.
    Refilled(usize),
    /// Occupancy is at or above the watermark; back off briefly instead
    /// of busy-spinning.
    Saturated,
}

/// Keeps the ring topped up from a [`SampleSource`].
///
/// `B` is the render block size in frames. One `poll()` renders at most
/// one block; a block that hits a full ring mid-push is truncated and the
/// rest of it dropped (counted, never retried).
pub struct FillController<'a, S, const N: usize, const B: usize> {
    ring: &'a CodeRing<N>,
    stats: &'a PipelineStats,
    source: S,
    low_watermark: usize,
    block: [f32; B],
}

impl<'a, S, const N: usize, const B: usize> FillController<'a, S, N, B>
where
    S: SampleSource,
{
    /// Create a controller refilling whenever occupancy drops below
    /// `low_watermark` codes.
    pub fn new(
        ring: &'a CodeRing<N>,
        stats: &'a PipelineStats,
        source: S,
        low_watermark: usize,
    ) -> Self {
        FillController {
            ring,
            stats,
            source,
            low_watermark,
            block: [0.0; B],
        }
    }

    /// Run one iteration of the producer loop.
    pub fn poll(&mut self) -> FillOutcome {
        if self.ring.available() >= self.low_watermark {
            return FillOutcome::Saturated;
        }

        FillOutcome::Refilled(self.render_and_push())
    }

    /// Render and push `blocks` blocks regardless of the watermark.
    ///
    /// Called once before the first tick is armed so the consumer does
    /// not starve while the first regular refill happens. Returns codes
    /// actually enqueued; pushing stops early if the ring fills.
    pub fn prefill(&mut self, blocks: usize) -> usize {
        let mut pushed = 0;
        for _ in 0..blocks {
            pushed += self.render_and_push();
        }
        log::debug!("prefilled ring with {} codes", pushed);
        pushed
    }

    /// Access the synthesis engine, e.g. to retune it between polls.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn render_and_push(&mut self) -> usize {
        self.source.render(&mut self.block);
        self.stats.add_samples_generated(B as u32);

        let mut pushed = 0;
        for &sample in self.block.iter() {
            if !self.ring.try_push(quantize(sample)) {
                self.stats.record_overflow();
                break;
            }
            pushed += 1;
        }
        pushed
    }
}
