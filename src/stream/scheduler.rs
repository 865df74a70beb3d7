//! Periodic-tick consumer.
//!
//! [`SampleScheduler::on_tick`] is the body of the timer interrupt: drain
//! one code, hand it to the transfer engine, re-arm the alarm. The bus
//! transfer itself runs on offloaded hardware, so the handler finishes in
//! a small fraction of the tick period and never blocks, allocates or
//! logs.
//!
//! ## Usage in an ISR
//!
//! ```ignore
//! // At startup, after prefilling the ring:
//! scheduler.start(&mut alarm);
//!
//! // In the timer ISR:
//! fn timer_irq() {
//!     scheduler.on_tick(&mut dma, &mut alarm);
//! }
//! ```

use crate::dac::commands::{self, PowerMode};
use crate::hw::{TickAlarm, TransferEngine};
use crate::ring::CodeRing;

use super::stats::PipelineStats;

/// Drains the ring at a fixed tick rate and launches one asynchronous
/// transfer per tick.
pub struct SampleScheduler<'a, const N: usize> {
    ring: &'a CodeRing<N>,
    stats: &'a PipelineStats,
    period_us: u32,
}

impl<'a, const N: usize> SampleScheduler<'a, N> {
    /// Create a scheduler ticking every `period_us` microseconds.
    pub fn new(ring: &'a CodeRing<N>, stats: &'a PipelineStats, period_us: u32) -> Self {
        SampleScheduler {
            ring,
            stats,
            period_us,
        }
    }

    /// The configured tick period in microseconds.
    pub fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Arm the first tick, one period from now.
    pub fn start<A: TickAlarm>(&mut self, alarm: &mut A) {
        let deadline = alarm.now() + u64::from(self.period_us);
        alarm.arm(deadline);
    }

    /// Handle one tick.
    ///
    /// Pops and transmits one code when a code is ready and the engine is
    /// idle. A tick that finds the engine still draining the previous
    /// frame counts as starvation exactly like an empty ring: either way
    /// the output did not update this tick. The waiting code stays in the
    /// ring for the next tick.
    ///
    /// Always re-arms the alarm at `now + period` before returning, so a
    /// long transfer can never stop the tick train.
    pub fn on_tick<E, A>(&mut self, engine: &mut E, alarm: &mut A)
    where
        E: TransferEngine,
        A: TickAlarm,
    {
        if self.ring.available() > 0 && !engine.is_busy() {
            if let Some(code) = self.ring.try_pop() {
                let frame = commands::fast_write_frame(code, PowerMode::Normal);
                engine.begin_transfer(&frame);
                self.stats.record_transfer();
            }
        } else {
            self.stats.record_starvation();
        }

        let deadline = alarm.now() + u64::from(self.period_us);
        alarm.arm(deadline);
    }
}
