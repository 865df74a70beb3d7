//! Pipeline counters and rate reporting.
//!
//! [`PipelineStats`] is a set of monotonic counters shared between the
//! tick handler and the fill loop. Each counter has exactly one writer;
//! reads from the other domain use relaxed loads and may observe a value
//! one tick stale, which is fine because the counters feed reporting and
//! never control flow.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// Monotonic pipeline counters. Reset only happens at construction.
pub struct PipelineStats {
    /// Transfers launched by the tick handler. Written by the consumer.
    transfers_completed: AtomicU32,
    /// Ticks that produced no output update, either because the ring was
    /// empty or because the engine was still draining the previous frame.
    /// Written by the consumer.
    starved_ticks: AtomicU32,
    /// Render blocks cut short because the ring filled mid-block. Written
    /// by the producer.
    overflow_drops: AtomicU32,
    /// Frames rendered by the synthesis engine. Written by the producer.
    samples_generated: AtomicU32,
}

impl PipelineStats {
    /// Create a zeroed counter set.
    pub const fn new() -> Self {
        PipelineStats {
            transfers_completed: AtomicU32::new(0),
            starved_ticks: AtomicU32::new(0),
            overflow_drops: AtomicU32::new(0),
            samples_generated: AtomicU32::new(0),
        }
    }

    /// Record one launched transfer (consumer side).
    pub fn record_transfer(&self) {
        self.transfers_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one tick with no output update (consumer side).
    pub fn record_starvation(&self) {
        self.starved_ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one render block truncated by a full ring (producer side).
    pub fn record_overflow(&self) {
        self.overflow_drops.fetch_add(1, Ordering::Relaxed);
    }

    /// Add rendered frames to the generation counter (producer side).
    pub fn add_samples_generated(&self, count: u32) {
        self.samples_generated.fetch_add(count, Ordering::Relaxed);
    }

    /// Transfers launched so far.
    pub fn transfers_completed(&self) -> u32 {
        self.transfers_completed.load(Ordering::Relaxed)
    }

    /// Starved ticks so far.
    pub fn starved_ticks(&self) -> u32 {
        self.starved_ticks.load(Ordering::Relaxed)
    }

    /// Truncated render blocks so far.
    pub fn overflow_drops(&self) -> u32 {
        self.overflow_drops.load(Ordering::Relaxed)
    }

    /// Frames rendered so far.
    pub fn samples_generated(&self) -> u32 {
        self.samples_generated.load(Ordering::Relaxed)
    }
}

/// One measurement interval, produced by [`StatsCollector::poll`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateReport {
    /// Measured transfer rate over the interval, in Hz.
    pub actual_rate_hz: f32,
    /// Total transfers at the end of the interval.
    pub transfers_completed: u32,
    /// Total starved ticks at the end of the interval.
    pub starved_ticks: u32,
    /// Total truncated blocks at the end of the interval.
    pub overflow_drops: u32,
    /// Total rendered frames at the end of the interval.
    pub samples_generated: u32,
}

impl RateReport {
    /// Frequency a signal rendered at `signal_hz` actually comes out at,
    /// given the producer's configured rate.
    ///
    /// When the measured drain rate differs from the rate the source was
    /// configured for, every rendered frequency scales by the same ratio.
    pub fn scaled_frequency(&self, signal_hz: f32, producer_rate_hz: f32) -> f32 {
        signal_hz * (self.actual_rate_hz / producer_rate_hz)
    }
}

impl fmt::Display for RateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rate {:.0} Hz | transfers {} | starved {} | dropped blocks {} | rendered {}",
            self.actual_rate_hz,
            self.transfers_completed,
            self.starved_ticks,
            self.overflow_drops,
            self.samples_generated
        )
    }
}

/// Periodic aggregator over [`PipelineStats`].
///
/// Lives in the cooperative domain; the main loop calls
/// [`poll()`](StatsCollector::poll) as often as it likes and gets
/// `Some(report)` once per interval. Does not mutate pipeline state.
pub struct StatsCollector {
    interval_us: u64,
    last_report_us: u64,
    last_transfers: u32,
}

impl StatsCollector {
    /// Create a collector; the first interval starts at `now_us`.
    pub const fn new(now_us: u64, interval_us: u64) -> Self {
        StatsCollector {
            interval_us,
            last_report_us: now_us,
            last_transfers: 0,
        }
    }

    /// Produce a report if a full interval has elapsed since the last one.
    pub fn poll(&mut self, now_us: u64, stats: &PipelineStats) -> Option<RateReport> {
        let elapsed = now_us.wrapping_sub(self.last_report_us);
        if elapsed < self.interval_us {
            return None;
        }

        let transfers = stats.transfers_completed();
        let delta = transfers.wrapping_sub(self.last_transfers);
        let actual_rate_hz = delta as f32 / (elapsed as f32 / 1_000_000.0);

        self.last_report_us = now_us;
        self.last_transfers = transfers;

        Some(RateReport {
            actual_rate_hz,
            transfers_completed: transfers,
            starved_ticks: stats.starved_ticks(),
            overflow_drops: stats.overflow_drops(),
            samples_generated: stats.samples_generated(),
        })
    }
}
