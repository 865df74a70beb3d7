/// DAC resolution in bits.
pub const DAC_RESOLUTION_BITS: u32 = 12;

/// Largest code the DAC accepts (`2^12 - 1`).
pub const DAC_MAX_CODE: u16 = 4095;

/// Number of normalized frames rendered per synthesis request.
pub const RENDER_BLOCK_SAMPLES: usize = 64;

/// Default ring size in slots. Must be a power of two; usable capacity is
/// one less slot.
pub const RING_SLOTS: usize = 512;

/// Refill threshold: occupancy below this triggers a synthesis request.
pub const LOW_WATERMARK: usize = RING_SLOTS / 2;

/// Tick period driving the consumer interrupt, in microseconds.
pub const TICK_PERIOD_US: u32 = 22;

/// Output rate the 22 µs tick was measured to produce on the reference
/// board. The producer must be configured to this rate, not to
/// `1e6 / TICK_PERIOD_US`.
pub const NOMINAL_SAMPLE_RATE_HZ: f32 = 44_156.0;

/// How long the fill loop should back off when the ring sits at or above
/// the watermark, in microseconds.
pub const FILL_BACKOFF_US: u32 = 500;

/// Interval between rate reports, in microseconds.
pub const REPORT_INTERVAL_US: u64 = 1_000_000;
