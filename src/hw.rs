//! Hardware capability traits for the streaming pipeline.
//!
//! The tick handler and fill loop never touch peripheral registers
//! directly; they drive these two narrow traits instead. Boards implement
//! them over the real timer and DMA engine, hosts use the deterministic
//! doubles in [`crate::sim`].

/// An asynchronous, hardware-offloaded bus transmitter.
///
/// One transfer moves exactly one 3-byte command frame to the fixed
/// target device. On real hardware this is a DMA channel feeding the I2C
/// TX FIFO; launching a transfer returns immediately and the bus protocol
/// runs without the CPU.
///
/// There is no completion callback: the only way to observe completion is
/// a later [`is_busy()`](TransferEngine::is_busy) returning `false`. A
/// transfer that fails on the wire is indistinguishable from one that
/// succeeded; no error propagates back and nothing is retried.
pub trait TransferEngine {
    /// `true` while a previously launched transfer is still in flight.
    fn is_busy(&self) -> bool;

    /// Launch an asynchronous transmission of one command frame.
    ///
    /// Must not be called while [`is_busy()`](TransferEngine::is_busy)
    /// returns `true`; the caller checks first. Returns immediately.
    fn begin_transfer(&mut self, frame: &[u8; 3]);
}

/// A microsecond clock with a one-shot alarm.
///
/// The tick handler re-arms itself every tick at `now + period` using the
/// absolute deadline, so jitter in handler entry does not accumulate into
/// rate drift.
pub trait TickAlarm {
    /// Current monotonic time in microseconds.
    fn now(&self) -> u64;

    /// Arm the alarm to fire at the given absolute time, replacing any
    /// previously armed deadline.
    fn arm(&mut self, deadline_us: u64);
}
