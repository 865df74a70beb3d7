//! # dac-stream
//!
//! A `no_std`, zero-allocation sample-streaming pipeline for driving an
//! MCP4725 12-bit I2C DAC at audio rate from an RP2350-class
//! microcontroller, written in pure Rust.
//!
//! A CPU-bound synthesis engine renders audio in bursts of 64-frame
//! blocks; the DAC needs a new value at an exact, jitter-free 22 µs
//! cadence; and each I2C transfer takes ~12 µs of bus time the CPU cannot
//! afford to babysit. The pipeline decouples the three with a lock-free
//! ring buffer, a timer-interrupt scheduler and a DMA-offloaded transfer
//! engine:
//!
//! ```text
//! SampleSource (bursty) → FillController → CodeRing → SampleScheduler (22 µs tick)
//!                                                          │
//!                                                 TransferEngine (DMA) → I2C → MCP4725
//! ```
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Buffer | [`ring`] | Lock-free SPSC ring of DAC codes |
//! | Conversion | [`quantize`] | Normalized sample → 12-bit code |
//! | Capability | [`hw`] | Timer-alarm and transfer-engine traits |
//! | Pipeline | [`stream`] | Scheduler, fill controller, stats |
//! | Device | [`dac`] | MCP4725 wire formats and blocking driver |
//! | Sources | [`source`] / [`sources`] | Producer trait and built-in oscillator |
//! | Testing | [`sim`] | Deterministic virtual-time hardware doubles |
//!
//! ## Quick start
//!
//! ```ignore
//! use dac_stream::constants::*;
//! use dac_stream::sources::SineSource;
//! use dac_stream::stream::{FillController, Pipeline, SampleScheduler, StatsCollector};
//!
//! static PIPELINE: Pipeline<RING_SLOTS> = Pipeline::new();
//!
//! // Bring-up: probe the DAC, then hand the scheduler to the timer ISR.
//! let mut dac = dac_stream::dac::Mcp4725::new(i2c);
//! dac.probe()?;
//!
//! let source = SineSource::new(440.0, NOMINAL_SAMPLE_RATE_HZ);
//! let mut fill: FillController<_, RING_SLOTS, RENDER_BLOCK_SAMPLES> =
//!     FillController::new(PIPELINE.ring(), PIPELINE.stats(), source, LOW_WATERMARK);
//! fill.prefill(4);
//!
//! let mut scheduler =
//!     SampleScheduler::new(PIPELINE.ring(), PIPELINE.stats(), TICK_PERIOD_US);
//! scheduler.start(&mut alarm);
//!
//! // Timer ISR: scheduler.on_tick(&mut dma, &mut alarm);
//! // Main loop: fill.poll(), back off briefly when saturated,
//! //            log StatsCollector reports once a second.
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `mcp4725` | yes | Blocking MCP4725 driver (requires `embedded-hal`) |
//! | `synth` | yes | Built-in [`sources::SineSource`] |
//!
//! ## Pipeline parameters
//!
//! - **Ring:** 512 slots ([`constants::RING_SLOTS`]), refill below 50%
//! - **Tick period:** 22 µs ([`constants::TICK_PERIOD_US`]), measured
//!   44 156 Hz ([`constants::NOMINAL_SAMPLE_RATE_HZ`])
//! - **Render block:** 64 frames ([`constants::RENDER_BLOCK_SAMPLES`])
//! - **Code format:** `u16`, 12 significant bits

#![no_std]

pub mod constants;
pub mod dac;
pub mod hw;
pub mod quantize;
pub mod ring;
pub mod sim;
pub mod source;
pub mod stream;

#[cfg(feature = "synth")]
pub mod sources;
