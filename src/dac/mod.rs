//! MCP4725 DAC support.
//!
//! [`commands`] holds the wire formats and is always available — the tick
//! handler encodes frames with it whether or not the blocking driver is
//! compiled in. The [`Mcp4725`] driver itself is gated behind the
//! `mcp4725` feature (on by default) because it pulls in `embedded-hal`.

pub mod commands;

#[cfg(feature = "mcp4725")]
mod mcp4725;

pub use commands::{PowerMode, Status};

#[cfg(feature = "mcp4725")]
pub use mcp4725::Mcp4725;
