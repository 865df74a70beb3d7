//! Built-in sample sources.
//!
//! Available when the `synth` feature is enabled (on by default).

mod sine;

pub use sine::SineSource;
