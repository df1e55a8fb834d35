//! Audio data types shared between the capture side and the worklet.
//!
//! # Data Types
//! - [`PcmSample`] - Trait for PCM sample types (i16, f32)
//! - [`quantum::InputBus`] - One render quantum of per-channel f32 samples
//!
//! # Metering
//! - [`level::calculate_rms_level`] - RMS level of a sample block

pub mod level;
pub mod quantum;
pub mod sample;

pub use level::calculate_rms_level;
pub use quantum::{InputBus, RENDER_QUANTUM_FRAMES};
pub use sample::PcmSample;
