//! Real-time float-to-PCM conversion for a voice-chat capture path.
//!
//! The crate is organized around a small worklet runtime:
//!
//! - [`audio`] - Sample types, render quanta, and level metering
//! - [`worklet`] - Processor interface, registry, message port, and the
//!   [`worklet::PcmConverter`] that turns f32 quanta into 16-bit PCM buffers
//! - [`capture`] - cpal microphone capture feeding the worklet's quantum ring
//!
//! Data flows: capture callback -> SPSC quantum ring -> rendering thread
//! (processor) -> message port -> main-thread consumer.

pub mod audio;
pub mod capture;
pub mod worklet;
