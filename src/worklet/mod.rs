//! Worklet runtime: processor interface, registry, port, and node driver.
//!
//! This module mirrors the host/audio-thread split of a worklet runtime:
//!
//! - [`AudioWorkletProcessor`] - Per-quantum processing interface, invoked on
//!   a dedicated rendering thread
//! - [`WorkletRegistry`] - Maps fixed string identifiers to processor
//!   factories
//! - [`MessagePort`] / [`PcmBuffer`] - One-way ownership-transferring channel
//!   from the rendering thread to the main-thread consumer
//! - [`WorkletNode`] - Host-side handle that instantiates a processor and
//!   drives it from a quantum ring
//! - [`PcmConverter`] - The float-to-16-bit-PCM conversion processor

pub mod node;
pub mod pcm;
pub mod port;
pub mod processor;
pub mod registry;

pub use node::WorkletNode;
pub use pcm::{PCM_PROCESSOR_NAME, PcmConverter};
pub use port::{MessagePort, PcmBuffer};
pub use processor::{AudioWorkletProcessor, WorkletOptions};
pub use registry::{ProcessorFactory, WorkletRegistry};
