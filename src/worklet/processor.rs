//! The host-facing processor interface.

use crate::audio::InputBus;
use crate::worklet::port::MessagePort;

/// Options passed to a processor factory at construction time.
///
/// All configuration is explicit; processors read nothing from ambient
/// globals. The host graph fixes these values when it instantiates a node.
#[derive(Debug, Clone)]
pub struct WorkletOptions {
    /// Sample frames per render quantum.
    pub quantum_frames: usize,
    /// Channels delivered on the first input bus.
    pub channels: usize,
}

impl Default for WorkletOptions {
    fn default() -> Self {
        Self {
            quantum_frames: crate::audio::RENDER_QUANTUM_FRAMES,
            channels: 1,
        }
    }
}

/// A processing unit invoked by the host once per render quantum.
///
/// Implementations run on the host's dedicated audio rendering thread and
/// must never block or perform I/O; the only hand-off to another execution
/// context is a non-blocking [`MessagePort::post`]. Any panic during
/// processing propagates to the host thread, which tears the node down.
pub trait AudioWorkletProcessor: Send {
    /// Process one render quantum.
    ///
    /// `inputs` holds the input buses for this invocation; a bus may have
    /// zero channels when no input is connected. Returns the keep-alive
    /// flag: `true` to be invoked on subsequent quanta, `false` to let the
    /// host stop the node.
    fn process(&mut self, inputs: &[InputBus], port: &MessagePort) -> bool;
}
