//! Per-invocation input data handed to a worklet processor.

use anyhow::Result;

/// Number of sample frames in one render quantum.
///
/// The host audio graph delivers input in fixed-size blocks of this many
/// frames per channel. Processors never negotiate this value; it is part of
/// the graph configuration.
pub const RENDER_QUANTUM_FRAMES: usize = 128;

/// One input bus for a single processor invocation.
///
/// A bus holds zero or more channels of normalized f32 samples (nominal range
/// [-1.0, 1.0]), all of the same fixed quantum length. The bus is owned by the
/// rendering callback for the duration of one invocation and discarded
/// afterwards; nothing is retained between quanta.
#[derive(Debug, Clone, PartialEq)]
pub struct InputBus {
    channels: Vec<Vec<f32>>,
}

impl InputBus {
    /// Create a bus from per-channel sample vectors.
    ///
    /// Returns an error if the channels do not all have the same length.
    pub fn new(channels: Vec<Vec<f32>>) -> Result<Self> {
        if let Some(first) = channels.first() {
            let frames = first.len();
            if channels.iter().any(|c| c.len() != frames) {
                anyhow::bail!(
                    "All channels must have the same length (expected {})",
                    frames
                );
            }
        }
        Ok(Self { channels })
    }

    /// A bus with no channels, representing a silent/absent input.
    pub fn silent() -> Self {
        Self { channels: vec![] }
    }

    /// Convenience constructor for a single-channel bus.
    pub fn mono(samples: Vec<f32>) -> Self {
        Self {
            channels: vec![samples],
        }
    }

    /// Returns the samples of one channel, if present.
    pub fn channel(&self, idx: usize) -> Option<&[f32]> {
        self.channels.get(idx).map(Vec::as_slice)
    }

    /// Returns the number of channels on this bus.
    pub fn channels(&self) -> usize {
        self.channels.len()
    }

    /// Returns the number of sample frames per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_creation() {
        let bus = InputBus::new(vec![vec![0.0; 128], vec![0.0; 128]]).unwrap();
        assert_eq!(bus.channels(), 2);
        assert_eq!(bus.frames(), 128);
    }

    #[test]
    fn test_bus_rejects_ragged_channels() {
        let result = InputBus::new(vec![vec![0.0; 128], vec![0.0; 64]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_silent_bus_has_no_channels() {
        let bus = InputBus::silent();
        assert_eq!(bus.channels(), 0);
        assert_eq!(bus.frames(), 0);
        assert!(bus.channel(0).is_none());
    }

    #[test]
    fn test_channel_access() {
        let bus = InputBus::new(vec![vec![0.1, 0.2], vec![0.3, 0.4]]).unwrap();
        assert_eq!(bus.channel(0), Some(&[0.1, 0.2][..]));
        assert_eq!(bus.channel(1), Some(&[0.3, 0.4][..]));
        assert!(bus.channel(2).is_none());
    }
}
