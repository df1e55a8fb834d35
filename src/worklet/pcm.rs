//! Float-to-PCM conversion processor.

use anyhow::Result;

use crate::audio::{InputBus, PcmSample};
use crate::worklet::port::{MessagePort, PcmBuffer};
use crate::worklet::processor::{AudioWorkletProcessor, WorkletOptions};
use crate::worklet::registry::WorkletRegistry;

/// Fixed identifier the converter registers under.
pub const PCM_PROCESSOR_NAME: &str = "pcm-processor";

/// Converts the first input channel to 16-bit PCM and posts each quantum to
/// the main thread.
///
/// The transform is stateless: one buffer out per non-empty quantum in, with
/// no data carried across invocations. Multi-channel input is not downmixed;
/// only channel 0 of bus 0 is read. Each output sample is the input sample
/// clamped into [-1.0, 1.0], scaled by `i16::MAX`, and truncated toward zero,
/// so -1.0 maps to -32767 and the output never contains `i16::MIN`.
pub struct PcmConverter;

impl PcmConverter {
    pub fn new(_options: &WorkletOptions) -> Self {
        Self
    }

    /// Register the converter's factory under [`PCM_PROCESSOR_NAME`].
    pub fn register(registry: &WorkletRegistry) -> Result<()> {
        registry.register_processor(
            PCM_PROCESSOR_NAME,
            Box::new(|options| Box::new(Self::new(options))),
        )
    }
}

impl AudioWorkletProcessor for PcmConverter {
    fn process(&mut self, inputs: &[InputBus], port: &MessagePort) -> bool {
        // No bus or no first channel: silent quantum, nothing is emitted.
        let Some(channel) = inputs.first().and_then(|bus| bus.channel(0)) else {
            return true;
        };
        if channel.is_empty() {
            return true;
        }

        let samples: Vec<i16> = channel.iter().map(|&s| i16::from_f32_clamped(s)).collect();

        // The post moves the buffer out; this thread keeps no reference.
        port.post(PcmBuffer::new(samples));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::Receiver;
    use std::io::Cursor;

    fn convert(inputs: &[InputBus]) -> (bool, Receiver<PcmBuffer>) {
        let mut converter = PcmConverter::new(&WorkletOptions::default());
        let (port, rx) = MessagePort::channel();
        let alive = converter.process(inputs, &port);
        (alive, rx)
    }

    #[test]
    fn test_output_length_matches_input() {
        for n in [1usize, 64, 128, 257] {
            let (alive, rx) = convert(&[InputBus::mono(vec![0.25; n])]);
            assert!(alive);
            assert_eq!(rx.recv().unwrap().len(), n);
        }
    }

    #[test]
    fn test_reference_vector() {
        let (_, rx) = convert(&[InputBus::mono(vec![0.0, 0.5, -0.5, 1.0, -1.0])]);
        let buffer = rx.recv().unwrap();
        assert_eq!(buffer.samples(), &[0, 16383, -16383, 32767, -32767]);
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        let (_, rx) = convert(&[InputBus::mono(vec![1.5, -1.5, 100.0, -100.0])]);
        let buffer = rx.recv().unwrap();
        assert_eq!(buffer.samples(), &[32767, -32767, 32767, -32767]);
    }

    #[test]
    fn test_missing_input_emits_nothing() {
        let (alive, rx) = convert(&[]);
        assert!(alive);
        assert!(rx.try_recv().is_err());

        let (alive, rx) = convert(&[InputBus::silent()]);
        assert!(alive);
        assert!(rx.try_recv().is_err());

        let (alive, rx) = convert(&[InputBus::mono(vec![])]);
        assert!(alive);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_only_first_channel_is_converted() {
        let bus = InputBus::new(vec![vec![0.5, 0.5], vec![-1.0, -1.0]]).unwrap();
        let (_, rx) = convert(&[bus]);
        assert_eq!(rx.recv().unwrap().samples(), &[16383, 16383]);
    }

    #[test]
    fn test_one_message_per_quantum() {
        let mut converter = PcmConverter::new(&WorkletOptions::default());
        let (port, rx) = MessagePort::channel();
        for _ in 0..5 {
            assert!(converter.process(&[InputBus::mono(vec![0.1; 128])], &port));
        }
        assert_eq!(rx.try_iter().count(), 5);
    }

    #[test]
    fn test_converted_pcm_survives_wav_round_trip() {
        let (_, rx) = convert(&[InputBus::mono(vec![0.0, 0.5, -0.5, 1.0, -1.0])]);
        let mut buffer = rx.recv().unwrap();
        let samples = buffer.detach();

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples.iter() {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        cursor.set_position(0);
        let mut reader = hound::WavReader::new(cursor).unwrap();
        let decoded: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(&decoded[..], &samples[..]);
    }
}
