//! Microphone capture feeding the worklet's quantum ring.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use dasp_sample::{FromSample, Sample as DaspSample};
use rtrb::Producer;
use tracing::{error, info, warn};

use crate::audio::InputBus;

/// Dropped-quantum warnings are emitted at most once per this many drops.
const DROP_WARN_INTERVAL: u64 = 256;

pub struct CaptureHandler {
    _stream: Stream,
}

impl CaptureHandler {
    /// Start capturing from the default input device.
    ///
    /// Device samples are normalized to f32, deinterleaved, and sliced into
    /// `quantum_frames`-sized buses pushed onto `quanta`. Returns the running
    /// stream handle together with the channel count the stream delivers.
    pub fn start(
        quanta: Producer<InputBus>,
        quantum_frames: usize,
    ) -> Result<(Self, usize)> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .context("No input device available")?;

        info!(
            "Using input device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let config = device
            .default_input_config()
            .context("Failed to get default input config")?;

        info!("Input config: {:?}", config);

        // Limit to stereo; the worklet only reads channel 0 anyway.
        let stream_config = StreamConfig {
            channels: config.channels().min(2),
            sample_rate: config.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        let channels = stream_config.channels as usize;

        let stream = match config.sample_format() {
            SampleFormat::I16 => {
                Self::build_input_stream::<i16>(&device, &stream_config, quanta, quantum_frames)?
            }
            SampleFormat::U16 => {
                Self::build_input_stream::<u16>(&device, &stream_config, quanta, quantum_frames)?
            }
            SampleFormat::F32 => {
                Self::build_input_stream::<f32>(&device, &stream_config, quanta, quantum_frames)?
            }
            format => {
                anyhow::bail!("Unsupported sample format: {:?}", format);
            }
        };

        stream.play().context("Failed to play stream")?;

        info!("Audio capture started");

        Ok((Self { _stream: stream }, channels))
    }

    fn build_input_stream<T>(
        device: &Device,
        config: &StreamConfig,
        mut quanta: Producer<InputBus>,
        quantum_frames: usize,
    ) -> Result<Stream>
    where
        T: cpal::SizedSample,
        f32: FromSample<T>,
    {
        let channels = config.channels as usize;
        let quantum_samples = quantum_frames * channels;

        // Interleaved carry-over between callbacks; callback sizes are not
        // aligned to the render quantum.
        let mut carry: Vec<f32> = Vec::with_capacity(quantum_samples * 2);
        let mut dropped: u64 = 0;

        let stream = device
            .build_input_stream(
                config,
                move |data: &[T], _: &cpal::InputCallbackInfo| {
                    carry.extend(data.iter().map(|&s| s.to_sample::<f32>()));

                    while carry.len() >= quantum_samples {
                        let interleaved: Vec<f32> = carry.drain(..quantum_samples).collect();

                        let mut bus_channels = vec![Vec::with_capacity(quantum_frames); channels];
                        for (i, sample) in interleaved.into_iter().enumerate() {
                            bus_channels[i % channels].push(sample);
                        }

                        // Channels are equal-length by construction.
                        let bus = InputBus::new(bus_channels).unwrap();
                        if quanta.push(bus).is_err() {
                            dropped += 1;
                            if dropped % DROP_WARN_INTERVAL == 1 {
                                warn!("Quantum ring full, dropped {} quanta so far", dropped);
                            }
                        }
                    }
                },
                move |err| {
                    error!("Audio capture error: {}", err);
                },
                None,
            )
            .context("Failed to build input stream")?;

        Ok(stream)
    }
}
