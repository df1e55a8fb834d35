use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use pcm_worklet::audio::{RENDER_QUANTUM_FRAMES, calculate_rms_level};
use pcm_worklet::capture::CaptureHandler;
use pcm_worklet::worklet::{PCM_PROCESSOR_NAME, PcmConverter, WorkletNode, WorkletOptions, WorkletRegistry};

/// Capacity of the capture -> worklet quantum ring, in quanta.
const QUANTUM_RING_CAPACITY: usize = 64;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    info!("Starting PCM worklet demo...");

    let registry = WorkletRegistry::new();
    PcmConverter::register(&registry)?;

    let (producer, consumer) = rtrb::RingBuffer::new(QUANTUM_RING_CAPACITY);

    let (_capture, channels) = CaptureHandler::start(producer, RENDER_QUANTUM_FRAMES)?;

    let options = WorkletOptions {
        quantum_frames: RENDER_QUANTUM_FRAMES,
        channels,
    };
    let node = WorkletNode::spawn(&registry, PCM_PROCESSOR_NAME, &options, consumer)?;

    // Main-thread consumer: drain PCM buffers and report level once a second.
    let mut buffers: u64 = 0;
    let mut window: Vec<i16> = Vec::new();
    let mut last_report = std::time::Instant::now();

    loop {
        match node.messages().recv_timeout(Duration::from_millis(200)) {
            Ok(mut buffer) => {
                buffers += 1;
                window.extend_from_slice(&buffer.detach());
            }
            Err(crossbeam::channel::RecvTimeoutError::Timeout) => {
                if !node.is_active() {
                    info!("Worklet node stopped, exiting");
                    return Ok(());
                }
            }
            Err(crossbeam::channel::RecvTimeoutError::Disconnected) => {
                info!("Message port closed, exiting");
                return Ok(());
            }
        }

        if last_report.elapsed() >= Duration::from_secs(1) {
            let level = calculate_rms_level(&window);
            info!("Received {} PCM buffers, level {}%", buffers, level);
            window.clear();
            last_report = std::time::Instant::now();
        }
    }
}
