//! Host-side node handle that drives a registered processor.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam::channel::Receiver;
use rtrb::Consumer;
use tracing::{debug, info};

use crate::audio::InputBus;
use crate::worklet::port::{MessagePort, PcmBuffer};
use crate::worklet::processor::WorkletOptions;
use crate::worklet::registry::WorkletRegistry;

/// How long the rendering loop sleeps when the quantum ring is empty.
const IDLE_POLL: Duration = Duration::from_micros(500);

/// A node instantiated against a registered processor.
///
/// Owns the rendering thread that pulls quanta from the capture ring and
/// invokes the processor once per quantum, and the receiving end of the
/// processor's message port. The node stops when the quantum producer is
/// dropped, when the processor returns a `false` keep-alive flag, or when
/// the handle itself is dropped.
pub struct WorkletNode {
    messages: Receiver<PcmBuffer>,
    active: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl WorkletNode {
    /// Instantiate `name` from the registry and start rendering from `quanta`.
    pub fn spawn(
        registry: &WorkletRegistry,
        name: &str,
        options: &WorkletOptions,
        mut quanta: Consumer<InputBus>,
    ) -> Result<Self> {
        let mut processor = registry
            .instantiate(name, options)
            .with_context(|| format!("Failed to instantiate worklet node '{}'", name))?;

        let (port, messages) = MessagePort::channel();
        let active = Arc::new(AtomicBool::new(true));
        let thread_active = active.clone();
        let thread_name = name.to_string();

        let handle = thread::Builder::new()
            .name(format!("worklet-{}", name))
            .spawn(move || {
                debug!("Worklet node '{}' rendering thread started", thread_name);
                while thread_active.load(Ordering::Relaxed) {
                    match quanta.pop() {
                        Ok(bus) => {
                            let inputs = [bus];
                            if !processor.process(&inputs, &port) {
                                debug!("Processor '{}' requested stop", thread_name);
                                break;
                            }
                        }
                        Err(_) => {
                            // Producer gone and ring drained: implicit teardown.
                            if quanta.is_abandoned() {
                                break;
                            }
                            thread::sleep(IDLE_POLL);
                        }
                    }
                }
                debug!("Worklet node '{}' rendering thread exited", thread_name);
            })
            .context("Failed to spawn worklet rendering thread")?;

        info!("Worklet node '{}' started", name);

        Ok(Self {
            messages,
            active,
            handle: Some(handle),
        })
    }

    /// The main-thread end of the processor's message port.
    pub fn messages(&self) -> &Receiver<PcmBuffer> {
        &self.messages
    }

    /// Whether the rendering thread is still running.
    pub fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for WorkletNode {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
