//! Name-to-factory registry for worklet processors.

use anyhow::Result;
use dashmap::DashMap;

use crate::worklet::processor::{AudioWorkletProcessor, WorkletOptions};

/// Factory producing a fresh processor instance for one node.
pub type ProcessorFactory =
    Box<dyn Fn(&WorkletOptions) -> Box<dyn AudioWorkletProcessor> + Send + Sync>;

/// Registry mapping fixed string identifiers to processor factories.
///
/// Mirrors the host audio-worklet registry: processors register under a name
/// once, and nodes are instantiated against that name. Registration of an
/// already-taken name is an error, as is instantiating an unknown one.
#[derive(Default)]
pub struct WorkletRegistry {
    factories: DashMap<String, ProcessorFactory>,
}

impl WorkletRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processor factory under `name`.
    pub fn register_processor(&self, name: &str, factory: ProcessorFactory) -> Result<()> {
        use dashmap::mapref::entry::Entry;

        match self.factories.entry(name.to_string()) {
            Entry::Occupied(_) => {
                anyhow::bail!("Processor '{}' is already registered", name)
            }
            Entry::Vacant(entry) => {
                entry.insert(factory);
                Ok(())
            }
        }
    }

    /// Instantiate a fresh processor registered under `name`.
    pub fn instantiate(
        &self,
        name: &str,
        options: &WorkletOptions,
    ) -> Result<Box<dyn AudioWorkletProcessor>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("No processor registered as '{}'", name))?;
        Ok((factory.value())(options))
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}
