//! The concrete tables of the application.
//!
//! Each schema gets its own module with the protobuf row and collection
//! messages and a constructor for its
//! [`crate::persistence::TableConfig`]. The tags of the message
//! fields follow the column order of the source sheet, starting at 1.
//!
//! To add a table, add a module here and a field to [`Tables`].

use std::sync::Arc;

use crate::{
    persistence::{ConfigRegistry, RegistryError},
    settings::LoaderSettings,
};

mod sample;
mod sample1;

pub use sample::{Sample, SampleConfig, SampleRow, sample_config};
pub use sample1::{Sample1, Sample1Config, Sample1Row, sample1_config};

/// Typed handles to every table.
///
/// A host keeps one [`Tables`] for the whole process and hands out clones of
/// the [`Arc`]s. [`Tables::registry`] puts the same instances in a
/// [`ConfigRegistry`] for bulk loading, so loading through the registry fills
/// the typed handles too.
#[derive(Clone)]
pub struct Tables {
    pub sample: Arc<SampleConfig>,
    pub sample1: Arc<Sample1Config>,
}

impl Tables {
    pub fn new(settings: &LoaderSettings) -> Tables {
        //! Create every table, empty, with the duplicate policy of `settings`.

        Tables {
            sample: Arc::new(sample_config().duplicate_policy(settings.duplicate_policy)),
            sample1: Arc::new(sample1_config().duplicate_policy(settings.duplicate_policy)),
        }
    }

    pub fn registry(&self, settings: LoaderSettings) -> Result<ConfigRegistry, RegistryError> {
        let mut registry = ConfigRegistry::new(settings);
        registry.register(self.sample.clone())?;
        registry.register(self.sample1.clone())?;
        Ok(registry)
    }
}

impl Default for Tables {
    fn default() -> Self {
        Tables::new(&LoaderSettings::default())
    }
}
