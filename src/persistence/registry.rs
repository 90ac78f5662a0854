use std::{
    path::{Path, PathBuf},
    sync::Arc,
    thread,
};

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

use crate::settings::LoaderSettings;

use super::{
    error::{LoadError, RegistryError},
    table::{LoadTask, TableConfig},
};

/// The part of a [`TableConfig`] that does not depend on its row type.
///
/// Lets tables of different schemas sit side by side in a [`ConfigRegistry`]
/// and be loaded or inspected without knowing their rows. Rows come out as
/// JSON values; a row that cannot be represented fails the whole call.
pub trait ConfigTable: Send + Sync {
    fn name(&self) -> &str;

    fn load(&self, path: &Path) -> Result<usize, LoadError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn row_json(&self, id: i32) -> Result<Option<serde_json::Value>, serde_json::Error>;

    fn rows_json(&self) -> Result<Vec<serde_json::Value>, serde_json::Error>;
}

impl<R> ConfigTable for TableConfig<R>
where
    R: Serialize + Send + Sync,
{
    fn name(&self) -> &str {
        TableConfig::name(self)
    }

    fn load(&self, path: &Path) -> Result<usize, LoadError> {
        TableConfig::load(self, path)
    }

    fn len(&self) -> usize {
        TableConfig::len(self)
    }

    fn row_json(&self, id: i32) -> Result<Option<serde_json::Value>, serde_json::Error> {
        let reader = self.get_all();
        reader.get_by_id(id).map(serde_json::to_value).transpose()
    }

    fn rows_json(&self) -> Result<Vec<serde_json::Value>, serde_json::Error> {
        self.get_all().iter().map(serde_json::to_value).collect()
    }
}

/// A single place to hold every config table of the application.
///
/// The registry knows where each table's data file lives (see
/// [`ConfigRegistry::path_for`]) and can (re)load all of them in one go.
///
/// It is based on an [`IndexMap`], so tables and load reports always come out
/// in registration order.
pub struct ConfigRegistry {
    settings: LoaderSettings,
    registry: IndexMap<String, Arc<dyn ConfigTable>>,
}

impl ConfigRegistry {
    pub fn new(settings: LoaderSettings) -> ConfigRegistry {
        ConfigRegistry {
            settings,
            registry: IndexMap::new(),
        }
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    pub fn register(&mut self, table: Arc<dyn ConfigTable>) -> Result<(), RegistryError> {
        //! Add a table under its own name.
        //!
        //! Fails if another table already uses that name.

        let name = table.name().to_string();
        if self.registry.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }

        self.registry.insert(name, table);
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn ConfigTable>> {
        self.registry.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ConfigTable>> {
        self.registry.get(name).map(Arc::clone)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.registry.keys().cloned().collect()
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        //! The data file of table `name`: `<data_dir>/<name>.<extension>`.

        self.settings
            .data_dir
            .join(format!("{}.{}", name, self.settings.extension))
    }

    pub fn load(&self, name: &str) -> Result<usize, RegistryError> {
        //! Load a single registered table from its data file.

        let table = self
            .registry
            .get(name)
            .ok_or_else(|| RegistryError::UnknownTable(name.to_string()))?;

        Ok(table.load(&self.path_for(name))?)
    }

    pub fn load_all(&self) -> IndexMap<String, Result<usize, LoadError>> {
        //! Load every registered table, each on its own scoped thread.
        //!
        //! Returns one result per table in registration order. A table that
        //! fails does not stop the others and keeps its previous contents.

        let report: IndexMap<String, Result<usize, LoadError>> = thread::scope(|scope| {
            let workers: Vec<_> = self
                .registry
                .iter()
                .map(|(name, table)| {
                    let path = self.path_for(name);
                    debug!("scheduling load of '{}' from {}", name, path.display());
                    (name, scope.spawn(move || table.load(&path)))
                })
                .collect();

            workers
                .into_iter()
                .map(|(name, worker)| {
                    let result = worker
                        .join()
                        .unwrap_or_else(|_| Err(LoadError::Interrupted(name.clone())));
                    (name.clone(), result)
                })
                .collect()
        });

        for (name, result) in report.iter() {
            if let Err(error) = result {
                warn!("table '{}' failed to load: {}", name, error);
            }
        }

        report
    }
}

impl<R> TableConfig<R>
where
    R: Send + Sync + 'static,
{
    pub fn load_from_registry(self: &Arc<Self>, registry: &ConfigRegistry) -> LoadTask {
        //! Load this table in the background from the data file the registry
        //! assigns to it.

        self.load_in_background(registry.path_for(self.name()))
    }
}
