use super::decoder::RowDecoder;
use super::error::LoadError;
use super::index::{DuplicatePolicy, Index};
use super::row::KeyedRow;

use chrono::{DateTime, Local};
use log::{debug, info};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

/// One published state of a table: the ordered rows and the index built over
/// exactly those rows. A snapshot never changes once it is published.
struct Snapshot<R> {
    rows: Vec<R>,
    index: Index,
    generation: u64,
    loaded_at: Option<DateTime<Local>>,
    source: Option<PathBuf>,
}

impl<R> Snapshot<R> {
    fn empty() -> Snapshot<R> {
        Snapshot {
            rows: Vec::new(),
            index: Index::new(),
            generation: 0,
            loaded_at: None,
            source: None,
        }
    }
}

/// A read-only table of rows decoded from a single data file.
///
/// The table starts out empty. Every successful [`TableConfig::load`] builds a
/// fresh set of rows and its index off to the side and then swaps both in at
/// once, so a reader sees either the old table or the new one, never a mix of
/// the two. A failed load leaves the current contents untouched.
///
/// Lookups go through [`TableConfig::get_by_id`] or through a [`TableReader`]
/// obtained from [`TableConfig::get_all`].
pub struct TableConfig<R> {
    name: String,
    decoder: Box<dyn RowDecoder<R>>,
    key_of: fn(&R) -> i32,
    duplicate_policy: DuplicatePolicy,
    state: RwLock<Arc<Snapshot<R>>>,
}

/// A consistent, read-only view over the rows of a table.
///
/// The reader keeps the snapshot it was created from alive, so reloading the
/// table does not change what an existing reader returns. Iteration always
/// goes in decode order and can be restarted as often as needed.
pub struct TableReader<R> {
    snapshot: Arc<Snapshot<R>>,
}

/// A load running on its own worker thread.
pub struct LoadTask {
    table: String,
    handle: JoinHandle<Result<usize, LoadError>>,
}

impl<R: KeyedRow> TableConfig<R> {
    pub fn new(name: impl Into<String>, decoder: impl RowDecoder<R> + 'static) -> TableConfig<R> {
        //! Create an empty table keyed by [`KeyedRow::id`].

        Self::with_key(name, decoder, R::id)
    }
}

impl<R> TableConfig<R> {
    pub fn with_key(
        name: impl Into<String>,
        decoder: impl RowDecoder<R> + 'static,
        key_of: fn(&R) -> i32,
    ) -> TableConfig<R> {
        //! Create an empty table whose rows are keyed by `key_of`.
        //!
        //! Useful for row types that do not implement [`KeyedRow`].

        TableConfig {
            name: name.into(),
            decoder: Box::new(decoder),
            key_of,
            duplicate_policy: DuplicatePolicy::default(),
            state: RwLock::new(Arc::new(Snapshot::empty())),
        }
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> TableConfig<R> {
        self.duplicate_policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        //! Read the data file at `path`, decode it and replace the contents of
        //! the table with the decoded rows.
        //!
        //! Returns the number of rows loaded. Reloading the same file gives the
        //! same observable table again.
        //!
        //! # Errors
        //! - [`LoadError::ResourceNotFound`] when the file cannot be opened or read.
        //! - [`LoadError::Decode`] when the decoder rejects the bytes.
        //! - [`LoadError::DuplicateId`] when ids repeat under [`DuplicatePolicy::Reject`].
        //!
        //! In all three cases the table keeps what it had before the call.

        let path = path.as_ref();
        debug!("loading table '{}' from {}", self.name, path.display());

        let bytes = std::fs::read(path).map_err(|source| LoadError::ResourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let rows = self
            .decoder
            .decode(&bytes)
            .map_err(|source| LoadError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        let index = Index::build(&rows, self.key_of, self.duplicate_policy).map_err(|id| {
            LoadError::DuplicateId {
                table: self.name.clone(),
                id,
            }
        })?;

        let n_rows = rows.len();
        let generation = self.publish(rows, index, path);

        info!(
            "table '{}' loaded: {} row(s) from {} (generation {})",
            self.name,
            n_rows,
            path.display(),
            generation
        );

        Ok(n_rows)
    }

    fn publish(&self, rows: Vec<R>, index: Index, path: &Path) -> u64 {
        //! Swap in the new rows and index under the write lock.
        //!
        //! The snapshot behind the lock is immutable, so a poisoned lock still
        //! holds a consistent table and is safe to keep using.

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let generation = state.generation + 1;

        *state = Arc::new(Snapshot {
            rows,
            index,
            generation,
            loaded_at: Some(Local::now()),
            source: Some(path.to_path_buf()),
        });

        generation
    }

    fn snapshot(&self) -> Arc<Snapshot<R>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&state)
    }

    pub fn get_all(&self) -> TableReader<R> {
        //! Get a reader over all rows of the table, in decode order.

        TableReader {
            snapshot: self.snapshot(),
        }
    }

    pub fn get_by_id(&self, id: i32) -> Option<R>
    where
        R: Clone,
    {
        //! Find the row with the given `id`.
        //!
        //! Returns [`None`] if no such row was loaded. Use a [`TableReader`] to
        //! look up several rows without cloning them.

        self.get_all().get_by_id(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().generation > 0
    }
}

impl<R> TableConfig<R>
where
    R: Send + Sync + 'static,
{
    pub fn load_in_background(self: &Arc<Self>, path: impl Into<PathBuf>) -> LoadTask {
        //! Run [`TableConfig::load`] on a worker thread so the caller is not
        //! blocked by the file read and the decoding.
        //!
        //! The table is only ready once [`LoadTask::wait`] returns [`Ok`].

        let table = Arc::clone(self);
        let path = path.into();

        LoadTask {
            table: self.name.clone(),
            handle: thread::spawn(move || table.load(path)),
        }
    }
}

impl LoadTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn wait(self) -> Result<usize, LoadError> {
        //! Block until the load finishes and hand back its result.
        //!
        //! A worker that panicked is reported as [`LoadError::Interrupted`];
        //! the table then still holds its previous contents.

        self.handle
            .join()
            .unwrap_or_else(|_| Err(LoadError::Interrupted(self.table)))
    }
}

impl<R> TableReader<R> {
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.snapshot.rows.iter()
    }

    pub fn get_by_id(&self, id: i32) -> Option<&R> {
        let position = self.snapshot.index.get(id)?;
        self.snapshot.rows.get(position)
    }

    pub fn len(&self) -> usize {
        self.snapshot.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.rows.is_empty()
    }

    /// Number of distinct ids; smaller than [`TableReader::len`] when ids repeat.
    pub fn key_count(&self) -> usize {
        self.snapshot.index.len()
    }

    pub fn scan(&self) -> Vec<R>
    where
        R: Clone,
    {
        //! Returns an owned copy of all the rows of the table.

        self.snapshot.rows.clone()
    }

    /// Number of successful loads behind this view; `0` for a never loaded table.
    pub fn generation(&self) -> u64 {
        self.snapshot.generation
    }

    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.snapshot.loaded_at
    }

    pub fn source(&self) -> Option<&Path> {
        self.snapshot.source.as_deref()
    }
}

impl<R> Clone for TableReader<R> {
    fn clone(&self) -> Self {
        TableReader {
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}

impl<'a, R> IntoIterator for &'a TableReader<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R> Display for TableConfig<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        match &snapshot.source {
            Some(source) => write!(
                f,
                "{} ({} rows, generation {}, from {})",
                self.name,
                snapshot.rows.len(),
                snapshot.generation,
                source.display()
            ),
            None => write!(f, "{} (not loaded)", self.name),
        }
    }
}
