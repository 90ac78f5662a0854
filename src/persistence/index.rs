use std::collections::HashMap;

use log::warn;

/// What to do when two rows of the same table share an `Id`.
///
/// [DuplicatePolicy::LastWins] keeps the later row in decode order in the index
/// while the row list still holds both. [DuplicatePolicy::Reject] refuses the
/// whole table instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    #[default]
    LastWins,
    Reject,
}

/// A simple index to find rows by their `Id` quickly.
///
/// Maps the key to the position of the row inside the ordered rows of the
/// table, so the rows themselves are stored only once.
#[derive(Debug, Default)]
pub(crate) struct Index {
    key_index_map: HashMap<i32, usize>,
}

impl Index {
    pub fn new() -> Index {
        let key_index_map = HashMap::new();
        Index { key_index_map }
    }

    pub fn build<R>(
        rows: &[R],
        key_of: fn(&R) -> i32,
        policy: DuplicatePolicy,
    ) -> Result<Index, i32> {
        //! Index `rows` in decode order with insert-or-overwrite semantics.
        //!
        //! Returns the first duplicated key as the error when the policy is
        //! [DuplicatePolicy::Reject].

        let mut index = Index {
            key_index_map: HashMap::with_capacity(rows.len()),
        };
        let mut n_duplicates = 0;

        for (position, row) in rows.iter().enumerate() {
            let key = key_of(row);
            if index.insert(key, position).is_some() {
                if policy == DuplicatePolicy::Reject {
                    return Err(key);
                }
                n_duplicates += 1;
            }
        }

        if n_duplicates > 0 {
            warn!(
                "{} duplicate id(s) found; later rows replaced earlier ones in the index",
                n_duplicates
            );
        }

        Ok(index)
    }

    pub fn insert(&mut self, key: i32, index: usize) -> Option<usize> {
        self.key_index_map.insert(key, index)
    }

    pub fn get(&self, key: i32) -> Option<usize> {
        self.key_index_map.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.key_index_map.len()
    }
}
