//! Ordered-map table implementations.
//!
//! `MemTable` is a plain primary-key map. `RankedMemTable` additionally
//! maintains the secondary index as a `BTreeSet<(rank, primary)>`; every
//! mutation keeps the two structures in lockstep.

use std::collections::{BTreeMap, BTreeSet};

use quorum_store::{Ranked, RankedTable, Row, SequencedTable, StoreError, Table};

/// Primary-key-only table.
#[derive(Clone, Debug)]
pub struct MemTable<R: Row> {
    rows: BTreeMap<R::Key, R>,
}

impl<R: Row> MemTable<R> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<R: Row> Default for MemTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Row> Table<R> for MemTable<R> {
    fn find(&self, key: R::Key) -> Result<Option<R>, StoreError> {
        Ok(self.rows.get(&key).cloned())
    }

    fn insert(&mut self, row: R) -> Result<(), StoreError> {
        let key = row.primary_key();
        if self.rows.contains_key(&key) {
            return Err(StoreError::Duplicate(format!("{key:?}")));
        }
        self.rows.insert(key, row);
        Ok(())
    }

    fn update(&mut self, row: R) -> Result<(), StoreError> {
        let key = row.primary_key();
        if !self.rows.contains_key(&key) {
            return Err(StoreError::NotFound(format!("{key:?}")));
        }
        self.rows.insert(key, row);
        Ok(())
    }

    fn remove(&mut self, key: R::Key) -> Result<(), StoreError> {
        self.rows
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("{key:?}")))
    }

    fn iter_rows(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.rows.values().cloned().collect())
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Table with an ordered `(rank, primary)` secondary index.
#[derive(Clone, Debug)]
pub struct RankedMemTable<R: Ranked> {
    rows: BTreeMap<R::Key, R>,
    index: BTreeSet<(R::Rank, R::Key)>,
    seq: u64,
}

impl<R: Ranked> RankedMemTable<R> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            index: BTreeSet::new(),
            seq: 0,
        }
    }
}

impl<R: Ranked> Default for RankedMemTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Ranked> Table<R> for RankedMemTable<R> {
    fn find(&self, key: R::Key) -> Result<Option<R>, StoreError> {
        Ok(self.rows.get(&key).cloned())
    }

    fn insert(&mut self, row: R) -> Result<(), StoreError> {
        let key = row.primary_key();
        if self.rows.contains_key(&key) {
            return Err(StoreError::Duplicate(format!("{key:?}")));
        }
        self.index.insert((row.rank(), key));
        self.rows.insert(key, row);
        Ok(())
    }

    fn update(&mut self, row: R) -> Result<(), StoreError> {
        let key = row.primary_key();
        let old = self
            .rows
            .get(&key)
            .ok_or_else(|| StoreError::NotFound(format!("{key:?}")))?;
        self.index.remove(&(old.rank(), key));
        self.index.insert((row.rank(), key));
        self.rows.insert(key, row);
        Ok(())
    }

    fn remove(&mut self, key: R::Key) -> Result<(), StoreError> {
        let old = self
            .rows
            .remove(&key)
            .ok_or_else(|| StoreError::NotFound(format!("{key:?}")))?;
        self.index.remove(&(old.rank(), key));
        Ok(())
    }

    fn iter_rows(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.rows.values().cloned().collect())
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

impl<R: Ranked> RankedTable<R> for RankedMemTable<R> {
    fn keys_by_rank(&self) -> Result<Vec<R::Key>, StoreError> {
        Ok(self.index.iter().map(|&(_, key)| key).collect())
    }

    fn keys_by_rank_rev(&self) -> Result<Vec<R::Key>, StoreError> {
        Ok(self.index.iter().rev().map(|&(_, key)| key).collect())
    }
}

impl<R> SequencedTable<R> for RankedMemTable<R>
where
    R: Ranked + Row<Key = u64>,
{
    fn next_id(&mut self) -> u64 {
        // Stay past any key already in the table, even one inserted
        // without going through the sequence.
        let floor = self.rows.keys().next_back().map_or(0, |k| k + 1);
        let id = self.seq.max(floor);
        self.seq = id + 1;
        id
    }
}
