use crate::schema::SqlResponse;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone)]
enum Entry {
    Cleared,
    ColumnNames(Rc<SqlResponse>),
}

/// Last `COLUMN_NAMES` response seen on each connection, used to label the
/// `COLUMN_VALUES` rows that follow it.
///
/// Entries are never evicted: a capture only holds a handful of connections.
#[derive(Debug, Default)]
pub struct HeaderCache {
    entries: HashMap<i64, Entry>,
}

impl HeaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the column names of `id`, typically because a new statement started.
    pub fn clear(&mut self, id: i64) {
        debug!("[{}] clearing cached column names", id);
        self.entries.insert(id, Entry::Cleared);
    }

    pub fn set(&mut self, id: i64, names: Rc<SqlResponse>) {
        debug!("[{}] caching {} column names", id, names.value.len());
        self.entries.insert(id, Entry::ColumnNames(names));
    }

    /// The cached column names for `id`, or `None` if never set or cleared since.
    pub fn get(&self, id: i64) -> Option<&Rc<SqlResponse>> {
        match self.entries.get(&id)? {
            Entry::ColumnNames(names) => Some(names),
            Entry::Cleared => None,
        }
    }

    /// Number of connections the cache has seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
