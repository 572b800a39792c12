use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::Result;
use crate::record::Record;

/// Append-only store of one record type.
///
/// # Design
/// - **Append-only**: records are never rewritten or removed
/// - **Stateless**: implementations open their backing storage per call
/// - **Lenient reads**: an unreadable record is skipped, never fatal
///
/// Query services hold it as `Arc<dyn RecordRepo<T>>`, so the flat-file
/// store and [`MemoryRepo`] are interchangeable.
#[async_trait]
pub trait RecordRepo<T: Record>: Send + Sync {
    /// Persist `record` after every record already stored.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the backing storage cannot be
    /// created, opened or written.
    async fn append(&self, record: &T) -> Result<()>;

    /// Every readable record in insertion order. An absent store is empty.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the storage exists but cannot be read.
    async fn load_all(&self) -> Result<Vec<T>>;

    /// Number of stored lines, readable or not.
    ///
    /// # Errors
    /// Same as [`RecordRepo::load_all`].
    async fn count(&self) -> Result<usize>;
}

/// In-process store, handy for tests and for wiring without a disk.
#[derive(Debug, Default)]
pub struct MemoryRepo<T> {
    records: Mutex<Vec<T>>,
}

impl<T> MemoryRepo<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub const fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl<T: Record> RecordRepo<T> for MemoryRepo<T> {
    async fn append(&self, record: &T) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<T>> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Credential;

    #[tokio::test]
    async fn memory_repo_appends_in_order() {
        let repo: MemoryRepo<Credential> = MemoryRepo::new();
        for name in ["amy", "bob"] {
            repo.append(&Credential {
                username: name.to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        }

        let users = repo.load_all().await.unwrap();
        assert_eq!(users[0].username, "amy");
        assert_eq!(users[1].username, "bob");
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
