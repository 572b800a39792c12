use std::io::{ErrorKind, SeekFrom};
use std::marker::PhantomData;
use std::path::PathBuf;

use async_trait::async_trait;
use hms_core::record::{decode_all, line_count};
use hms_core::{Error, Record, RecordRepo, Result};
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::{debug, info};

/// A [`RecordRepo`] over one pipe-delimited text file.
///
/// The file is opened and closed inside every call.
#[derive(Debug)]
pub struct FlatFileRepo<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> FlatFileRepo<T> {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    /// Raw file contents, or `None` when the file does not exist. Lines are
    /// decoded one at a time so a bad byte only costs its own line.
    async fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet", self.path.display());
                Ok(None)
            }
            Err(e) => Err(Error::io(&self.path, e)),
        }
    }
}

#[async_trait]
impl<T: Record> RecordRepo<T> for FlatFileRepo<T> {
    async fn append(&self, record: &T) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| Error::io(&self.path, e))?;

        let mut line = record.to_line();
        if !ends_with_newline(&mut file)
            .await
            .map_err(|e| Error::io(&self.path, e))?
        {
            // Keep one record per line.
            debug!("{} lacks a final newline", self.path.display());
            line.insert(0, '\n');
        }

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| Error::io(&self.path, e))?;
        file.flush().await.map_err(|e| Error::io(&self.path, e))?;

        info!("Appended {} record to {}", T::KIND, self.path.display());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<T>> {
        let Some(content) = self.read().await? else {
            return Ok(Vec::new());
        };
        Ok(decode_all(&content, &self.path.display().to_string()))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self
            .read()
            .await?
            .map_or(0, |content| line_count(&content)))
    }
}

/// True when `file` is empty or its last byte is `\n`.
async fn ends_with_newline(file: &mut fs::File) -> std::io::Result<bool> {
    if file.metadata().await?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1)).await?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last).await?;
    Ok(last[0] == b'\n')
}
