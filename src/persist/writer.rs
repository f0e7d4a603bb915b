//! Survivor file writing.
//!
//! # Responsibilities
//! - Overwrite mode: replace the file with the ranked endpoints in one write
//! - Merge mode: write the ranked endpoints in fixed-size batches
//! - Streamed progress: append survivors in batches while probes are in flight
//! - Endpoints left unverified by a shutdown are written back after the
//!   survivors, in candidate order
//!
//! # Design Decisions
//! - On disk the format is one endpoint per line; latency is not stored
//! - Every write goes to a `.partial` file next to the target, renamed over
//!   it once complete; the target keeps its previous content until then
//! - Each batch is a separate write followed by a flush, so partial progress
//!   is visible in the `.partial` file while the run is going
//! - Only the persister touches the file; there is never a second writer

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::candidates::Endpoint;
use crate::config::{FilesConfig, PersistConfig, PersistMode};
use crate::error::{ProberError, ProberResult};
use crate::probe::ProbeOutcome;
use crate::ranking::RankedResult;
use crate::scheduler::OutcomeSink;

/// Sibling file that receives writes before replacing `target`.
pub fn staging_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".partial");
    target.with_file_name(name)
}

/// Writes ranked survivors to the output file.
#[derive(Debug, Clone)]
pub struct Persister {
    path: PathBuf,
    mode: PersistMode,
    batch_size: usize,
}

impl Persister {
    pub fn new(path: impl Into<PathBuf>, mode: PersistMode, batch_size: usize) -> Self {
        Self {
            path: path.into(),
            mode,
            batch_size: batch_size.max(1),
        }
    }

    pub fn from_config(files: &FilesConfig, persist: &PersistConfig) -> Self {
        Self::new(&files.output_path, persist.mode, persist.batch_size)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn staging_path(&self) -> PathBuf {
        staging_path(&self.path)
    }

    /// Previously accepted endpoints to re-verify this run (merge mode only).
    pub fn prior_results(&self) -> Option<&Path> {
        (self.mode == PersistMode::Merge).then_some(self.path.as_path())
    }

    /// Open a batch writer for survivors streamed during the run.
    ///
    /// Merge mode only. Writes land in the staging file; the target is left
    /// alone until [`Persister::persist`] replaces it.
    pub async fn progress_writer(&self) -> ProberResult<Option<BatchWriter>> {
        match self.mode {
            PersistMode::Overwrite => Ok(None),
            PersistMode::Merge => {
                let writer = BatchWriter::create(&self.staging_path(), self.batch_size).await?;
                Ok(Some(writer))
            }
        }
    }

    /// Write the final ranking followed by `unverified`, then swap the
    /// result in for the target.
    pub async fn persist(
        &self,
        ranked: &RankedResult,
        unverified: &[Endpoint],
    ) -> ProberResult<()> {
        let staging = self.staging_path();
        let lines = ranked.endpoints().chain(unverified);

        match self.mode {
            PersistMode::Overwrite => {
                let content: String = lines.map(|endpoint| format!("{}\n", endpoint)).collect();
                fs::write(&staging, content)
                    .await
                    .map_err(|e| ProberError::io(&staging, e))?;
            }
            PersistMode::Merge => {
                let mut writer = BatchWriter::create(&staging, self.batch_size).await?;
                for endpoint in lines {
                    writer.push(endpoint).await?;
                }
                writer.finish().await?;
            }
        }

        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| ProberError::io(&self.path, e))?;

        tracing::info!(
            path = %self.path.display(),
            mode = ?self.mode,
            survivors = ranked.len(),
            unverified = unverified.len(),
            "Ranked endpoints persisted"
        );
        Ok(())
    }
}

/// Appends endpoints to a file, one write per full batch.
#[derive(Debug)]
pub struct BatchWriter {
    path: PathBuf,
    file: File,
    batch_size: usize,
    buffer: String,
    buffered: usize,
    written: usize,
}

impl BatchWriter {
    /// Truncate `path` and start writing to it.
    pub async fn create(path: &Path, batch_size: usize) -> ProberResult<Self> {
        let file = File::create(path)
            .await
            .map_err(|e| ProberError::io(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            batch_size: batch_size.max(1),
            buffer: String::new(),
            buffered: 0,
            written: 0,
        })
    }

    pub async fn push(&mut self, endpoint: &Endpoint) -> ProberResult<()> {
        self.buffer.push_str(endpoint.as_str());
        self.buffer.push('\n');
        self.buffered += 1;

        if self.buffered >= self.batch_size {
            self.flush_batch().await?;
        }
        Ok(())
    }

    /// Write any partial batch and return the number of lines written.
    pub async fn finish(mut self) -> ProberResult<usize> {
        self.flush_batch().await?;
        Ok(self.written)
    }

    async fn flush_batch(&mut self) -> ProberResult<()> {
        if self.buffered == 0 {
            return Ok(());
        }

        self.file
            .write_all(self.buffer.as_bytes())
            .await
            .map_err(|e| ProberError::io(&self.path, e))?;
        self.file
            .flush()
            .await
            .map_err(|e| ProberError::io(&self.path, e))?;

        self.written += self.buffered;
        tracing::debug!(
            path = %self.path.display(),
            lines = self.buffered,
            total = self.written,
            "Batch written"
        );

        self.buffer.clear();
        self.buffered = 0;
        Ok(())
    }
}

impl OutcomeSink for BatchWriter {
    async fn accept(&mut self, outcome: &ProbeOutcome) -> ProberResult<()> {
        match outcome {
            ProbeOutcome::Success { endpoint, .. } => self.push(endpoint).await,
            ProbeOutcome::Failure { .. } => Ok(()),
        }
    }
}
