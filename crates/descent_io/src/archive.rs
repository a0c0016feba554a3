use crate::error::Result;
use crate::lineage::{save_lineage, SavedLineage};
use descent_core::config::LineageConfig;
use descent_core::mrca::try_mrca;
use descent_core::{Lineage, World};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Periodically writes the MRCA lineage to `<dir>/lod-<tick>.jsonl[.gz]`.
#[derive(Debug, Clone)]
pub struct LineageArchiver {
    dir: PathBuf,
    interval: u64,
    compress: bool,
    fingerprint: Option<String>,
    written: u64,
}

impl LineageArchiver {
    /// An `interval` of 0 disables periodic archiving.
    pub fn new(dir: impl Into<PathBuf>, interval: u64, compress: bool) -> Self {
        Self {
            dir: dir.into(),
            interval,
            compress,
            fingerprint: None,
            written: 0,
        }
    }

    pub fn from_config(config: &LineageConfig) -> Self {
        Self::new(&config.archive_dir, config.archive_interval, config.compress)
    }

    /// Records `fingerprint` in the header of every archive.
    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of archives written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn is_due(&self, tick: u64) -> bool {
        self.interval > 0 && tick > 0 && tick % self.interval == 0
    }

    pub fn path_for(&self, tick: u64) -> PathBuf {
        let ext = if self.compress { "jsonl.gz" } else { "jsonl" };
        self.dir.join(format!("lod-{}.{}", tick, ext))
    }

    /// Archives the MRCA lineage when the world's tick is due.
    pub fn maybe_archive<R>(&mut self, world: &World<R>) -> Result<Option<PathBuf>>
    where
        R: Clone + Serialize,
    {
        if !self.is_due(world.tick()) {
            return Ok(None);
        }
        self.archive(world)
    }

    /// Writes the current MRCA lineage now.
    ///
    /// Returns `None` without writing when the population is empty or has
    /// no common ancestor.
    pub fn archive<R>(&mut self, world: &World<R>) -> Result<Option<PathBuf>>
    where
        R: Clone + Serialize,
    {
        let tick = world.tick();
        if world.population().is_empty() {
            tracing::warn!(tick, "Population extinct, no lineage to archive");
            return Ok(None);
        }
        let Some(m) = try_mrca(world)? else {
            tracing::debug!(tick, "No common ancestor yet, archive skipped");
            return Ok(None);
        };

        let lineage = Lineage::of(world.ancestry(), m)?;
        let saved = SavedLineage::capture(world.ancestry(), &lineage, tick, self.fingerprint.clone())?;

        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(tick);
        save_lineage(&path, &saved).map_err(|e| e.with_context(format!("archiving {}", path.display())))?;
        self.written += 1;

        tracing::info!(tick, lineage = saved.len(), path = %path.display(), "Lineage archived");
        Ok(Some(path))
    }
}
