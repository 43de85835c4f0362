use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use futures::StreamExt;
use tracing::info;

use crate::corpus::allow_list::load_allow_list;
use crate::corpus::naming::canonical_filename;
use crate::corpus::source::CorpusSource;
use crate::corpus::CorpusSnapshot;
use crate::error::CorpusError;
use crate::utils::config::AppConfig;

/// The held-back subset was carved out of the corpus's training partition,
/// so regeneration always streams this split.
const HELD_BACK_SOURCE_SPLIT: &str = "train";

/// Loads segment records from the remote corpus source or from a cached
/// local snapshot, filtering against the held-back allow-list when asked.
pub struct CorpusLoader<S: CorpusSource> {
    source: S,
    allow_list_path: PathBuf,
    cache_path: PathBuf,
}

impl<S: CorpusSource> CorpusLoader<S> {
    pub fn new(source: S, config: &AppConfig) -> Self {
        Self {
            source,
            allow_list_path: PathBuf::from(&config.held_back_file),
            cache_path: PathBuf::from(&config.cache_path),
        }
    }

    /// Loads speech segments for further processing: either the named
    /// standard split, or the held-back training subset when
    /// `use_held_back` is set (only then is `split` ignored).
    pub async fn load(
        &self,
        split: &str,
        use_held_back: bool,
    ) -> Result<CorpusSnapshot, CorpusError> {
        if use_held_back {
            self.load_held_back_split().await
        } else {
            self.load_standard_split(split).await
        }
    }

    /// Drains the named split into a snapshot keyed by raw corpus id.
    ///
    /// No canonicalization on this path: it mirrors production inference
    /// data, where the corpus's native ids are acceptable.
    pub async fn load_standard_split(
        &self,
        split: &str,
    ) -> Result<CorpusSnapshot, CorpusError> {
        let mut rows = self.source.stream_split(split);
        let mut snapshot = CorpusSnapshot::new();
        while let Some(segment) = rows.next().await {
            let segment = segment?;
            snapshot.insert(segment.id.clone(), segment);
        }

        info!(split, segments = snapshot.len(), "Data successfully loaded from split");
        Ok(snapshot)
    }

    /// Returns the held-back training subset.
    ///
    /// A cached snapshot on disk is authoritative and bypasses the remote
    /// source entirely; staleness is the caller's responsibility. Only a
    /// missing cache file triggers regeneration from the source.
    pub async fn load_held_back_split(&self) -> Result<CorpusSnapshot, CorpusError> {
        info!("Loading held back training data for processing");

        match self.read_cached_snapshot()? {
            Some(snapshot) => Ok(snapshot),
            None => self.fetch_and_cache().await,
        }
    }

    /// Streams the full training partition, retains the segments whose
    /// canonicalized filename appears in the allow-list, and persists the
    /// resulting snapshot before returning it.
    async fn fetch_and_cache(&self) -> Result<CorpusSnapshot, CorpusError> {
        info!("Cache not found; streaming held-back data from the remote source");
        let allow_list = load_allow_list(&self.allow_list_path)?;

        let mut rows = self.source.stream_split(HELD_BACK_SOURCE_SPLIT);
        let mut snapshot = CorpusSnapshot::new();
        while let Some(segment) = rows.next().await {
            let segment = segment?;
            let filename = canonical_filename(&segment.id)?;
            if allow_list.contains(&filename) {
                snapshot.insert(filename, segment);
            }
        }

        self.write_snapshot_cache(&snapshot)?;
        info!(
            segments = snapshot.len(),
            cache = %self.cache_path.display(),
            "Held-back snapshot successfully cached"
        );

        Ok(snapshot)
    }

    /// Only `NotFound` falls back to the remote source; permission errors
    /// and corrupt contents propagate unchanged.
    fn read_cached_snapshot(&self) -> Result<Option<CorpusSnapshot>, CorpusError> {
        let file = match File::open(&self.cache_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        info!(cache = %self.cache_path.display(), "Loading cached held-back snapshot");
        let snapshot = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(snapshot))
    }

    fn write_snapshot_cache(&self, snapshot: &CorpusSnapshot) -> Result<(), CorpusError> {
        if let Some(parent) = self.cache_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(&self.cache_path)?);
        serde_json::to_writer(&mut writer, snapshot)?;
        writer.flush()?;
        Ok(())
    }
}
