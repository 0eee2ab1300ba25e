//! Result Store
//!
//! One file per case, named `<BenchmarkName>.txt`, one JSON record per line
//! in run order. The first line additionally embeds the environment
//! metadata, so every line stays independently parseable. Enumeration is
//! cached for the life of the store; `reload()` drops the cache.

use crate::paths::{resolve_results_dir, StoreContext};
use chrono::{DateTime, Utc};
use framebench_core::{CaseResult, EnvInfo, ResultSink, RunRecord, SavedResult, SinkError};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of persisted result files
pub const RESULT_FILE_EXT: &str = "txt";

/// Errors from saving or enumerating results
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure (permissions, disk full, missing directory)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record could not be encoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A persisted line did not parse back into a record
    #[error("parse error in {file} line {line}: {source}")]
    Parse {
        /// File the bad line was found in
        file: String,
        /// 1-based line number
        line: usize,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// A persisted result bundle loaded back from disk
#[derive(Debug, Clone, PartialEq)]
pub struct StoredResultSet {
    /// File name, e.g. `IslandFlythrough.txt`
    pub file_name: String,
    /// Full path of the file
    pub file_path: PathBuf,
    /// File creation time (modification time where creation is unsupported)
    pub timestamp: DateTime<Utc>,
    /// Environment metadata from the first record, when present
    pub env: Option<EnvInfo>,
    /// Records in run order
    pub records: Vec<RunRecord>,
}

/// Wire shape of one line: a run record, plus the environment metadata on
/// the first line of a file.
#[derive(Serialize)]
struct LineOut<'a> {
    #[serde(flatten)]
    record: &'a RunRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    env: Option<&'a EnvInfo>,
}

#[derive(Deserialize)]
struct LineIn {
    #[serde(flatten)]
    record: RunRecord,
    #[serde(default)]
    env: Option<EnvInfo>,
}

/// Durable write/read of case results, keyed by benchmark name
pub struct ResultStore {
    dir: PathBuf,
    cache: Option<Vec<StoredResultSet>>,
}

impl ResultStore {
    /// Open a store over an explicit directory, creating it if absent
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, cache: None })
    }

    /// Open a store in the resolved `PerformanceResults` directory for the
    /// given execution context
    pub fn for_context(context: StoreContext, app_name: &str) -> Result<Self, StoreError> {
        Self::new(resolve_results_dir(context, app_name))
    }

    /// Directory this store reads and writes
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a case result with this benchmark name saves to
    pub fn result_path(&self, benchmark_name: &str) -> PathBuf {
        self.dir
            .join(format!("{benchmark_name}.{RESULT_FILE_EXT}"))
    }

    /// Serialize a case's runs to its result file, atomically.
    ///
    /// Writes to a temporary file first and renames into place, so readers
    /// never observe a half-written file. Returns the resolved path and the
    /// creation timestamp.
    pub fn save(&mut self, result: &CaseResult) -> Result<SavedResult, StoreError> {
        let path = self.result_path(&result.env.benchmark_name);

        let mut content = String::new();
        for (index, record) in result.runs.iter().enumerate() {
            let line = LineOut {
                record,
                env: (index == 0).then_some(&result.env),
            };
            content.push_str(&serde_json::to_string(&line)?);
            content.push('\n');
        }

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, content)?;
        if let Err(err) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }

        let saved = SavedResult {
            path: path.clone(),
            timestamp: Utc::now(),
        };

        // An already-populated cache tracks our own writes, mirroring the
        // process-lifetime result list the enumeration contract promises.
        if let Some(cache) = self.cache.as_mut() {
            cache.retain(|set| set.file_path != path);
            cache.push(StoredResultSet {
                file_name: file_name_of(&path),
                file_path: path,
                timestamp: saved.timestamp,
                env: Some(result.env.clone()),
                records: result.runs.clone(),
            });
        }

        Ok(saved)
    }

    /// Enumerate every result file in the directory.
    ///
    /// Enumeration happens once per store lifetime; later calls return the
    /// cache. Files that vanished under us, empty files, and files that do
    /// not parse are skipped (the latter with a warning naming the file)
    /// rather than aborting the rest of the enumeration.
    pub fn load_all(&mut self) -> Result<&[StoredResultSet], StoreError> {
        if self.cache.is_none() {
            let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .collect();
            paths.sort();

            let mut sets = Vec::with_capacity(paths.len());
            for path in paths {
                // Leftover temp files are not results.
                if path.extension().map_or(false, |ext| ext == "tmp") {
                    continue;
                }
                match read_result_file(&path) {
                    Ok(Some(set)) => sets.push(set),
                    Ok(None) => {}
                    Err(err) => {
                        warn!("skipping result file {}: {err}", path.display());
                    }
                }
            }
            self.cache = Some(sets);
        }
        Ok(self.cache.as_deref().unwrap_or(&[]))
    }

    /// Drop the cache and enumerate the directory again
    pub fn reload(&mut self) -> Result<&[StoredResultSet], StoreError> {
        self.cache = None;
        self.load_all()
    }

    /// Whether the enumeration cache is populated
    pub fn is_loaded(&self) -> bool {
        self.cache.is_some()
    }
}

impl ResultSink for ResultStore {
    fn save(&mut self, result: &CaseResult) -> Result<SavedResult, SinkError> {
        ResultStore::save(self, result).map_err(|err| match err {
            StoreError::Io(io_err) => SinkError::Io(io_err),
            other => SinkError::Serialization(other.to_string()),
        })
    }
}

/// Parse one result file into a [`StoredResultSet`].
///
/// Returns `Ok(None)` for a file that no longer exists (race with a
/// concurrent writer) or is empty.
pub fn read_result_file(path: &Path) -> Result<Option<StoredResultSet>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    if content.trim().is_empty() {
        return Ok(None);
    }

    let mut env = None;
    let mut records = Vec::new();
    for (number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed: LineIn = serde_json::from_str(line).map_err(|source| StoreError::Parse {
            file: file_name_of(path),
            line: number + 1,
            source,
        })?;
        if env.is_none() {
            env = parsed.env;
        }
        records.push(parsed.record);
    }

    Ok(Some(StoredResultSet {
        file_name: file_name_of(path),
        file_path: path.to_path_buf(),
        timestamp: file_timestamp(path),
        env,
        records,
    }))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_timestamp(path: &Path) -> DateTime<Utc> {
    fs::metadata(path)
        .ok()
        .and_then(|meta| meta.created().or_else(|_| meta.modified()).ok())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(Utc::now)
}
