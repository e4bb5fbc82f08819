//! Run reports: the canonical, hashable record of one strategy run.
//!
//! A [`RunReportV1`] carries only deterministic content (no wall-clock
//! readings), so two runs with identical inputs produce byte-identical
//! canonical JSON and therefore identical digests, in-process or across
//! processes.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   run_report.json   canonical JSON of the report
//!   run_digest.txt    ASCII digest string ("sha256:...")
//! ```
//!
//! Reading a directory is fail-closed: a missing file, non-canonical report
//! bytes, or a digest that does not match the recomputed one is an error.

use std::path::{Path, PathBuf};

use lodestar_kernel::proof::canon::{canonical_json_bytes, CanonError};
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use serde_json::{json, Value};
use thiserror::Error;

/// Schema tag written into every report.
pub const REPORT_SCHEMA_VERSION: &str = "lodestar.run_report.v1";

const REPORT_FILENAME: &str = "run_report.json";
const DIGEST_FILENAME: &str = "run_digest.txt";

/// The record of one strategy run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReportV1 {
    pub world_id: String,
    /// Digest of the world's fixture under [`HashDomain::WorldFixture`].
    pub world_digest: ContentHash,
    /// `{"kind": ..., "policy": {...}}`.
    pub strategy: Value,
    /// Digest of `strategy` under [`HashDomain::StrategySnapshot`].
    pub strategy_digest: ContentHash,
    /// Engine-specific outcome, always carrying a `"kind"` tag.
    pub outcome: Value,
    /// Engine-specific counters.
    pub stats: Value,
}

impl RunReportV1 {
    /// Assemble a report, hashing the fixture and strategy snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if either value contains a float.
    pub fn new(
        world_id: &str,
        fixture: &Value,
        strategy: Value,
        outcome: Value,
        stats: Value,
    ) -> Result<Self, CanonError> {
        let world_digest = canonical_hash(HashDomain::WorldFixture, &canonical_json_bytes(fixture)?);
        let strategy_digest =
            canonical_hash(HashDomain::StrategySnapshot, &canonical_json_bytes(&strategy)?);
        Ok(Self {
            world_id: world_id.to_string(),
            world_digest,
            strategy,
            strategy_digest,
            outcome,
            stats,
        })
    }

    /// The `"kind"` tag of the outcome (`"found"`, `"selected"`, ...).
    #[must_use]
    pub fn outcome_kind(&self) -> &str {
        self.outcome
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "outcome": self.outcome,
            "schema_version": REPORT_SCHEMA_VERSION,
            "stats": self.stats,
            "strategy": self.strategy,
            "strategy_digest": self.strategy_digest.as_str(),
            "world_digest": self.world_digest.as_str(),
            "world_id": self.world_id,
        })
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if the outcome or stats contain a raw float.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json())
    }

    /// `canonical_hash(RunReport, canonical_bytes)`.
    ///
    /// # Errors
    ///
    /// As [`canonical_bytes`](Self::canonical_bytes).
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(HashDomain::RunReport, &self.canonical_bytes()?))
    }
}

/// Failure writing or reading a report directory.
#[derive(Debug, Error)]
pub enum ReportDirError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Canon(#[from] CanonError),
    #[error("run report is not valid JSON: {detail}")]
    Parse { detail: String },
    #[error("run report bytes are not in canonical form")]
    NonCanonical,
    #[error("stored digest {stored} does not match recomputed {recomputed}")]
    DigestMismatch { stored: String, recomputed: String },
}

/// Write `report` into `dir` (created if missing). Returns the digest written.
///
/// # Errors
///
/// Returns [`ReportDirError`] on I/O failure or canonical JSON error.
pub fn write_report_dir(report: &RunReportV1, dir: &Path) -> Result<ContentHash, ReportDirError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportDirError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let bytes = report.canonical_bytes()?;
    let digest = canonical_hash(HashDomain::RunReport, &bytes);
    write_atomic(&dir.join(REPORT_FILENAME), &bytes)?;
    write_atomic(&dir.join(DIGEST_FILENAME), digest.as_str().as_bytes())?;
    Ok(digest)
}

/// Read a report directory back, verifying canonical form and digest.
/// Returns the parsed report JSON and its digest.
///
/// # Errors
///
/// Returns [`ReportDirError`] on any validation failure.
pub fn read_report_dir(dir: &Path) -> Result<(Value, ContentHash), ReportDirError> {
    let bytes = read_file(&dir.join(REPORT_FILENAME))?;
    let stored = read_file(&dir.join(DIGEST_FILENAME))?;

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| ReportDirError::Parse {
        detail: e.to_string(),
    })?;
    if canonical_json_bytes(&value)? != bytes {
        return Err(ReportDirError::NonCanonical);
    }
    let recomputed = canonical_hash(HashDomain::RunReport, &bytes);
    let stored = String::from_utf8_lossy(&stored).trim().to_string();
    if stored != recomputed.as_str() {
        return Err(ReportDirError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }
    Ok((value, recomputed))
}

/// Write bytes to a path via temp file + rename (best-effort atomicity on Unix).
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirError> {
    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = path.with_file_name(temp_name);
    std::fs::write(&temp_path, content).map_err(|source| ReportDirError::Io {
        path: temp_path.clone(),
        source,
    })?;
    std::fs::rename(&temp_path, path).map_err(|source| ReportDirError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<Vec<u8>, ReportDirError> {
    std::fs::read(path).map_err(|source| ReportDirError::Io {
        path: path.to_path_buf(),
        source,
    })
}
