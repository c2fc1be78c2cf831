//! Input side: CSV loading, cleaning and the synthetic fallback.

pub mod loader;
/// Cleaned rainfall records.
pub mod record;
pub mod synth;

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::foundation::error::RainResult;
use loader::{LoadOptions, LoadReport};
use record::RawRecord;
use synth::SynthOptions;

/// What to do when the data file does not exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataPolicy {
    /// Surface [`crate::RainError::DataUnavailable`].
    Fail,
    /// Substitute seeded synthetic data.
    Synthesize,
}

/// Where a [`Dataset`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataOrigin {
    /// Parsed from this file.
    File(PathBuf),
    /// Produced by [`synth::generate`].
    Synthetic,
}

/// Cleaned records ready for aggregation.
#[derive(Clone, Debug)]
pub struct Dataset {
    /// Records in source order.
    pub records: Vec<RawRecord>,
    /// Row accounting; `None` for synthetic data.
    pub report: Option<LoadReport>,
    /// Source of the records.
    pub origin: DataOrigin,
}

/// Load `path`, applying `policy` if it does not exist.
pub fn load_or_synthesize(
    path: &Path,
    opts: LoadOptions,
    policy: MissingDataPolicy,
    synth: &SynthOptions,
) -> RainResult<Dataset> {
    match loader::load(path, opts) {
        Ok(loaded) => Ok(Dataset {
            records: loaded.records,
            report: Some(loaded.report),
            origin: DataOrigin::File(path.to_path_buf()),
        }),
        Err(e) if e.is_data_unavailable() && policy == MissingDataPolicy::Synthesize => {
            warn!(path = %path.display(), "data file not found, generating synthetic data");
            Ok(Dataset {
                records: synth::generate(synth),
                report: None,
                origin: DataOrigin::Synthetic,
            })
        }
        Err(e) => Err(e),
    }
}
