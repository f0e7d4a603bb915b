//! Candidate loading from disk.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use crate::candidates::set::CandidateSet;
use crate::error::{ProberError, ProberResult};

/// Build the candidate set from the input file and, in merge mode, the
/// previous run's output.
///
/// A missing input file is fatal. A missing prior-results file is an empty
/// prior set (first run).
pub async fn load_candidates(input: &Path, prior: Option<&Path>) -> ProberResult<CandidateSet> {
    let content = fs::read_to_string(input)
        .await
        .map_err(|e| ProberError::io(input, e))?;

    let mut candidates = CandidateSet::new();
    let from_input = candidates.extend_from_lines(&content);
    tracing::info!(path = %input.display(), unique = from_input, "Loaded candidate endpoints");

    if let Some(prior) = prior {
        match fs::read_to_string(prior).await {
            Ok(content) => {
                let added = candidates.extend_from_lines(&content);
                tracing::info!(
                    path = %prior.display(),
                    added,
                    "Merged previously accepted endpoints"
                );
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %prior.display(), "No prior results, starting fresh");
            }
            Err(e) => return Err(ProberError::io(prior, e)),
        }
    }

    Ok(candidates)
}
