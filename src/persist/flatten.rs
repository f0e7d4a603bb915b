//! Comma-joined copy of an endpoint list.

use std::path::Path;

use tokio::fs;

use crate::error::{ProberError, ProberResult};

/// Join trimmed lines with `,`. No trailing newline.
pub fn flatten_lines(content: &str) -> String {
    content.lines().map(str::trim).collect::<Vec<_>>().join(",")
}

/// Write the lines of `input` as a single comma-joined line to `output`.
pub async fn flatten(input: &Path, output: &Path) -> ProberResult<()> {
    let content = fs::read_to_string(input)
        .await
        .map_err(|e| ProberError::io(input, e))?;

    fs::write(output, flatten_lines(&content))
        .await
        .map_err(|e| ProberError::io(output, e))?;

    tracing::debug!(
        from = %input.display(),
        to = %output.display(),
        "Flattened endpoint list"
    );
    Ok(())
}
