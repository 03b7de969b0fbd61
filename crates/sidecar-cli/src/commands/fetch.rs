use std::path::Path;

use anyhow::{Context, Result, bail};
use sidecar_client::{BlobSidecarClient, Format};
use sidecar_types::{BlobSidecarList, BlobSidecars};
use tracing::info;

const NOT_FOUND: u16 = 404;

/// Fetch sidecars for `id` and print a summary, optionally saving them.
///
/// A 404 means the node has no sidecars for `id` and is not a failure.
pub async fn run(
    client: &dyn BlobSidecarClient,
    id: &str,
    format: Format,
    output: Option<&Path>,
) -> Result<()> {
    let (status, sidecars) = client
        .fetch_sidecars(id, format)
        .await
        .into_result()
        .with_context(|| format!("fetching sidecars for {id}"))?;

    match status {
        200 => {}
        NOT_FOUND => {
            println!("No sidecars for {id} (HTTP {status})");
            return Ok(());
        }
        other => bail!("beacon API returned HTTP {other} for {id}"),
    }

    print!("{}", summarize(id, &sidecars));

    if let Some(path) = output {
        let bytes = encode_output(&sidecars, format)?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), bytes = bytes.len(), %format, "wrote sidecars");
    }

    Ok(())
}

/// One header line plus one line per sidecar.
pub fn summarize(id: &str, sidecars: &BlobSidecars) -> String {
    let mut out = format!("Sidecars for {id}: {}\n", sidecars.len());
    for sidecar in &sidecars.data {
        out.push_str(&format!(
            "  index={:<4} slot={:<10} commitment={}\n",
            sidecar.index,
            sidecar.slot(),
            sidecar.kzg_commitment
        ));
    }
    out
}

/// Re-encode sidecars in the format they were fetched in.
pub fn encode_output(sidecars: &BlobSidecars, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Json => serde_json::to_vec_pretty(sidecars).context("failed to encode json"),
        Format::Ssz => Ok(BlobSidecarList::from(sidecars.clone()).encode_ssz()),
    }
}
