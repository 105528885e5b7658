//! Writing saved payloads and exported PDFs to disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use esgsnap_core::ReportMeta;
use esgsnap_core::report::Snapshot;
use tracing::info;

/// Write the report payload as pretty JSON. Returns the written path.
pub fn save_payload(
    snapshot: &Snapshot,
    meta: &ReportMeta,
    out_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let json = serde_json::to_string_pretty(&snapshot.payload(meta))?;
    let path = out_dir.join(meta.payload_filename());
    write(&path, json.as_bytes())?;
    info!(path = %path.display(), report_id = %meta.report_id, "saved report payload");
    Ok(path)
}

/// Render the report document to PDF. Returns the written path.
pub fn export_pdf(
    snapshot: &Snapshot,
    meta: &ReportMeta,
    out_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let bytes = snapshot.document(meta).to_pdf();
    let path = out_dir.join(meta.pdf_filename());
    write(&path, &bytes)?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        report_id = %meta.report_id,
        "exported PDF"
    );
    Ok(path)
}

fn write(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}
