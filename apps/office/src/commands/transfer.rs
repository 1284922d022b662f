//! # CSV Transfer Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EXPORT: read snapshot ──► transfer::export ──► tokio::fs::write         │
//! │                                                                         │
//! │  IMPORT (two phases):                                                   │
//! │    read_import:  tokio::fs::read_to_string ──► transfer::prepare        │
//! │                  (state untouched, PendingImport held by the caller)    │
//! │    apply_import: mutate(|s| s.apply_import(pending))                    │
//! │                  (collection replaced wholesale)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use hma_core::{transfer, PendingImport, TransferKind};
use tracing::{debug, info};

use crate::context::Office;
use crate::error::{ApiError, ApiResult, ErrorCode};

/// CSV text of one collection.
pub fn export_csv(office: &Office, kind: TransferKind) -> ApiResult<String> {
    debug!(%kind, "export_csv command");
    let text = office.state().read(|state| transfer::export(kind, state))?;
    Ok(text)
}

/// Writes the export to `out`, or to the default file name in the working
/// directory. Returns the path written.
pub async fn export_to_file(
    office: &Office,
    kind: TransferKind,
    out: Option<PathBuf>,
) -> ApiResult<PathBuf> {
    let text = export_csv(office, kind)?;
    let path = out.unwrap_or_else(|| PathBuf::from(kind.file_name()));

    tokio::fs::write(&path, text).await?;
    info!(%kind, path = %path.display(), "Export written");
    Ok(path)
}

/// Reads and checks an import file without changing anything.
pub async fn read_import(
    office: &Office,
    kind: TransferKind,
    path: &Path,
) -> ApiResult<PendingImport> {
    debug!(%kind, path = %path.display(), "read_import command");

    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        ApiError::new(
            ErrorCode::IoError,
            format!("Cannot read {}: {}", path.display(), e),
        )
    })?;
    let pending = transfer::prepare(kind, &text, office.today())?;

    info!(%kind, records = pending.len(), "Import prepared");
    Ok(pending)
}

/// Replaces the collection with a confirmed import. Returns the number of
/// records now in it.
pub fn apply_import(office: &Office, pending: PendingImport) -> ApiResult<usize> {
    let count = pending.len();
    let kind = office
        .state()
        .mutate(|state| Ok::<_, ApiError>(state.apply_import(pending)))?;

    info!(%kind, records = count, "Import applied");
    Ok(count)
}
