//! Firm logo commands.
//!
//! An uploaded logo is stored in the state as a `data:` URL so documents
//! carry it without a separate file.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, info};

use crate::context::Office;
use crate::error::{ApiError, ApiResult, ErrorCode};

fn mime_type(path: &Path) -> ApiResult<&'static str> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "svg" => Ok("image/svg+xml"),
        "webp" => Ok("image/webp"),
        _ => Err(ApiError::validation(format!(
            "Unsupported logo file type: {}",
            path.display()
        ))),
    }
}

/// `data:<mime>;base64,<bytes>`
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Reads an image and makes it the firm logo.
pub async fn set_logo(office: &Office, path: &Path) -> ApiResult<String> {
    debug!(path = %path.display(), "set_logo command");
    let mime = mime_type(path)?;

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        ApiError::new(
            ErrorCode::IoError,
            format!("Cannot read {}: {}", path.display(), e),
        )
    })?;
    if bytes.is_empty() {
        return Err(ApiError::validation("Logo file is empty"));
    }

    let url = data_url(mime, &bytes);
    office.state().mutate(|state| {
        state.set_logo(Some(url.clone()));
        Ok::<_, ApiError>(())
    })?;

    info!(mime, size = bytes.len(), "Firm logo replaced");
    Ok(url)
}

/// Goes back to the configured default logo.
pub fn clear_logo(office: &Office) -> ApiResult<()> {
    debug!("clear_logo command");
    office.state().mutate(|state| {
        state.set_logo(None);
        Ok(())
    })
}

/// The uploaded logo, or the configured default.
pub fn effective_logo(office: &Office) -> String {
    office.state().read(|state| {
        state
            .firm_logo()
            .map(str::to_string)
            .unwrap_or_else(|| office.config().firm.default_logo.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_type(Path::new("logo.PNG")).unwrap(), "image/png");
        assert_eq!(mime_type(Path::new("a/b.jpeg")).unwrap(), "image/jpeg");
        assert!(mime_type(Path::new("logo.bmp")).is_err());
        assert!(mime_type(Path::new("logo")).is_err());
    }

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
    }
}
