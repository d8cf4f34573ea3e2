//! Media type resolution and data-URI encoding.

use crate::{IngestError, IngestResult};
use base64::Engine;

const BASE64: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Media type used when nothing better is known.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// `data:<media_type>;base64,<payload>`
pub fn encode_data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{media_type};base64,{}", BASE64.encode(bytes))
}

/// Pick the media type recorded in the data URI.
///
/// A declared type is kept as is. Without one, the content's magic bytes
/// decide, falling back to [`OCTET_STREAM`]. With `reject_non_images`, content
/// that does not sniff as an image is refused regardless of the declared type.
pub fn resolve_media_type(
    name: &str,
    declared: Option<&str>,
    bytes: &[u8],
    reject_non_images: bool,
) -> IngestResult<String> {
    let sniffed = image::guess_format(bytes).ok();

    if reject_non_images && sniffed.is_none() {
        return Err(IngestError::NotAnImage {
            name: name.to_string(),
        });
    }

    let media_type = declared
        .map(str::trim)
        .filter(|declared| !declared.is_empty())
        .map(str::to_string)
        .or_else(|| sniffed.map(|format| format.to_mime_type().to_string()))
        .unwrap_or_else(|| OCTET_STREAM.to_string());

    Ok(media_type)
}
