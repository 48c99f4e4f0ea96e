//! Image to data URI encoding for the vision call.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::domain::models::ImageInput;

const DEFAULT_MIME: &str = "image/jpeg";

/// Detect the image type from its leading magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}

/// Encode an image as `data:<mime>;base64,<payload>`.
///
/// MIME resolution order: magic bytes, then the declared type, then jpeg.
/// Input that is already a base64 data URI is re-wrapped with its payload
/// untouched rather than encoded twice.
pub fn to_data_uri(image: &ImageInput) -> String {
    if let Some((mime, payload)) = split_data_uri(&image.bytes) {
        let mime = if mime.is_empty() {
            declared_mime(image).unwrap_or(DEFAULT_MIME)
        } else {
            mime
        };
        return format!("data:{mime};base64,{payload}");
    }

    let mime = sniff_mime(&image.bytes)
        .or_else(|| declared_mime(image))
        .unwrap_or(DEFAULT_MIME);

    format!("data:{mime};base64,{}", STANDARD.encode(&image.bytes))
}

fn declared_mime(image: &ImageInput) -> Option<&str> {
    image
        .mime_type
        .as_deref()
        .filter(|mime| mime.starts_with("image/"))
}

fn split_data_uri(bytes: &[u8]) -> Option<(&str, &str)> {
    let text = std::str::from_utf8(bytes).ok()?.trim();
    let rest = text.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    Some((mime, payload))
}
