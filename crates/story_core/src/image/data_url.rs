//! Data URL construction for attached images.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Image encode failure surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Selected file had no content.
    Empty,
    /// Bytes do not match any supported image signature.
    UnsupportedFormat,
    /// File exceeds the configured size cap.
    TooLarge { bytes: usize, limit: usize },
    /// Host could not read the file.
    Unreadable(String),
}

impl Display for ImageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "image file is empty"),
            Self::UnsupportedFormat => {
                write!(f, "unsupported image format; use PNG, JPEG, GIF, WebP or BMP")
            }
            Self::TooLarge { bytes, limit } => {
                write!(f, "image is too large ({bytes} bytes, limit {limit} bytes)")
            }
            Self::Unreadable(details) => write!(f, "image could not be read: {details}"),
        }
    }
}

impl Error for ImageError {}

/// Detects an image MIME type from leading magic bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
    const JPEG: &[u8] = b"\xFF\xD8\xFF";

    if bytes.starts_with(PNG) {
        Some("image/png")
    } else if bytes.starts_with(JPEG) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"BM") && bytes.len() >= 14 {
        Some("image/bmp")
    } else {
        None
    }
}

/// Encodes `bytes` as `data:<mime>;base64,<payload>`.
///
/// # Errors
/// - `Empty` for zero-length input.
/// - `TooLarge` when `bytes.len() > max_bytes`.
/// - `UnsupportedFormat` when no image signature matches.
pub fn encode_data_url(bytes: &[u8], max_bytes: usize) -> Result<String, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }
    if bytes.len() > max_bytes {
        return Err(ImageError::TooLarge {
            bytes: bytes.len(),
            limit: max_bytes,
        });
    }
    let mime = sniff_image_mime(bytes).ok_or(ImageError::UnsupportedFormat)?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::{encode_data_url, sniff_image_mime, ImageError};

    const TINY_GIF: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";

    #[test]
    fn sniff_recognises_common_signatures() {
        assert_eq!(
            sniff_image_mime(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
            Some("image/png")
        );
        assert_eq!(sniff_image_mime(b"\xFF\xD8\xFF\xE0\0\x10JFIF"), Some("image/jpeg"));
        assert_eq!(sniff_image_mime(TINY_GIF), Some("image/gif"));
        assert_eq!(
            sniff_image_mime(b"RIFF\x24\0\0\0WEBPVP8 "),
            Some("image/webp")
        );
        assert_eq!(sniff_image_mime(b"plain text, not an image"), None);
    }

    #[test]
    fn encode_builds_base64_data_url() {
        let url = encode_data_url(b"GIF89a", 1024).expect("gif header should encode");
        assert_eq!(url, "data:image/gif;base64,R0lGODlh");
    }

    #[test]
    fn encode_rejects_empty_oversized_and_unknown_input() {
        assert_eq!(encode_data_url(b"", 10), Err(ImageError::Empty));
        assert_eq!(
            encode_data_url(TINY_GIF, 4),
            Err(ImageError::TooLarge {
                bytes: TINY_GIF.len(),
                limit: 4
            })
        );
        assert_eq!(
            encode_data_url(b"hello", 1024),
            Err(ImageError::UnsupportedFormat)
        );
    }
}
