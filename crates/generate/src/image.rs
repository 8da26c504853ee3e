use anyhow::{Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Encode raw image bytes as a `data:<mime>;base64,<payload>` URI.
///
/// Uses the declared media type when one was provided; otherwise sniffs
/// the format from magic bytes. Works for uploads and for bytes coming
/// back from an image-generation call alike.
pub fn to_data_uri(content: &[u8], content_type: Option<&str>) -> Result<String> {
    if content.is_empty() {
        bail!("No image data received");
    }
    if content.len() > MAX_IMAGE_BYTES {
        bail!("Image too large (max {}MB)", MAX_IMAGE_BYTES / (1024 * 1024));
    }

    let mime = match content_type {
        Some(declared) if !declared.is_empty() => declared,
        _ => sniff_mime(content),
    };

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(content)))
}

/// Magic-byte sniffing for the common web image formats. Anything
/// unrecognized is passed through as an opaque octet stream.
fn sniff_mime(content: &[u8]) -> &'static str {
    if content.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if content.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if content.starts_with(b"GIF8") {
        "image/gif"
    } else if content.len() >= 12 && &content[0..4] == b"RIFF" && &content[8..12] == b"WEBP" {
        "image/webp"
    } else if content.starts_with(b"BM") {
        "image/bmp"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_content_type_wins() {
        let uri = to_data_uri(&[0x89, b'P', b'N', b'G'], Some("image/webp")).unwrap();
        assert!(uri.starts_with("data:image/webp;base64,"));
    }

    #[test]
    fn test_png_magic_is_sniffed() {
        let uri = to_data_uri(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A], None).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_jpeg_magic_is_sniffed() {
        let uri = to_data_uri(&[0xFF, 0xD8, 0xFF, 0xE0], None).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_unknown_bytes_fall_back_to_octet_stream() {
        let uri = to_data_uri(b"plainly not an image", None).unwrap();
        assert!(uri.starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        assert!(to_data_uri(&[], None).is_err());
    }

    #[test]
    fn test_oversized_payload_is_rejected() {
        let content = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert!(to_data_uri(&content, Some("image/png")).is_err());
    }

    #[test]
    fn test_payload_is_base64_of_input() {
        let uri = to_data_uri(b"BM-test", None).unwrap();
        let encoded = uri.rsplit(',').next().unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, b"BM-test");
    }
}
