//! Image attachments (screenshots and logos)
//!
//! Payloads are held base64-encoded with their MIME type so they can go
//! straight into a generation request or a data URL. Size caps are checked
//! against the raw byte length before anything is stored.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cap for per-bug screenshots
pub const MAX_SCREENSHOT_BYTES: usize = 4 * 1024 * 1024;

/// Cap for the session logo
pub const MAX_LOGO_BYTES: usize = 1024 * 1024;

const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("{file_name}: image is {size} bytes, limit is {limit}")]
    TooLarge {
        file_name: String,
        size: usize,
        limit: usize,
    },

    #[error("{0}: unsupported image type (use PNG, JPEG, GIF, or WEBP)")]
    UnsupportedType(String),
}

/// An image payload plus the metadata needed to display or transmit it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    /// Raw bytes, base64-encoded
    pub data: String,
}

impl Attachment {
    /// Build an attachment, rejecting oversized or non-image payloads
    /// before anything is encoded or stored
    pub fn from_bytes(
        file_name: &str,
        bytes: &[u8],
        limit: usize,
    ) -> Result<Self, AttachmentError> {
        let mime_type = mime_for(file_name)
            .ok_or_else(|| AttachmentError::UnsupportedType(file_name.to_string()))?;
        if bytes.len() > limit {
            return Err(AttachmentError::TooLarge {
                file_name: file_name.to_string(),
                size: bytes.len(),
                limit,
            });
        }
        Ok(Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        })
    }

    /// Base64 re-embedded with its MIME prefix, for direct display
    #[allow(dead_code)]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

fn mime_for(file_name: &str) -> Option<&'static str> {
    let ext = std::path::Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    ALLOWED_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_at_exact_limit_accepted() {
        let bytes = vec![0u8; MAX_SCREENSHOT_BYTES];
        let attachment = Attachment::from_bytes("shot.png", &bytes, MAX_SCREENSHOT_BYTES).unwrap();
        assert_eq!(attachment.mime_type, "image/png");
        assert_eq!(attachment.file_name, "shot.png");
    }

    #[test]
    fn one_byte_over_limit_rejected() {
        let bytes = vec![0u8; MAX_SCREENSHOT_BYTES + 1];
        let err = Attachment::from_bytes("shot.png", &bytes, MAX_SCREENSHOT_BYTES).unwrap_err();
        match err {
            AttachmentError::TooLarge { size, limit, .. } => {
                assert_eq!(size, MAX_SCREENSHOT_BYTES + 1);
                assert_eq!(limit, MAX_SCREENSHOT_BYTES);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn logo_limit_boundary() {
        assert!(Attachment::from_bytes("logo.png", &vec![0u8; MAX_LOGO_BYTES], MAX_LOGO_BYTES).is_ok());
        assert!(
            Attachment::from_bytes("logo.png", &vec![0u8; MAX_LOGO_BYTES + 1], MAX_LOGO_BYTES)
                .is_err()
        );
    }

    #[test]
    fn extension_mapping() {
        for (name, mime) in [
            ("a.png", "image/png"),
            ("a.jpg", "image/jpeg"),
            ("a.JPEG", "image/jpeg"),
            ("a.gif", "image/gif"),
            ("a.webp", "image/webp"),
        ] {
            let attachment = Attachment::from_bytes(name, b"x", 1024).unwrap();
            assert_eq!(attachment.mime_type, mime, "{}", name);
        }
    }

    #[test]
    fn unsupported_type_rejected() {
        for name in ["notes.txt", "archive.zip", "image.bmp", "noextension"] {
            let err = Attachment::from_bytes(name, b"x", 1024).unwrap_err();
            assert!(matches!(err, AttachmentError::UnsupportedType(_)), "{}", name);
        }
    }

    #[test]
    fn data_url_has_mime_prefix() {
        let attachment = Attachment::from_bytes("shot.png", b"abc", 1024).unwrap();
        assert!(attachment.data_url().starts_with("data:image/png;base64,"));
        assert_eq!(attachment.data, STANDARD.encode(b"abc"));
    }
}
