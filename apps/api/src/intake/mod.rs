//! Resume Intake: turns an uploaded part into decoded text. Nothing is stored.

pub mod handlers;

use bytes::Bytes;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, DEFAULT_FILENAME};

/// Decodes uploaded bytes as UTF-8.
///
/// Fails with `AppError::Decode` on any invalid sequence; content is never lossily repaired.
pub fn decode_resume(filename: Option<&str>, data: Bytes) -> Result<ResumeDocument, AppError> {
    let filename = filename
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FILENAME)
        .to_string();

    let text = decode_utf8(&filename, data)?;
    Ok(ResumeDocument { filename, text })
}

/// Wraps pasted text submitted through the `text` form field.
/// Decoded with the same strictness as a file part.
pub fn resume_from_text(data: Bytes) -> Result<ResumeDocument, AppError> {
    let text = decode_utf8("text field", data)?;
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Either file or text must be provided".to_string(),
        ));
    }
    Ok(ResumeDocument {
        filename: DEFAULT_FILENAME.to_string(),
        text,
    })
}

fn decode_utf8(source: &str, data: Bytes) -> Result<String, AppError> {
    String::from_utf8(data.to_vec()).map_err(|e| {
        AppError::Decode(format!(
            "'{source}' is not valid UTF-8 text (invalid byte at offset {})",
            e.utf8_error().valid_up_to()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_keeps_content_and_byte_size() {
        let doc = decode_resume(Some("cv.txt"), Bytes::from("Zoë — Rust")).unwrap();
        assert_eq!(doc.filename, "cv.txt");
        assert_eq!(doc.text, "Zoë — Rust");
        assert_eq!(doc.size(), "Zoë — Rust".len());
        assert!(doc.size() > doc.text.chars().count());
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode_resume(Some("cv.pdf"), Bytes::from_static(&[0x25, 0x50, 0xff, 0xfe])).unwrap_err();
        match err {
            AppError::Decode(msg) => assert!(msg.contains("offset 2")),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_filename_defaults() {
        let doc = decode_resume(None, Bytes::from("text")).unwrap();
        assert_eq!(doc.filename, DEFAULT_FILENAME);
        let doc = decode_resume(Some("  "), Bytes::from("text")).unwrap();
        assert_eq!(doc.filename, DEFAULT_FILENAME);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let first = decode_resume(Some("a.txt"), Bytes::from("same content")).unwrap();
        let second = decode_resume(Some("a.txt"), Bytes::from("same content")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_blank_text_field_is_rejected() {
        assert!(matches!(
            resume_from_text(Bytes::from("   ")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_text_field_with_invalid_utf8_is_rejected() {
        let err = resume_from_text(Bytes::from_static(&[0x4a, 0x61, 0xff, 0xfe, 0x6e])).unwrap_err();
        match err {
            AppError::Decode(msg) => assert!(msg.contains("offset 2")),
            other => panic!("expected Decode, got {other:?}"),
        }
    }
}
