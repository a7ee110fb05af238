use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::intake::{decode_resume, resume_from_text};
use crate::models::resume::UploadResumeResponse;

/// POST /upload_resume
///
/// Accepts a `file` part or, failing that, a `text` field. Both are decoded as strict UTF-8.
/// The decoded text is echoed back; nothing is kept server-side.
pub async fn handle_upload_resume(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut multipart = multipart?;
    let mut file_doc = None;
    let mut pasted_text = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" if file_doc.is_none() => {
                let file_name = field.file_name().map(String::from);
                let data = field.bytes().await?;
                file_doc = Some(decode_resume(file_name.as_deref(), data)?);
            }
            "text" => {
                pasted_text = Some(field.bytes().await?);
            }
            _ => {}
        }
    }

    let doc = match (file_doc, pasted_text) {
        (Some(doc), _) => doc,
        (None, Some(text)) => resume_from_text(text)?,
        (None, None) => {
            return Err(AppError::Validation(
                "Either file or text must be provided".to_string(),
            ))
        }
    };

    info!("Received resume '{}' ({} bytes)", doc.filename, doc.size());
    Ok(Json(doc.into()))
}
