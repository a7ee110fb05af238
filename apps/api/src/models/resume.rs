use serde::Serialize;

pub const DEFAULT_FILENAME: &str = "resume.txt";

/// Decoded resume text. Lives for one request; never written anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeDocument {
    pub filename: String,
    pub text: String,
}

impl ResumeDocument {
    /// Byte length of the decoded UTF-8 text.
    pub fn size(&self) -> usize {
        self.text.len()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResumeResponse {
    pub filename: String,
    pub size: usize,
    pub message: String,
    pub resume_text: String,
}

impl From<ResumeDocument> for UploadResumeResponse {
    fn from(doc: ResumeDocument) -> Self {
        Self {
            size: doc.size(),
            filename: doc.filename,
            message: "Resume uploaded successfully".to_string(),
            resume_text: doc.text,
        }
    }
}
