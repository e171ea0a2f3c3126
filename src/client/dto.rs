use serde::{Deserialize, Serialize};

/// Body of a successful `POST /auth/refresh`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// `POST /student-reports/upload-pdf` answers with the stored file location.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
    pub secure_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrScanRequest<'a> {
    pub qr_code_data: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<bool>,
}

/// A file sent as multipart form data.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn pdf(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: "file".to_string(),
            file_name: file_name.into(),
            mime: "application/pdf".to_string(),
            bytes,
        }
    }
}
