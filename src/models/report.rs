use serde::{Deserialize, Serialize};

use super::class::ClassRef;
use crate::error::AppError;

pub const PUBLIC_REPORT_BASE_URL: &str = "https://codespace.edu.vn/student-reports";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkKind {
    Youtube,
    ScratchEmbed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFile {
    #[serde(default)]
    pub id: Option<i64>,
    pub file_url: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub test_type: Option<String>,
    #[serde(default, deserialize_with = "super::de_opt_number")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLink {
    #[serde(rename = "type")]
    pub kind: LinkKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub embed_code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStudent {
    pub id: i64,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReport {
    pub id: i64,
    #[serde(default)]
    pub student: Option<ReportStudent>,
    #[serde(default)]
    pub class: Option<ClassRef>,
    #[serde(default)]
    pub files: Vec<ReportFile>,
    #[serde(default)]
    pub links: Vec<ReportLink>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl StudentReport {
    /// Public page for sharing the report, when the backend issued a token.
    pub fn share_url(&self) -> Option<String> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|token| format!("{}/{}", PUBLIC_REPORT_BASE_URL, token))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfFilePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub file_url: String,
    pub test_type: String,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScratchProject {
    pub embed_code: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReportPayload {
    pub student_id: i64,
    pub class_id: i64,
    pub pdf_files: Vec<PdfFilePayload>,
    pub youtube_links: Vec<String>,
    pub scratch_projects: Vec<ScratchProject>,
}

impl StudentReportPayload {
    /// Drops files without a URL, blank links and blank embed codes.
    pub fn normalized(mut self) -> Self {
        self.pdf_files.retain(|f| !f.file_url.trim().is_empty());
        self.youtube_links.retain(|l| !l.trim().is_empty());
        self.scratch_projects.retain(|p| !p.embed_code.trim().is_empty());
        self
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.student_id <= 0 || self.class_id <= 0 {
            return Err(AppError::Validation("Choose both a student and a class for the report.".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub page: usize,
    pub limit: usize,
    pub search: String,
    pub class_id: Option<i64>,
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
            class_id: None,
        }
    }
}
