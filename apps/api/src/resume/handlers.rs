//! Axum route handlers for resume uploads.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{ensure_readable, extract_text, DocumentError, DocumentFormat, RawDocument};
use crate::resume::models::ParsedResume;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub file_size: usize,
    pub extracted_data: ParsedResume,
}

/// POST /upload
///
/// Accepts a multipart `file` part (PDF or DOCX), extracts its text and returns the parsed
/// resume. Extraction and parsing are CPU-bound and run on the blocking pool.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let max_bytes = state.config.max_upload_bytes;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, max_bytes))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Uploaded file has no filename".to_string()))?;

        let format = DocumentFormat::from_filename(&filename).map_err(|_| {
            AppError::Validation(format!(
                "Invalid file format. Only PDF and DOCX files are allowed. Got: {filename}"
            ))
        })?;

        let content = field.bytes().await.map_err(|e| upload_error(e, max_bytes))?;
        if content.len() > max_bytes {
            return Err(size_limit_error(max_bytes));
        }

        let file_size = content.len();
        info!(filename = %filename, file_size = file_size, format = %format, "Received resume upload");

        let parser = state.parser.clone();
        let document = RawDocument::new(content, format);
        let extracted_data = tokio::task::spawn_blocking(move || {
            let text = extract_text(&document)?;
            let text = ensure_readable(&text)?;
            Ok::<_, DocumentError>(parser.parse(text))
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Resume parsing task failed: {e}")))??;

        info!(
            filename = %filename,
            name_found = extracted_data.name.is_some(),
            skills = extracted_data.skills.len(),
            education = extracted_data.education.len(),
            experience = extracted_data.experience.len(),
            "Parsed resume"
        );

        return Ok(Json(UploadResponse {
            success: true,
            filename,
            file_size,
            extracted_data,
        }));
    }

    Err(AppError::Validation(format!(
        "No file uploaded. Expected a multipart field named '{FILE_FIELD}'"
    )))
}

fn upload_error(err: MultipartError, max_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return size_limit_error(max_bytes);
    }
    AppError::Validation(format!("Failed to read upload: {}", err.body_text()))
}

fn size_limit_error(max_bytes: usize) -> AppError {
    AppError::Validation(format!(
        "File size exceeds {}MB limit",
        max_bytes / (1024 * 1024)
    ))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;

    use super::*;
    use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
    use crate::extraction::docx::tests::build_docx;
    use crate::extraction::pdf::tests::build_pdf;
    use crate::routes::tests::{send, test_state};

    const BOUNDARY: &str = "resume-upload-boundary";

    fn multipart_request(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn sample_docx() -> Vec<u8> {
        build_docx(&[
            "Jane Doe",
            "jane.doe@example.com | (415) 555-2671",
            "EXPERIENCE",
            "Backend Engineer at Initech, 2020 - Present",
            "EDUCATION",
            "Master of Science, Computer Science",
            "SKILLS",
            "Rust, Docker, PostgreSQL",
        ])
    }

    #[tokio::test]
    async fn test_docx_upload_is_parsed() {
        let docx = sample_docx();
        let (status, body) = send(
            test_state(DEFAULT_MAX_UPLOAD_BYTES),
            multipart_request("file", "jane_doe.docx", &docx),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["filename"], "jane_doe.docx");
        assert_eq!(body["file_size"], docx.len());

        let data = &body["extracted_data"];
        assert_eq!(data["name"], "Jane Doe");
        assert_eq!(data["email"], "jane.doe@example.com");
        assert_eq!(data["skills"], serde_json::json!(["Docker", "PostgreSQL", "Rust"]));
        assert_eq!(
            data["experience"],
            serde_json::json!(["Backend Engineer at Initech, 2020 - Present"])
        );
        assert_eq!(
            data["education"],
            serde_json::json!(["Master of Science, Computer Science"])
        );
    }

    #[tokio::test]
    async fn test_pdf_upload_is_parsed() {
        let pdf = build_pdf(&["Rust and Kubernetes engineer"]);
        let (status, body) = send(
            test_state(DEFAULT_MAX_UPLOAD_BYTES),
            multipart_request("file", "resume.PDF", &pdf),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let skills = body["extracted_data"]["skills"].as_array().unwrap();
        assert!(skills.contains(&serde_json::json!("Rust")), "got {skills:?}");
        assert!(skills.contains(&serde_json::json!("Kubernetes")), "got {skills:?}");
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_rejected() {
        let (status, body) = send(
            test_state(DEFAULT_MAX_UPLOAD_BYTES),
            multipart_request("file", "resume.txt", b"Jane Doe, engineer"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .ends_with("Got: resume.txt"));
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let docx = sample_docx();
        let (status, body) = send(
            test_state(docx.len() - 1),
            multipart_request("file", "resume.docx", &docx),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("File size exceeds"));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_unprocessable() {
        let (status, body) = send(
            test_state(DEFAULT_MAX_UPLOAD_BYTES),
            multipart_request("file", "resume.pdf", b"%PDF-1.4 definitely not a pdf"),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Unable to extract text from file"));
    }

    #[tokio::test]
    async fn test_nearly_empty_document_is_unreadable() {
        let docx = build_docx(&["Hello"]);
        let (status, body) = send(
            test_state(DEFAULT_MAX_UPLOAD_BYTES),
            multipart_request("file", "resume.docx", &docx),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("No readable text found"));
    }

    #[tokio::test]
    async fn test_missing_file_field_is_rejected() {
        let (status, body) = send(
            test_state(DEFAULT_MAX_UPLOAD_BYTES),
            multipart_request("attachment", "resume.docx", &sample_docx()),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("No file uploaded"));
    }
}
