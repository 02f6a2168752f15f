//! HTTP client for the PDF processing routes.
//!
//! Inputs are checked locally before anything is sent. Each call is a single
//! `multipart/form-data` POST; a 2xx answer carries the processed document,
//! anything else carries a JSON `{ "error": ... }` body or nothing useful.

use crate::domain::model::{
    AdvancedEditRequest, Annotation, BackgroundOptions, PageInfo, PageSelection, PdfUpload,
};
use crate::domain::ports::{ConfigProvider, PdfService, Storage};
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{
    validate_file_extension, validate_hex_color, validate_non_empty_string,
    validate_positive_amount, validate_range, validate_url,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const UNLOCK_ROUTE: &str = "/api/unlock-pdf";
pub const CHANGE_BACKGROUND_ROUTE: &str = "/api/pdf/change-background";
pub const EDIT_ROUTE: &str = "/api/edit-pdf";
pub const ADVANCED_EDIT_ROUTE: &str = "/api/advanced-edit-pdf";
pub const PAGE_INFO_ROUTE: &str = "/api/pdf-page-info";

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Rejects anything that is not a PDF by name and by header.
pub fn ensure_pdf(file: &PdfUpload) -> Result<()> {
    let not_pdf = || ToolError::InvalidFileType {
        file_name: file.file_name.clone(),
    };
    validate_file_extension("pdf", &file.file_name, &["pdf"]).map_err(|_| not_pdf())?;
    if !file.bytes.starts_with(PDF_MAGIC) {
        return Err(not_pdf());
    }
    Ok(())
}

fn validate_annotations(annotations: &[Annotation]) -> Result<()> {
    for annotation in annotations {
        if annotation.page == 0 {
            return Err(ToolError::invalid_input(
                "annotations.page",
                "pages start at 1",
            ));
        }
        validate_positive_amount("annotations.font_size", annotation.font_size)?;
        validate_hex_color("annotations.color", &annotation.color)?;
    }
    Ok(())
}

/// Turns a non-2xx response into the message the user should see.
pub async fn error_from_response(response: Response) -> ToolError {
    let status = response.status().as_u16();
    let body = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Server error: {}", status));

    ToolError::ServerError { status, message }
}

pub async fn load_upload(path: &Path) -> Result<PdfUpload> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf")
        .to_string();
    Ok(PdfUpload { file_name, bytes })
}

/// `unlocked` + `report.pdf` -> `unlocked-report.pdf`.
pub fn output_file_name(prefix: &str, original: &str) -> String {
    let stem = Path::new(original)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("document");
    format!("{}-{}.pdf", prefix, stem)
}

pub async fn save_result<S: Storage>(
    storage: &S,
    prefix: &str,
    original: &str,
    bytes: &[u8],
) -> Result<String> {
    let name = output_file_name(prefix, original);
    storage.write_file(&name, bytes).await?;
    tracing::info!("Saved {} ({} bytes)", name, bytes.len());
    Ok(name)
}

#[derive(Debug, Clone)]
pub struct HttpPdfService {
    client: Client,
    base_url: String,
}

impl HttpPdfService {
    pub fn new(base_url: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        validate_url("api.base_url", base_url)?;

        let mut builder = Client::builder();
        if let Some(seconds) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.api_base_url(), config.request_timeout_seconds())
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    fn file_part(file: &PdfUpload) -> Result<Part> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str("application/pdf")?;
        Ok(part)
    }

    async fn post(&self, route: &str, form: Form) -> Result<Response> {
        let url = self.endpoint(route);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).multipart(form).send().await?;
        tracing::debug!("{} responded with {}", route, response.status());

        if !response.status().is_success() {
            let error = error_from_response(response).await;
            tracing::warn!("{} failed: {}", route, error);
            return Err(error);
        }
        Ok(response)
    }

    async fn post_for_document(&self, route: &str, form: Form) -> Result<Vec<u8>> {
        let response = self.post(route, form).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl PdfService for HttpPdfService {
    async fn unlock(&self, file: &PdfUpload, password: &str) -> Result<Vec<u8>> {
        ensure_pdf(file)?;
        validate_non_empty_string("password", password)?;

        let form = Form::new()
            .part("pdf", Self::file_part(file)?)
            .text("password", password.to_string());
        self.post_for_document(UNLOCK_ROUTE, form).await
    }

    async fn change_background(
        &self,
        file: &PdfUpload,
        options: &BackgroundOptions,
    ) -> Result<Vec<u8>> {
        ensure_pdf(file)?;
        validate_hex_color("background_color", &options.color)?;
        validate_range("opacity", options.opacity, 0.0, 1.0)?;
        if let PageSelection::Pages(pages) = &options.pages {
            if pages.is_empty() || pages.contains(&0) {
                return Err(ToolError::invalid_input(
                    "pages",
                    "select at least one page, numbered from 1",
                ));
            }
        }

        let form = Form::new()
            .part("pdf", Self::file_part(file)?)
            .text("backgroundColor", options.color.clone())
            .text("opacity", options.opacity.to_string())
            .text("pages", options.pages.to_form_value());
        self.post_for_document(CHANGE_BACKGROUND_ROUTE, form).await
    }

    async fn edit(&self, file: &PdfUpload, annotations: &[Annotation]) -> Result<Vec<u8>> {
        ensure_pdf(file)?;
        if annotations.is_empty() {
            return Err(ToolError::invalid_input(
                "annotations",
                "add at least one annotation",
            ));
        }
        validate_annotations(annotations)?;

        let form = Form::new()
            .part("pdf", Self::file_part(file)?)
            .text("annotations", serde_json::to_string(annotations)?);
        self.post_for_document(EDIT_ROUTE, form).await
    }

    async fn advanced_edit(
        &self,
        file: &PdfUpload,
        request: &AdvancedEditRequest,
    ) -> Result<Vec<u8>> {
        ensure_pdf(file)?;
        validate_annotations(&request.annotations)?;
        if let Some(degrees) = request.rotate_degrees {
            if degrees % 90 != 0 {
                return Err(ToolError::invalid_input(
                    "rotation",
                    "rotation must be a multiple of 90 degrees",
                ));
            }
        }
        if let Some(password) = &request.encrypt_password {
            validate_non_empty_string("password", password)?;
        }

        let mut form = Form::new()
            .part("pdf", Self::file_part(file)?)
            .text("annotations", serde_json::to_string(&request.annotations)?);
        if let Some(degrees) = request.rotate_degrees {
            form = form.text("rotation", degrees.rem_euclid(360).to_string());
        }
        if let Some(password) = &request.encrypt_password {
            form = form.text("password", password.clone());
        }
        self.post_for_document(ADVANCED_EDIT_ROUTE, form).await
    }

    async fn page_info(&self, file: &PdfUpload) -> Result<PageInfo> {
        ensure_pdf(file)?;

        let form = Form::new().part("pdf", Self::file_part(file)?);
        let response = self.post(PAGE_INFO_ROUTE, form).await?;
        let info = response.json::<PageInfo>().await?;
        Ok(info)
    }
}
