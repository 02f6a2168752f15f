use anyhow::Result;
use dapsi_tools::adapters::pdf_client::{
    save_result, ADVANCED_EDIT_ROUTE, CHANGE_BACKGROUND_ROUTE, EDIT_ROUTE, UNLOCK_ROUTE,
};
use dapsi_tools::domain::model::{
    AdvancedEditRequest, Annotation, BackgroundOptions, PageSelection, PdfUpload,
};
use dapsi_tools::domain::ports::PdfService;
use dapsi_tools::{HttpPdfService, LocalStorage, ToolError};
use httpmock::prelude::*;
use tempfile::TempDir;

fn sample_pdf() -> PdfUpload {
    PdfUpload {
        file_name: "statement.pdf".to_string(),
        bytes: b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\n%%EOF".to_vec(),
    }
}

#[tokio::test]
async fn test_unlock_returns_document_and_saves_it() -> Result<()> {
    let server = MockServer::start_async().await;
    let unlock_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(UNLOCK_ROUTE)
                .header_exists("content-type")
                .body_contains("name=\"password\"")
                .body_contains("hunter2")
                .body_contains("filename=\"statement.pdf\"");
            then.status(200)
                .header("Content-Type", "application/pdf")
                .body("%PDF-1.7 unlocked");
        })
        .await;

    let service = HttpPdfService::new(&server.base_url(), Some(10))?;
    let bytes = service.unlock(&sample_pdf(), "hunter2").await?;
    unlock_mock.assert_async().await;
    assert_eq!(bytes, b"%PDF-1.7 unlocked");

    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let name = save_result(&storage, "unlocked", "statement.pdf", &bytes).await?;
    assert_eq!(name, "unlocked-statement.pdf");
    assert_eq!(std::fs::read(temp_dir.path().join(name))?, b"%PDF-1.7 unlocked");

    Ok(())
}

#[tokio::test]
async fn test_server_error_message_comes_from_json_body() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(UNLOCK_ROUTE);
            then.status(400)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({ "error": "Incorrect password" }));
        })
        .await;

    let service = HttpPdfService::new(&server.base_url(), None)?;
    let err = service.unlock(&sample_pdf(), "wrong").await.unwrap_err();

    match err {
        ToolError::ServerError { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Incorrect password");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_server_error_without_json_falls_back_to_status() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(CHANGE_BACKGROUND_ROUTE);
            then.status(502).body("<html>Bad Gateway</html>");
        })
        .await;

    let service = HttpPdfService::new(&server.base_url(), None)?;
    let options = BackgroundOptions {
        color: "#FFEEDD".to_string(),
        opacity: 0.5,
        pages: PageSelection::All,
    };
    let err = service
        .change_background(&sample_pdf(), &options)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Server error: 502");
    assert_eq!(err.user_friendly_message(), "Server error: 502");
    Ok(())
}

#[tokio::test]
async fn test_invalid_inputs_never_reach_the_server() -> Result<()> {
    let server = MockServer::start_async().await;
    let any_mock = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).body("%PDF-1.7");
        })
        .await;

    let service = HttpPdfService::new(&server.base_url(), None)?;

    let not_pdf = PdfUpload {
        file_name: "notes.txt".to_string(),
        bytes: b"plain text".to_vec(),
    };
    assert!(matches!(
        service.unlock(&not_pdf, "pw").await,
        Err(ToolError::InvalidFileType { .. })
    ));
    assert!(matches!(
        service.unlock(&sample_pdf(), "   ").await,
        Err(ToolError::InvalidInputError { .. })
    ));

    let bad_color = BackgroundOptions {
        color: "red".to_string(),
        opacity: 1.0,
        pages: PageSelection::All,
    };
    assert!(service.change_background(&sample_pdf(), &bad_color).await.is_err());

    assert!(service.edit(&sample_pdf(), &[]).await.is_err());

    let rotated = AdvancedEditRequest {
        rotate_degrees: Some(45),
        ..Default::default()
    };
    assert!(service.advanced_edit(&sample_pdf(), &rotated).await.is_err());

    any_mock.assert_hits_async(0).await;
    Ok(())
}

fn stamp(page: u32) -> Annotation {
    Annotation {
        page,
        x: 100.0,
        y: 50.0,
        text: "Paid".to_string(),
        font_size: 12.0,
        color: "#000000".to_string(),
    }
}

#[tokio::test]
async fn test_edit_posts_annotations_as_json() -> Result<()> {
    let server = MockServer::start_async().await;
    let edit_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(EDIT_ROUTE)
                .body_contains("name=\"annotations\"")
                .body_contains("\"page\":2")
                .body_contains("\"text\":\"Paid\"")
                .body_contains("\"fontSize\":12.0")
                .body_contains("filename=\"statement.pdf\"");
            then.status(200).body("%PDF-1.7 stamped");
        })
        .await;

    let service = HttpPdfService::new(&server.base_url(), None)?;
    let bytes = service.edit(&sample_pdf(), &[stamp(2)]).await?;

    edit_mock.assert_async().await;
    assert_eq!(bytes, b"%PDF-1.7 stamped");
    Ok(())
}

#[tokio::test]
async fn test_page_zero_and_out_of_range_opacity_are_rejected_locally() -> Result<()> {
    let server = MockServer::start_async().await;
    let any_mock = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).body("%PDF-1.7");
        })
        .await;

    let service = HttpPdfService::new(&server.base_url(), None)?;

    assert!(matches!(
        service.edit(&sample_pdf(), &[stamp(1), stamp(0)]).await,
        Err(ToolError::InvalidInputError { .. })
    ));
    let request = AdvancedEditRequest {
        annotations: vec![stamp(0)],
        ..Default::default()
    };
    assert!(matches!(
        service.advanced_edit(&sample_pdf(), &request).await,
        Err(ToolError::InvalidInputError { .. })
    ));

    for opacity in [-0.1, 1.5, f64::NAN] {
        let options = BackgroundOptions {
            color: "#FFFFFF".to_string(),
            opacity,
            pages: PageSelection::All,
        };
        assert!(matches!(
            service.change_background(&sample_pdf(), &options).await,
            Err(ToolError::InvalidInputError { .. })
        ));
    }

    any_mock.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_advanced_edit_sends_annotations_rotation_and_password() -> Result<()> {
    let server = MockServer::start_async().await;
    let edit_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(ADVANCED_EDIT_ROUTE)
                .body_contains("\"text\":\"Approved\"")
                .body_contains("\"fontSize\":14.0")
                .body_contains("name=\"rotation\"")
                .body_contains("270")
                .body_contains("name=\"password\"");
            then.status(200).body("%PDF-1.7 edited");
        })
        .await;

    let service = HttpPdfService::new(&server.base_url(), None)?;
    let request = AdvancedEditRequest {
        annotations: vec![Annotation {
            page: 1,
            x: 72.0,
            y: 700.0,
            text: "Approved".to_string(),
            font_size: 14.0,
            color: "#FF0000".to_string(),
        }],
        rotate_degrees: Some(-90),
        encrypt_password: Some("s3cret".to_string()),
    };

    let bytes = service.advanced_edit(&sample_pdf(), &request).await?;
    edit_mock.assert_async().await;
    assert_eq!(bytes, b"%PDF-1.7 edited");
    Ok(())
}

#[tokio::test]
async fn test_page_info_parses_json() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/pdf-page-info");
            then.status(200).json_body(serde_json::json!({
                "totalPages": 2,
                "pages": [
                    { "pageNumber": 1, "width": 612.0, "height": 792.0 },
                    { "pageNumber": 2, "width": 595.0, "height": 842.0 }
                ]
            }));
        })
        .await;

    let service = HttpPdfService::new(&server.base_url(), None)?;
    let info = service.page_info(&sample_pdf()).await?;

    assert_eq!(info.total_pages, 2);
    assert_eq!(info.pages[1].height, 842.0);
    Ok(())
}
