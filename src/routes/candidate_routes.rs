use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::path::Path as StdPath;
use tokio::fs;

use crate::dto::candidate_dto::{CreateCandidatePayload, UploadResumeResponse};
use crate::{error::Result, AppState};

fn resume_mime_type(ext: &str) -> Option<&'static str> {
    match ext {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    }
}

async fn save_resume_file(filename: &str, data: &bytes::Bytes) -> Result<(String, String)> {
    let ext = StdPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    let file_type = resume_mime_type(&ext).ok_or_else(|| {
        crate::error::Error::BadRequest(format!("File type .{} is not allowed", ext))
    })?;

    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(crate::error::Error::BadRequest(
            "Invalid PDF file content".into(),
        ));
    }

    let upload_dir = format!("{}/cv", crate::config::get_config().uploads_dir);
    fs::create_dir_all(&upload_dir)
        .await
        .map_err(|e| crate::error::Error::Internal(e.to_string()))?;

    let file_id = uuid::Uuid::new_v4();
    let safe_filename = format!("{}.{}", file_id, ext);
    let file_path = format!("{}/{}", upload_dir, safe_filename);

    fs::write(&file_path, data).await.map_err(|e| {
        tracing::error!("Failed to write resume file: {}", e);
        crate::error::Error::Internal(format!("Failed to save file: {}", e))
    })?;

    Ok((file_path, file_type.to_string()))
}

pub async fn register_candidate(
    State(state): State<AppState>,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl axum::response::IntoResponse> {
    tracing::info!("Registering candidate request received");
    let profile = state.candidate_service.add_candidate(payload).await.map_err(|e| {
        tracing::error!("Failed to register candidate: {}", e);
        e
    })?;

    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse> {
    let profile = state.candidate_service.get_candidate(id).await?;
    match profile {
        Some(profile) => Ok(Json(profile)),
        None => Err(crate::error::Error::NotFound("Candidate not found".into())),
    }
}

pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl axum::response::IntoResponse> {
    let profile = state.candidate_service.update_candidate(id, payload).await?;
    Ok(Json(profile))
}

pub async fn upload_resume(mut multipart: Multipart) -> Result<impl axum::response::IntoResponse> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("cv.bin").to_string();
        let data = field.bytes().await.map_err(|e| {
            tracing::error!("Failed to read resume bytes: {}", e);
            crate::error::Error::BadRequest("Failed to read file upload".into())
        })?;

        if data.is_empty() {
            break;
        }

        let (file_path, file_type) = save_resume_file(&filename, &data).await?;
        return Ok((
            StatusCode::CREATED,
            Json(UploadResumeResponse {
                file_path,
                file_type,
            }),
        ));
    }

    Err(crate::error::Error::BadRequest(
        "No valid resume file provided".into(),
    ))
}
