use std::path::{Path as StdPath, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{ApiError, ApiResult},
    events::ServerEvent,
    main_lib::AppState,
};

const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

const GIF_CONTENT_TYPES: &[&str] = &["image/gif", "image/png", "image/jpeg", "image/webp"];
const GIF_EXTENSIONS: &[&str] = &["gif", "png", "jpg", "jpeg", "webp"];

const AUDIO_CONTENT_TYPES: &[&str] = &[
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/ogg",
    "audio/webm",
    "audio/aac",
    "audio/m4a",
    "audio/x-m4a",
];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "webm", "aac", "m4a"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GifEntry {
    filename: String,
    url: String,
    audio_url: Option<String>,
    uploaded_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioEntry {
    filename: String,
    url: String,
    uploaded_at: DateTime<Utc>,
}

fn has_allowed_extension(filename: &str, allowed: &[&str]) -> bool {
    StdPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| allowed.iter().any(|a| a.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Uploaded files get generated names, so anything with a path separator
/// in it can only be a traversal attempt.
fn checked_filename(filename: &str) -> Result<&str, ApiError> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        return Err(ApiError::BadRequest("Invalid filename".to_string()));
    }
    Ok(filename)
}

fn unique_name(prefix: &str, original: &str) -> String {
    let ext = StdPath::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();
    let suffix: u32 = rand::random::<u32>() % 1_000_000_000;
    format!("{}-{}-{}{}", prefix, Utc::now().timestamp_millis(), suffix, ext)
}

fn list_dir(dir: &StdPath, allowed_exts: &[&str]) -> std::io::Result<Vec<(String, DateTime<Utc>)>> {
    let mut entries = Vec::new();
    if !dir.exists() {
        return Ok(entries);
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !has_allowed_extension(&name, allowed_exts) {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        entries.push((name, DateTime::<Utc>::from(modified)));
    }
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(entries)
}

async fn list_gifs(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<GifEntry>>> {
    let dir = state.upload_dir.join("gifs");
    let files = list_dir(&dir, GIF_EXTENSIONS)
        .map_err(|e| ApiError::Internal(format!("Failed to list gifs: {}", e)))?;
    let map = state.gif_audio.read().unwrap();
    let gifs = files
        .into_iter()
        .map(|(filename, uploaded_at)| GifEntry {
            url: format!("/uploads/gifs/{}", filename),
            audio_url: map.get(&filename).cloned(),
            filename,
            uploaded_at,
        })
        .collect();
    Ok(Json(gifs))
}

async fn list_audio(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<AudioEntry>>> {
    let dir = state.upload_dir.join("audio");
    let files = list_dir(&dir, AUDIO_EXTENSIONS)
        .map_err(|e| ApiError::Internal(format!("Failed to list audio files: {}", e)))?;
    let audio = files
        .into_iter()
        .map(|(filename, uploaded_at)| AudioEntry {
            url: format!("/uploads/audio/{}", filename),
            filename,
            uploaded_at,
        })
        .collect();
    Ok(Json(audio))
}

async fn save_upload(
    mut multipart: Multipart,
    field_name: &str,
    prefix: &str,
    content_types: &[&str],
    target_dir: PathBuf,
) -> Result<String, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_types.contains(&content_type.as_str()) {
            return Err(ApiError::BadRequest(format!(
                "Unsupported content type: {}",
                content_type
            )));
        }
        let original = field.file_name().unwrap_or("upload").to_string();
        let filename = unique_name(prefix, &original);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
        tokio::fs::write(target_dir.join(&filename), &data)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to store upload: {}", e)))?;
        return Ok(filename);
    }
    Err(ApiError::BadRequest("No file uploaded".to_string()))
}

async fn upload_gif(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Json<GifEntry>> {
    let filename = save_upload(
        multipart,
        "gif",
        "gif",
        GIF_CONTENT_TYPES,
        state.upload_dir.join("gifs"),
    )
    .await?;
    Ok(Json(GifEntry {
        url: format!("/uploads/gifs/{}", filename),
        audio_url: None,
        filename,
        uploaded_at: Utc::now(),
    }))
}

async fn upload_audio(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Json<AudioEntry>> {
    let filename = save_upload(
        multipart,
        "audio",
        "audio",
        AUDIO_CONTENT_TYPES,
        state.upload_dir.join("audio"),
    )
    .await?;
    Ok(Json(AudioEntry {
        url: format!("/uploads/audio/{}", filename),
        filename,
        uploaded_at: Utc::now(),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssociateAudioBody {
    gif_filename: String,
    audio_url: Option<String>,
}

async fn associate_audio(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AssociateAudioBody>,
) -> ApiResult<Json<Value>> {
    if body.gif_filename.is_empty() {
        return Err(ApiError::BadRequest("gifFilename is required".to_string()));
    }
    {
        let mut map = state.gif_audio.write().unwrap();
        match &body.audio_url {
            Some(url) => {
                map.insert(body.gif_filename.clone(), url.clone());
            }
            None => {
                map.remove(&body.gif_filename);
            }
        }
    }
    Ok(Json(json!({
        "success": true,
        "gifFilename": body.gif_filename,
        "audioUrl": body.audio_url,
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TriggerBody {
    gif_url: Option<String>,
    audio_url: Option<String>,
}

async fn trigger_gif(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TriggerBody>,
) -> ApiResult<Json<Value>> {
    let gif_url = body
        .gif_url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::BadRequest("gifUrl is required".to_string()))?;

    // Fall back to the stored association when the caller did not pick
    // an explicit audio track.
    let audio_url = body.audio_url.or_else(|| {
        let filename = gif_url.rsplit('/').next()?;
        state.gif_audio.read().unwrap().get(filename).cloned()
    });

    state.event_bus.publish(ServerEvent::GifTrigger {
        gif_url,
        audio_url: audio_url.clone(),
    });

    Ok(Json(json!({
        "success": true,
        "message": "GIF triggered on all displays",
        "audioUrl": audio_url,
    })))
}

async fn delete_gif(
    Path(filename): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let filename = checked_filename(&filename)?;
    let path = state.upload_dir.join("gifs").join(filename);
    if !path.exists() {
        return Err(ApiError::NotFound);
    }
    tokio::fs::remove_file(&path)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to delete gif: {}", e)))?;
    state.gif_audio.write().unwrap().remove(filename);
    Ok(Json(json!({ "success": true, "message": "GIF deleted" })))
}

async fn delete_audio(
    Path(filename): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let filename = checked_filename(&filename)?;
    let path = state.upload_dir.join("audio").join(filename);
    if !path.exists() {
        return Err(ApiError::NotFound);
    }
    tokio::fs::remove_file(&path)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to delete audio: {}", e)))?;
    // Drop every association that pointed at the deleted track.
    state
        .gif_audio
        .write()
        .unwrap()
        .retain(|_, url| !url.contains(filename));
    Ok(Json(json!({ "success": true, "message": "Audio file deleted" })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/gifs", get(list_gifs))
        .route("/gifs/upload", post(upload_gif))
        .route("/gifs/upload-audio", post(upload_audio))
        .route("/gifs/associate-audio", post(associate_audio))
        .route("/gifs/trigger", post(trigger_gif))
        .route("/gifs/audio", get(list_audio))
        .route("/gifs/audio/{filename}", delete(delete_audio))
        .route("/gifs/{filename}", delete(delete_gif))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
