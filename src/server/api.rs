//! # HTTP API
//!
//! axum routes in front of [`StegoService`]:
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | GET  | `/api/health` | - |
//! | POST | `/api/encode` | multipart `image`, `message`, `a`, `b` |
//! | POST | `/api/decode` | multipart `image`, `a`, `b` |
//! | POST | `/api/params/check` | JSON `{a, b, text?}` |
//! | POST | `/api/letters` | JSON `{text, a, k, decrypt?}` |
//!
//! Every error is answered with JSON `{error, kind}`. Input problems are
//! `400 Bad Request`; anything else is `500`.

use axum::{
    extract::{
        multipart::{Multipart, MultipartError},
        DefaultBodyLimit, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose, Engine as _};
use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::server::{ParamCheck, StegoService};
use crate::cipher::{CharTrace, CipherParams};
use crate::error::{CodecError, ParamError};
use crate::processing::preview::PixelMatrix;

/// File name suggested for the downloaded carrier.
pub const OUTPUT_FILE_NAME: &str = "imatge_encriptada.png";

/// Room for multipart boundaries and the text fields on top of the image.
const MULTIPART_SLACK: usize = 64 * 1024;

/// Shared, read-only state of the HTTP server.
pub struct AppState {
    pub service: StegoService,
}

// ============================================================================
// RESPONSE TYPES
// ============================================================================

#[derive(Debug, Serialize)]
pub struct EncodeResponse {
    pub success: bool,
    pub message: String,
    pub formula: String,
    /// Characters hidden in the image
    pub length: usize,
    pub file_name: String,
    pub image_base64: String,
    pub details: Vec<CharTrace>,
    pub preview_before: PixelMatrix,
    pub preview_after: PixelMatrix,
}

#[derive(Debug, Serialize)]
pub struct DecodeResponse {
    pub success: bool,
    pub message: String,
    pub params: CipherParams,
    pub preview: PixelMatrix,
}

#[derive(Debug, Serialize)]
pub struct LettersResponse {
    pub success: bool,
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

// ============================================================================
// REQUEST TYPES
// ============================================================================

/// Body of `/api/params/check`. `a` and `b` may be numbers or strings.
#[derive(Debug, Deserialize)]
pub struct ParamCheckRequest {
    pub a: serde_json::Value,
    pub b: serde_json::Value,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LettersRequest {
    pub text: String,
    pub a: i64,
    pub k: i64,
    #[serde(default)]
    pub decrypt: bool,
}

/// Fields collected from an encode / decode upload.
#[derive(Debug, Default)]
struct UploadForm {
    image: Vec<u8>,
    message: String,
    a: String,
    b: String,
}

// ============================================================================
// ERRORS
// ============================================================================

/// Error answered to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn bad_request(kind: &str, error: impl ToString) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse {
                error: error.to_string(),
                kind: kind.to_string(),
            },
        }
    }
}

impl From<CodecError> for ApiError {
    fn from(e: CodecError) -> Self {
        let status = if e.is_user_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            body: ErrorResponse {
                error: e.to_string(),
                kind: e.kind().to_string(),
            },
        }
    }
}

impl From<ParamError> for ApiError {
    fn from(e: ParamError) -> Self {
        CodecError::from(e).into()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<CodecError>() {
            Ok(codec) => codec.into(),
            Err(e) => {
                error!("Internal error: {:#}", e);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorResponse {
                        error: format!("Internal error: {}", e),
                        kind: "Internal".to_string(),
                    },
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Build the application router.
///
/// When `static_dir` is set, files from it are served for every path that
/// is not an API route.
pub fn router(state: Arc<AppState>, static_dir: Option<&str>) -> Router {
    let body_limit = state.service.limits().max_image_bytes + MULTIPART_SLACK;

    let app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/encode", post(encode_handler))
        .route("/api/decode", post(decode_handler))
        .route("/api/params/check", post(check_params_handler))
        .route("/api/letters", post(letters_handler));

    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    app.layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "modular-stego",
        "cipher": "(a*x + b) mod 256, toy cipher, not secure",
        "channel": "blue LSB"
    }))
}

/// Map a multipart read failure. A body cut off by the upload limit is
/// reported as an oversized image, like any other too-large upload.
fn multipart_error(e: MultipartError, what: &str, limit: usize) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return CodecError::ImageTooLarge { size: None, limit }.into();
    }
    ApiError::bad_request("MalformedRequest", format!("Failed to read {}: {}", what, e))
}

async fn read_form(mut multipart: Multipart, limit: usize) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "multipart data", limit))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, "image data", limit))?;
                form.image = data.to_vec();
            }
            "message" => {
                form.message = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, "field 'message'", limit))?;
            }
            "a" => {
                form.a = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, "field 'a'", limit))?;
            }
            "b" => {
                form.b = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, "field 'b'", limit))?;
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn encode_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<EncodeResponse>, ApiError> {
    let form = read_form(multipart, state.service.limits().max_image_bytes).await?;

    // Same order as the form: message, image, then key
    if form.message.is_empty() {
        return Err(CodecError::MissingInput("a message to hide").into());
    }
    if form.image.is_empty() {
        return Err(CodecError::MissingInput("an image").into());
    }
    let params = CipherParams::parse(&form.a, &form.b)?;

    let request_id = rand::random::<u64>();
    let outcome = state
        .service
        .encode(request_id, form.image, form.message, params)
        .await?;

    Ok(Json(EncodeResponse {
        success: true,
        message: format!(
            "Message of {} characters encrypted with {} and hidden in the image (toy cipher, not secure)",
            outcome.length, outcome.params
        ),
        formula: outcome.params.to_string(),
        length: outcome.length,
        file_name: OUTPUT_FILE_NAME.to_string(),
        image_base64: general_purpose::STANDARD.encode(&outcome.png),
        details: outcome.details,
        preview_before: outcome.preview_before,
        preview_after: outcome.preview_after,
    }))
}

async fn decode_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<DecodeResponse>, ApiError> {
    let form = read_form(multipart, state.service.limits().max_image_bytes).await?;

    if form.image.is_empty() {
        return Err(CodecError::MissingInput("an image").into());
    }
    let params = CipherParams::parse(&form.a, &form.b)?;

    let request_id = rand::random::<u64>();
    let outcome = state.service.decode(request_id, form.image, params).await?;

    Ok(Json(DecodeResponse {
        success: true,
        message: outcome.message,
        params: outcome.params,
        preview: outcome.preview,
    }))
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

async fn check_params_handler(
    Json(request): Json<ParamCheckRequest>,
) -> Result<Json<ParamCheck>, ApiError> {
    let check = StegoService::check_params(
        &value_text(&request.a),
        &value_text(&request.b),
        request.text.as_deref(),
    )?;
    Ok(Json(check))
}

async fn letters_handler(
    Json(request): Json<LettersRequest>,
) -> Result<Json<LettersResponse>, ApiError> {
    let result = StegoService::letters(&request.text, request.a, request.k, request.decrypt)?;
    Ok(Json(LettersResponse {
        success: true,
        result,
    }))
}
