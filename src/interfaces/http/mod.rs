use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crate::application::FilePreviewUseCase;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::activity_log::ActivityLog;
use crate::infrastructure::upload_source::UploadSource;

pub struct HttpState {
    pub file_preview: FilePreviewUseCase,
    pub logs: ActivityLog,
    pub max_upload_bytes: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Request body of `POST /api/upload`, read chunk by chunk
pub struct PayloadUpload {
    file_name: String,
    payload: web::Payload,
    limit: usize,
}

impl PayloadUpload {
    pub fn new(file_name: String, payload: web::Payload, limit: usize) -> Self {
        Self {
            file_name,
            payload,
            limit,
        }
    }
}

#[async_trait(?Send)]
impl UploadSource for PayloadUpload {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    async fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();

        while let Some(chunk) = self.payload.next().await {
            let chunk =
                chunk.map_err(|e| AppError::IoError(format!("Failed to read upload: {}", e)))?;

            if bytes.len() + chunk.len() > self.limit {
                return Err(AppError::ValidationError(format!(
                    "Upload exceeds the {} byte limit",
                    self.limit
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(bytes)
    }
}

fn error_response(err: &AppError) -> HttpResponse {
    let body = ErrorBody {
        error: err.user_message().to_string(),
    };

    match err {
        AppError::UnsupportedFormat(_) => HttpResponse::UnsupportedMediaType().json(body),
        AppError::ValidationError(_) => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

#[get("/")]
async fn index(data: web::Data<HttpState>) -> impl Responder {
    let state = data.file_preview.session().current();
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(data.file_preview.renderer().render_page(&state))
}

#[get("/preview")]
async fn preview_fragment(data: web::Data<HttpState>) -> impl Responder {
    let state = data.file_preview.session().current();
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(data.file_preview.renderer().render_body(&state))
}

#[post("/upload")]
async fn upload(
    data: web::Data<HttpState>,
    query: web::Query<UploadQuery>,
    payload: web::Payload,
) -> impl Responder {
    let Some(file_name) = query
        .file_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
    else {
        data.logs.warn("HttpApi", "Upload without fileName");
        return error_response(&AppError::ValidationError(
            "fileName query parameter is required".to_string(),
        ));
    };

    let mut source = PayloadUpload::new(file_name.to_string(), payload, data.max_upload_bytes);

    match data.file_preview.preview_upload(&mut source).await {
        Ok(state) => HttpResponse::Ok().json(state),
        Err(e) => error_response(&e),
    }
}

#[get("/preview")]
async fn preview_state(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.file_preview.session().current())
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.logs.snapshot())
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Page routes plus the `/api` scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(preview_fragment).service(
        web::scope("/api")
            .service(upload)
            .service(preview_state)
            .service(get_logs)
            .service(health),
    );
}

pub fn start_server(state: web::Data<HttpState>, host: &str, port: u16) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new().wrap(cors).app_data(state.clone()).configure(configure)
    })
    // One event loop: uploads are handled cooperatively, never in parallel
    .workers(1)
    .bind((host, port))?
    .run();

    Ok(server)
}
