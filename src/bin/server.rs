//! Load case HTTP server

use axum::{
    extract::Json,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use tline_loads::export;
use tline_loads::prelude::*;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    success: bool,
    rows: Vec<GeneratedForceRow>,
    overload_factors: Vec<OverloadFactorEntry>,
}

#[derive(Debug, Serialize)]
struct VectorTableResponse {
    success: bool,
    columns: Vec<ExportColumn>,
    rows: Vec<TableRow>,
}

/// Which table to export
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ExportTarget {
    Generated,
    Vector,
    Mapped,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ExportFormat {
    Csv,
    Tsv,
    Xlsx,
}

#[derive(Debug, Deserialize)]
struct ExportRequest {
    project: ProjectFile,
    target: ExportTarget,
    format: ExportFormat,
    #[serde(default)]
    sheet_name: Option<String>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("{0}")]
    LoadCase(#[from] LoadGenError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::LoadCase(LoadGenError::IoError(_) | LoadGenError::ZipError(_) | LoadGenError::CsvError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::LoadCase(_) => StatusCode::BAD_REQUEST,
        };
        log::warn!("request failed: {}", self);

        let body = Json(json!({
            "success": false,
            "error": self.to_string()
        }));
        (status, body).into_response()
    }
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Generate per-joint force rows
async fn generate_handler(Json(file): Json<ProjectFile>) -> Result<Json<GenerateResponse>, ApiError> {
    let mut project = LoadCaseProject::from_project_file(file);
    let rows = project.generate()?.to_vec();
    log::info!("generated {} force rows", rows.len());

    Ok(Json(GenerateResponse {
        success: true,
        rows,
        overload_factors: project.overload_factors().entries().to_vec(),
    }))
}

/// Build the vector load case table, generating first when the
/// generator produces rows
async fn vector_table_handler(Json(file): Json<ProjectFile>) -> Result<Json<VectorTableResponse>, ApiError> {
    let project = build_vector(file)?;
    Ok(Json(VectorTableResponse {
        success: true,
        columns: VectorTable::columns(),
        rows: project.vector_table().to_table_rows(),
    }))
}

async fn export_handler(Json(request): Json<ExportRequest>) -> Result<Response, ApiError> {
    let (columns, rows) = match request.target {
        ExportTarget::Generated => {
            let mut project = LoadCaseProject::from_project_file(request.project);
            let rows: Vec<TableRow> = project
                .generate()?
                .iter()
                .map(GeneratedForceRow::to_table_row)
                .collect();
            (GeneratedForceRow::columns(), rows)
        }
        ExportTarget::Vector => {
            let project = build_vector(request.project)?;
            (VectorTable::columns(), project.vector_table().to_table_rows())
        }
        ExportTarget::Mapped => {
            let project = LoadCaseProject::from_project_file(request.project);
            (project.display_columns(), project.table().rows.clone())
        }
    };

    let response = match request.format {
        ExportFormat::Csv => (
            [(header::CONTENT_TYPE, "text/csv")],
            export::to_csv(&columns, &rows)?,
        )
            .into_response(),
        ExportFormat::Tsv => (
            [(header::CONTENT_TYPE, "text/tab-separated-values")],
            export::to_tsv(&columns, &rows),
        )
            .into_response(),
        ExportFormat::Xlsx => {
            let sheet = request.sheet_name.as_deref().unwrap_or(DEFAULT_SHEET_NAME);
            (
                [(
                    header::CONTENT_TYPE,
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                )],
                export::to_xlsx(&columns, &rows, sheet)?,
            )
                .into_response()
        }
    };
    Ok(response)
}

/// Vector tables use generated labels when generation succeeds and the
/// primary table labels otherwise
fn build_vector(file: ProjectFile) -> Result<LoadCaseProject, ApiError> {
    let mut project = LoadCaseProject::from_project_file(file);
    match project.generate() {
        Ok(_) | Err(LoadGenError::NoLoadCases) => {}
        Err(e) => return Err(e.into()),
    }
    project.build_vector_table();
    Ok(project)
}

fn bind_address() -> anyhow::Result<SocketAddr> {
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8086".to_string());
    Ok(format!("{}:{}", host, port).parse()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/generate", post(generate_handler))
        .route("/api/v1/vector-table", post(vector_table_handler))
        .route("/api/v1/export", post(export_handler))
        .layer(cors);

    let addr = bind_address()?;
    println!("Load case server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Generate:     POST /api/v1/generate");
    println!("  Vector table: POST /api/v1/vector-table");
    println!("  Export:       POST /api/v1/export");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
