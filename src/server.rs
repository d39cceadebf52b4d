//! File-backed data server for the dashboard.
//!
//! Serves the analysis output as-is; filtering stays on the client.

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::environment::ServerConfig;

pub const DATA_ROUTE: &str = "/api/data";
pub const MISSING_DATA_MESSAGE: &str = "Data not found. Please run the data generation step first.";

#[derive(Clone)]
struct AppState {
    data_file: Arc<PathBuf>,
}

pub fn router(data_file: PathBuf) -> Router {
    Router::new()
        .route(DATA_ROUTE, get(get_data))
        .with_state(AppState {
            data_file: Arc::new(data_file),
        })
}

/// Binds and serves until the process is stopped.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(
        "Serving {} on http://{}{}",
        config.data_file.display(),
        addr,
        DATA_ROUTE
    );

    axum::serve(listener, router(config.data_file).into_make_service())
        .await
        .context("Data server stopped unexpectedly")?;
    Ok(())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Reads the data file on every request so a regenerated file is picked up.
async fn get_data(State(state): State<AppState>) -> Response {
    let path = state.data_file.as_path();

    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Data file {} does not exist", path.display());
            return error_response(StatusCode::NOT_FOUND, MISSING_DATA_MESSAGE);
        }
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    match serde_json::from_str::<Value>(&contents) {
        Ok(data) => Json(data).into_response(),
        Err(e) => {
            error!("Failed to parse {}: {}", path.display(), e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DataSource, FetchError};
    use std::io::Write;
    use url::Url;

    async fn spawn(data_file: PathBuf) -> DataSource {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(data_file)).await.unwrap();
        });
        let url = Url::parse(&format!("http://{}{}", addr, DATA_ROUTE)).unwrap();
        DataSource::new(url).unwrap()
    }

    #[tokio::test]
    async fn test_serves_data_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"Title":"Rates hold","Summary":"Pause","Source":"FT","Link":"https://example.com",
                "sentiment_score":0.0,"impact_score":3.2,"impact_level":"Neutral",
                "event_flag":"Normal","topic_cluster":1}}]"#
        )
        .unwrap();

        let source = spawn(file.path().to_path_buf()).await;
        let dataset = source.load().await.unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset[0].source, "FT");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = spawn(dir.path().join("data.json")).await;

        match source.load().await {
            Err(FetchError::Status { status, detail }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(detail, MISSING_DATA_MESSAGE);
            }
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_file_is_server_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{truncated").unwrap();

        let source = spawn(file.path().to_path_buf()).await;
        match source.load().await {
            Err(FetchError::Status { status, .. }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }
}
