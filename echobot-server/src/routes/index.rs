//! Landing page

use crate::reply::Reply;
use crate::ServerConfig;
use axum::{extract::State, http::StatusCode};
use echobot_core::ErrorBody;
use std::path::Path;
use std::sync::Arc;

/// Location of the page relative to the asset root
pub const INDEX_PATH: &str = "templates/index.html";

/// Read and return the landing page
pub fn serve_index(asset_root: &Path) -> Reply {
    let path = asset_root.join(INDEX_PATH);
    match std::fs::read_to_string(&path) {
        Ok(html) => Reply::html(html),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to load index page");
            Reply::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Failed to load HTML").with_details(e),
            )
        }
    }
}

pub async fn index_handler(State(config): State<Arc<ServerConfig>>) -> Reply {
    serve_index(&config.asset_root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_index_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let reply = serve_index(dir.path());

        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(json["error"], "Failed to load HTML");
        assert!(json["details"].is_string());
    }

    #[test]
    fn test_index_served_as_html() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("templates")).unwrap();
        std::fs::write(dir.path().join(INDEX_PATH), "<h1>hi</h1>").unwrap();

        let reply = serve_index(dir.path());
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.content_type, "text/html");
        assert_eq!(reply.body, "<h1>hi</h1>");
    }
}
