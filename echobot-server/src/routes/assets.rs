//! Static assets under `/static/`
//!
//! Files are read from `<asset_root>/static/`. The content type comes from
//! the extension alone. Anything that cannot be served falls through to the
//! regular 404.

use crate::error::AssetError;
use crate::reply::Reply;
use crate::ServerConfig;
use axum::{
    extract::{Path as UrlPath, State},
    http::StatusCode,
};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Directory under the asset root holding static files
pub const STATIC_DIR: &str = "static";

/// Content type for an asset path
pub fn content_type_for(path: &str) -> &'static str {
    if path.ends_with(".css") {
        "text/css"
    } else if path.ends_with(".js") {
        "application/javascript"
    } else {
        "text/plain"
    }
}

/// Map a request path (relative to `/static/`) to a file inside the asset root.
///
/// Rejects empty paths, null bytes, absolute paths and any `..` component.
pub fn resolve_asset_path(asset_root: &Path, rel: &str) -> Result<PathBuf, AssetError> {
    if rel.is_empty() || rel.contains('\0') {
        return Err(AssetError::Traversal(rel.replace('\0', "\\0")));
    }

    let mut resolved = asset_root.join(STATIC_DIR);
    for component in Path::new(rel).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                tracing::warn!(path = %rel, "Blocked asset path escaping the asset root");
                return Err(AssetError::Traversal(rel.to_string()));
            }
        }
    }
    Ok(resolved)
}

/// Load an asset as text
pub fn load_asset(asset_root: &Path, rel: &str) -> Result<Reply, AssetError> {
    let path = resolve_asset_path(asset_root, rel)?;
    if !path.is_file() {
        return Err(AssetError::NotFound(path));
    }

    let body = std::fs::read_to_string(&path).map_err(|source| AssetError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(Reply::new(StatusCode::OK, content_type_for(rel), body))
}

/// Serve an asset, or the 404 reply
pub fn respond(asset_root: &Path, rel: &str) -> Reply {
    match load_asset(asset_root, rel) {
        Ok(reply) => reply,
        Err(e) => {
            tracing::debug!(error = %e, "Static asset unavailable");
            Reply::not_found()
        }
    }
}

pub async fn static_handler(
    State(config): State<Arc<ServerConfig>>,
    UrlPath(path): UrlPath<String>,
) -> Reply {
    respond(&config.asset_root, &path)
}
