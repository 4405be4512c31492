//! Path router
//!
//! Exact-match dispatch on `(path, method)` to one of the fixed behaviours.

use crate::reply::Reply;
use crate::routes;
use crate::ServerConfig;

/// Prefix under which static assets are served
pub const STATIC_PREFIX: &str = "/static/";

/// Where a request goes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `GET /`
    Index,
    /// `POST /chat`
    Chat,
    /// `POST /reset`
    Reset,
    /// Anything under `/static/`, any method. Holds the path after the prefix.
    StaticAsset(String),
    NotFound,
}

impl Route {
    /// Resolve a request line. Methods are compared case-sensitively.
    pub fn resolve(path: &str, method: &str) -> Self {
        match (path, method) {
            ("/", "GET") => Route::Index,
            ("/chat", "POST") => Route::Chat,
            ("/reset", "POST") => Route::Reset,
            _ => match path.strip_prefix(STATIC_PREFIX) {
                Some(rest) => Route::StaticAsset(rest.to_string()),
                None => Route::NotFound,
            },
        }
    }
}

/// Run the responder for `route`
pub fn dispatch(route: &Route, body: Option<&[u8]>, config: &ServerConfig) -> Reply {
    match route {
        Route::Index => routes::index::serve_index(&config.asset_root),
        Route::Chat => routes::chat::respond(body),
        Route::Reset => routes::reset::respond(body),
        Route::StaticAsset(rel) => routes::assets::respond(&config.asset_root, rel),
        Route::NotFound => Reply::not_found(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_routes() {
        assert_eq!(Route::resolve("/", "GET"), Route::Index);
        assert_eq!(Route::resolve("/chat", "POST"), Route::Chat);
        assert_eq!(Route::resolve("/reset", "POST"), Route::Reset);
    }

    #[test]
    fn test_wrong_method_is_not_found() {
        assert_eq!(Route::resolve("/", "POST"), Route::NotFound);
        assert_eq!(Route::resolve("/chat", "GET"), Route::NotFound);
        assert_eq!(Route::resolve("/reset", "PUT"), Route::NotFound);
        assert_eq!(Route::resolve("/chat", "post"), Route::NotFound);
    }

    #[test]
    fn test_paths_match_exactly() {
        assert_eq!(Route::resolve("/chat/", "POST"), Route::NotFound);
        assert_eq!(Route::resolve("", "GET"), Route::NotFound);
        assert_eq!(Route::resolve("/index.html", "GET"), Route::NotFound);
        assert_eq!(Route::resolve("/static", "GET"), Route::NotFound);
    }

    #[test]
    fn test_static_any_method() {
        assert_eq!(
            Route::resolve("/static/css/style.css", "GET"),
            Route::StaticAsset("css/style.css".to_string())
        );
        assert_eq!(
            Route::resolve("/static/js/script.js", "DELETE"),
            Route::StaticAsset("js/script.js".to_string())
        );
    }

    #[test]
    fn test_dispatch_not_found_body() {
        let reply = dispatch(&Route::NotFound, None, &ServerConfig::default());
        assert_eq!(reply.status.as_u16(), 404);
        assert_eq!(reply.body, r#"{"error":"Not found"}"#);
    }
}
