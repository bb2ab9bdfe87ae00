//! Static route table.
//!
//! # Design Decisions
//! - The path → handler mapping is a fixed table built once at startup
//! - Every route answers GET only (HEAD implied); other methods get 405
//! - Unknown paths fall through to the framework's 404

use axum::{
    routing::{get, MethodRouter},
    Router,
};

use crate::http::handlers;
use crate::http::server::AppState;

/// A route exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Doc,
    Health,
    Qr,
}

/// Every route, in registration order.
pub const ROUTES: [Route; 4] = [Route::Root, Route::Doc, Route::Health, Route::Qr];

impl Route {
    /// Request path the route is bound to.
    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Doc => "/doc",
            Route::Health => "/health",
            Route::Qr => "/qr",
        }
    }

    /// Short label used in metrics.
    pub fn name(self) -> &'static str {
        match self {
            Route::Root => "root",
            Route::Doc => "doc",
            Route::Health => "health",
            Route::Qr => "qr",
        }
    }

    /// Look up the route bound to `path`.
    pub fn from_path(path: &str) -> Option<Self> {
        ROUTES.into_iter().find(|route| route.path() == path)
    }

    fn handler(self) -> MethodRouter<AppState> {
        match self {
            Route::Root => get(handlers::go_away),
            Route::Doc => get(handlers::doc),
            Route::Health => get(handlers::health),
            Route::Qr => get(handlers::qr),
        }
    }
}

/// Build a router holding every route in [`ROUTES`], still awaiting its state.
pub fn route_table() -> Router<AppState> {
    ROUTES.into_iter().fold(Router::new(), |router, route| {
        router.route(route.path(), route.handler())
    })
}
