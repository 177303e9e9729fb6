//! Named action and read routes carried over from the original URL table.
//!
//! Mounted at the application root, alongside the `/v1` resource tree. The
//! original table used trailing slashes and clients still send them; there
//! is no automatic redirect, so each path is mounted in both forms.

use axum::routing::{get, post, MethodRouter};
use axum::Router;

use crate::handlers::{civis, threads};
use crate::state::AppState;

/// Mount a route at `path` and `path/`.
fn both(router: Router<AppState>, path: &str, method_router: MethodRouter<AppState>) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{path}/"), method_router)
}

/// ```text
/// GET  /thread_data/{thread_id}             thread detail with derived views
/// GET  /civi_data/{civi_id}                 single civi with score
/// GET  /threads/{thread_id}/civis           civis for a thread
/// GET  /response_data/{thread_id}/{civi_id} responses to a civi
/// POST /new_thread                          create thread
/// POST /edit_thread                         update thread
/// POST /new_civi                            create civi
/// POST /edit_civi                           update civi
/// POST /delete_civi                         delete civi
/// POST /rate_civi                           cast a vote
/// POST /upload_images                       attach civi image metadata
/// POST /upload_image                        set thread image url
/// ```
///
/// Each accepts an optional trailing slash.
pub fn router() -> Router<AppState> {
    let mut router = Router::new();
    for (path, method_router) in [
        ("/thread_data/{thread_id}", get(threads::thread_data)),
        ("/civi_data/{civi_id}", get(civis::get_by_id)),
        ("/threads/{thread_id}/civis", get(civis::list_by_thread)),
        (
            "/response_data/{thread_id}/{civi_id}",
            get(civis::list_responses),
        ),
        ("/new_thread", post(threads::create)),
        ("/edit_thread", post(threads::edit)),
        ("/new_civi", post(civis::create)),
        ("/edit_civi", post(civis::edit)),
        ("/delete_civi", post(civis::delete_action)),
        ("/rate_civi", post(civis::rate)),
        ("/upload_images", post(civis::upload_images)),
        ("/upload_image", post(threads::upload_image)),
    ] {
        router = both(router, path, method_router);
    }
    router
}
