//! App Router

use salvo::Router;

use crate::{sessions, timers, widget};

/// Routes mounted under `/api/counter`.
///
/// `timers/stats` is registered ahead of `timers/{id}` so it is not read as an
/// id.
pub fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("widget/{shop}").get(widget::handler))
        .push(
            Router::with_path("timers")
                .hoop(sessions::middleware::handler)
                .get(timers::index::handler)
                .post(timers::create::handler)
                .push(Router::with_path("stats").get(timers::stats::handler))
                .push(
                    Router::with_path("{id}")
                        .get(timers::get::handler)
                        .patch(timers::update::handler)
                        .put(timers::update::handler)
                        .delete(timers::delete::handler)
                        .push(Router::with_path("toggle").post(timers::toggle::handler)),
                ),
        )
}
