//! Session middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{debug, error};

use countdown_app::sessions::SessionsServiceError;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let shop = match state.app.sessions.authenticate_bearer(token).await {
        Ok(shop) => shop,
        Err(
            source @ (SessionsServiceError::InvalidToken(_)
            | SessionsServiceError::InvalidDestination
            | SessionsServiceError::IssuerMismatch
            | SessionsServiceError::InvalidShop(_)),
        ) => {
            debug!("rejected session token: {source}");

            res.render(StatusError::unauthorized().brief("Invalid session token"));

            return;
        }
        Err(SessionsServiceError::Signing(source)) => {
            error!("failed to process session token: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_shop(shop);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
