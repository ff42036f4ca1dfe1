//! Error Envelope
//!
//! Every failure leaves the server as `{"success": false, "error": ..}` with an
//! optional `message` and, for validation failures, the list of messages.

use salvo::{
    catcher::Catcher,
    http::ResBody,
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use countdown_app::domain::timers::validation::ValidationErrors;

pub(crate) const VALIDATION_FAILED: &str = "Validation failed";

/// Error Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Short error description
    pub error: String,

    /// Additional detail, when there is any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Every validation message, in the order the checks ran
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<String>,
}

/// An error status paired with its envelope.
#[derive(Debug, Clone, Error)]
#[error("{status}: {}", .body.error)]
pub(crate) struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                success: false,
                error: error.into(),
                message: None,
                validation_errors: Vec::new(),
            },
        }
    }

    pub(crate) fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub(crate) fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    pub(crate) fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    /// 400 carrying the first message up front and every message in the list.
    pub(crate) fn validation(errors: &ValidationErrors) -> Self {
        let mut api_error = Self::bad_request(VALIDATION_FAILED);

        api_error.body.message = errors.first_message().map(str::to_owned);
        api_error.body.validation_errors = errors.messages().map(str::to_owned).collect();

        api_error
    }

    #[must_use]
    pub(crate) fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());

        self
    }
}

impl From<StatusError> for ApiError {
    fn from(error: StatusError) -> Self {
        from_status_error(&error)
    }
}

fn from_status_error(error: &StatusError) -> ApiError {
    let message = if error.brief.is_empty() {
        error.name.clone()
    } else {
        error.brief.clone()
    };

    ApiError::new(error.code, message)
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(self.body));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::NOT_FOUND,
            StatusCode::CONFLICT,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(status.canonical_reason().unwrap_or_default()).add_content(
                    "application/json",
                    oapi::Content::new(ErrorResponse::to_schema(components)),
                ),
            );
        }
    }
}

/// Rewrites framework errors (unmatched routes, rejected extractors, caught
/// panics) into the envelope. Bodies already written by a handler are left
/// alone.
#[handler]
async fn envelope_framework_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res.status_code.unwrap_or(StatusCode::NOT_FOUND);

    let api_error = match res.take_body() {
        ResBody::Error(error) => from_status_error(&error),
        ResBody::None => ApiError::new(
            status,
            status.canonical_reason().unwrap_or("Unknown Error"),
        ),
        body => {
            res.body(body);

            return;
        }
    };

    res.render(api_error);

    ctrl.skip_rest();
}

pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(envelope_framework_errors)
}
