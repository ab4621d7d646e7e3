use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};

/// Turn a handler error into the page the user sees.
/// An expired or missing session goes back to sign-in.
pub fn error_response(err: &ServerError) -> Response {
    if matches!(err, ServerError::Unauthorized(_)) {
        return ResponseBuilder::new()
            .status(303)
            .header("Location", "/login")
            .body(Body::empty())
            .unwrap_or_else(|_| Response::new(Body::empty()));
    }

    let status = err.status_code();
    let message = match err {
        ServerError::Store(e) => e.user_message(),
        ServerError::DbError(_) | ServerError::InternalError => {
            "Something went wrong on our side.".to_string()
        }
        other => other.to_string(),
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(error_page(status, &message).into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
