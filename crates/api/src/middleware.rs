use std::sync::Arc;

use axum::{
    extract::State,
    middleware::Next,
    response::{IntoResponse, Response},
};

use routeguard_auth::Decision;

use crate::context::RequestInfo;
use crate::errors::DenialResponse;
use crate::gate::Gate;

/// Axum middleware running every request through the [`Gate`].
///
/// Accepted requests continue downstream (with an `AuthenticatedUser`
/// extension when one was established); denied ones get a 401 with the
/// denial message.
pub async fn gate_middleware(
    State(gate): State<Arc<Gate>>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let info = RequestInfo::from_request(&req);
    let outcome = gate.check(&info).await;

    match outcome.decision {
        Decision::Accept => {
            if let Some(user) = outcome.user {
                req.extensions_mut().insert(user);
            }
            next.run(req).await
        }
        Decision::Deny(denial) => DenialResponse(denial).into_response(),
    }
}
