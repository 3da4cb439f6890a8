//! Per-request gate: public check → token → user → permissions → audit.
//!
//! Each request ends in exactly one of: public accept, authentication
//! failure, permission failure, or full accept. Exactly one access log record
//! is written on every path.

use std::sync::Arc;

use routeguard_auth::{
    Decision, Denial, PublicEndpoints, RoutePermissionTable, TokenValidator, UserRecord,
    UserStatus, evaluate, missing_permissions,
};
use routeguard_infra::UserStore;

use crate::access_log::AccessLogRecorder;
use crate::context::{AuthenticatedUser, RequestInfo};

/// Result of gating one request.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    pub decision: Decision,
    /// Present only on a full (non-public) accept.
    pub user: Option<AuthenticatedUser>,
}

impl GateOutcome {
    fn public() -> Self {
        Self {
            decision: Decision::Accept,
            user: None,
        }
    }

    fn denied(denial: Denial) -> Self {
        Self {
            decision: Decision::Deny(denial),
            user: None,
        }
    }
}

/// The gate. Shared read-only across all requests.
pub struct Gate {
    public: PublicEndpoints,
    validator: TokenValidator,
    routes: Arc<RoutePermissionTable>,
    users: Arc<dyn UserStore>,
    recorder: AccessLogRecorder,
}

impl Gate {
    pub fn new(
        validator: TokenValidator,
        routes: Arc<RoutePermissionTable>,
        users: Arc<dyn UserStore>,
        recorder: AccessLogRecorder,
    ) -> Self {
        Self {
            public: PublicEndpoints::root_only(),
            validator,
            routes,
            users,
            recorder,
        }
    }

    /// Decide, then record the decision.
    pub async fn check(&self, request: &RequestInfo) -> GateOutcome {
        let outcome = self.decide(request).await;
        self.recorder.record(request, &outcome.decision).await;
        outcome
    }

    async fn decide(&self, request: &RequestInfo) -> GateOutcome {
        if self.public.is_public(&request.original_url, &request.method) {
            return GateOutcome::public();
        }

        let claims = match self.validator.validate(request.authorization.as_deref()) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(
                    reason = %e,
                    method = %request.method,
                    endpoint = %request.original_url,
                    "token rejected"
                );
                return GateOutcome::denied(e.into());
            }
        };

        let user = match self
            .users
            .find_user_with_role(claims.subject(), &[UserStatus::Accepted])
            .await
        {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, subject = %claims.subject(), "user lookup failed");
                return GateOutcome::denied(Denial::AuthenticationFailed);
            }
        };

        let Some(user) = user.filter(UserRecord::is_accepted) else {
            tracing::debug!(subject = %claims.subject(), "no accepted user for token subject");
            return GateOutcome::denied(Denial::AuthenticationFailed);
        };

        let required = self.routes.resolve(&request.path, &request.method);
        match evaluate(Some(&user), required) {
            Decision::Accept => GateOutcome {
                decision: Decision::Accept,
                user: Some(AuthenticatedUser::new(user, claims)),
            },
            Decision::Deny(denial) => {
                let missing: Vec<String> = required
                    .map(|r| missing_permissions(&user, r))
                    .unwrap_or_default()
                    .into_iter()
                    .map(ToString::to_string)
                    .collect();
                tracing::debug!(
                    subject = %user.cpf,
                    role = %user.role,
                    method = %request.method,
                    path = %request.path,
                    missing = ?missing,
                    "permission denied"
                );
                GateOutcome::denied(denial)
            }
        }
    }
}

impl core::fmt::Debug for Gate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gate")
            .field("public", &self.public)
            .field("validator", &self.validator)
            .field("routes", &self.routes.len())
            .field("recorder", &self.recorder)
            .finish_non_exhaustive()
    }
}
