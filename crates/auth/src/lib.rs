//! `routeguard-auth` — the request-gating decision engine.
//!
//! This crate is intentionally decoupled from HTTP and storage: it validates
//! bearer tokens, resolves route permission requirements and evaluates policy.

pub mod authorize;
pub mod claims;
pub mod decision;
pub mod peek;
pub mod permissions;
pub mod public;
pub mod roles;
pub mod routes;
pub mod subject;
pub mod token;
pub mod user;

pub use authorize::{authorize, evaluate, missing_permissions};
pub use claims::{IdentityClaims, IdentityPayload};
pub use decision::{Decision, Denial};
pub use peek::peek_subject;
pub use permissions::{Permission, RequiredPermissions};
pub use public::{PublicEndpoints, PublicRule};
pub use roles::Role;
pub use routes::{CompiledRoute, RouteEntry, RouteGroup, RoutePermissionTable, RouteTableError};
pub use subject::SubjectId;
pub use token::{BEARER_PREFIX, TokenError, TokenValidator, bearer_token};
pub use user::{UserRecord, UserStatus};
