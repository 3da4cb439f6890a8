/// Why a request was refused.
///
/// Every variant is an expected outcome with a fixed, client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denial {
    MissingToken,
    TokenExpired,
    TokenInvalid,
    AuthenticationFailed,
    PermissionDenied,
}

impl Denial {
    pub fn message(&self) -> &'static str {
        match self {
            Denial::MissingToken => "Nenhum token fornecido!",
            Denial::TokenExpired => "O token expirou!",
            Denial::TokenInvalid | Denial::AuthenticationFailed => "Autenticação falhou!",
            Denial::PermissionDenied => "Permissão negada!",
        }
    }
}

impl core::fmt::Display for Denial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for Denial {}

/// Outcome of gating a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Accept,
    Deny(Denial),
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accept)
    }

    /// Message to return (and record) for this decision; `None` on accept.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Decision::Accept => None,
            Decision::Deny(denial) => Some(denial.message()),
        }
    }

}

impl From<Result<(), Denial>> for Decision {
    fn from(value: Result<(), Denial>) -> Self {
        match value {
            Ok(()) => Decision::Accept,
            Err(denial) => Decision::Deny(denial),
        }
    }
}
