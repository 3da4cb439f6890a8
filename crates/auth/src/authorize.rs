use crate::{Decision, Denial, Permission, RequiredPermissions, UserRecord};

/// Authorize a looked-up user against a route requirement.
///
/// - No IO
/// - No panics
/// - Pure: same inputs, same answer
///
/// An absent or non-accepted user is refused before the requirement is looked
/// at, so no requirement (or lack of one) can admit them.
pub fn authorize(
    user: Option<&UserRecord>,
    required: Option<&RequiredPermissions>,
) -> Result<(), Denial> {
    let user = match user {
        Some(user) if user.is_accepted() => user,
        _ => return Err(Denial::AuthenticationFailed),
    };

    let Some(required) = required.filter(|r| !r.is_unset()) else {
        return Ok(());
    };

    if required.as_slice().iter().all(|p| user.role.allows(p)) {
        Ok(())
    } else {
        Err(Denial::PermissionDenied)
    }
}

/// [`authorize`], as a [`Decision`].
pub fn evaluate(user: Option<&UserRecord>, required: Option<&RequiredPermissions>) -> Decision {
    authorize(user, required).into()
}

/// Required permissions the user's role does not grant (for diagnostics).
pub fn missing_permissions<'a>(
    user: &UserRecord,
    required: &'a RequiredPermissions,
) -> Vec<&'a Permission> {
    required
        .as_slice()
        .iter()
        .filter(|p| !user.role.allows(p))
        .collect()
}
