//! Role guard for protected routes.

use super::table::ResolvedRoute;
use crate::user::UserIdentity;

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Navigation is cancelled and the user is sent to the login screen.
    RedirectToLogin { reason: DenyReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NoSession,
    RoleMismatch,
}

/// Compares the cached session role against a route's required role.
///
/// The role claim is taken from the local session as-is; the backend is not
/// consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    pub fn check(&self, route: &ResolvedRoute, session: Option<&UserIdentity>) -> GuardDecision {
        let Some(required) = route.required_role else {
            return GuardDecision::Allow;
        };
        match session {
            None => GuardDecision::RedirectToLogin {
                reason: DenyReason::NoSession,
            },
            Some(user) if user.role != required => GuardDecision::RedirectToLogin {
                reason: DenyReason::RoleMismatch,
            },
            Some(_) => GuardDecision::Allow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteTable;
    use crate::user::UserRole;

    fn user(role: UserRole) -> UserIdentity {
        UserIdentity {
            id: 3,
            name: "Test".into(),
            email: "t@x.pe".into(),
            role,
            specialties: None,
        }
    }

    #[test]
    fn test_vendor_on_client_route_is_redirected() {
        let route = RouteTable::default().resolve("/cliente/proyecto/5");
        let decision = RouteGuard.check(&route, Some(&user(UserRole::Vendor)));
        assert_eq!(
            decision,
            GuardDecision::RedirectToLogin {
                reason: DenyReason::RoleMismatch
            }
        );
    }

    #[test]
    fn test_missing_session_is_redirected() {
        let route = RouteTable::default().resolve("/vendedor/historial");
        assert_eq!(
            RouteGuard.check(&route, None),
            GuardDecision::RedirectToLogin {
                reason: DenyReason::NoSession
            }
        );
    }

    #[test]
    fn test_public_and_matching_routes_allowed() {
        let table = RouteTable::default();
        assert_eq!(
            RouteGuard.check(&table.resolve("/login"), None),
            GuardDecision::Allow
        );
        assert_eq!(
            RouteGuard.check(
                &table.resolve("/cliente/chat/1"),
                Some(&user(UserRole::Client))
            ),
            GuardDecision::Allow
        );
    }
}
