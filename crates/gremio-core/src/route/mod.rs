//! Navigation routes and the role guard.

mod guard;
mod table;

pub use guard::{DenyReason, GuardDecision, RouteGuard};
pub use table::{
    HOME_PATH, LOGIN_PATH, ResolvedRoute, RouteDef, RouteTable, ViewKind, welcome_path,
};
