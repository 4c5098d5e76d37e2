//! Route table.
//!
//! Paths are slash-separated with `:name` placeholders. Unknown paths resolve
//! to the home route.

use crate::error::{GremioError, Result};
use crate::user::UserRole;
use std::collections::HashMap;
use strum::Display;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Screens the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ViewKind {
    Home,
    Login,
    RegisterClient,
    RegisterVendor,
    SpecialtySelection,
    Dashboard,
    ClientWelcome,
    AnalysisChat,
    ClientRequirements,
    ClientProjects,
    Help,
    ClientProfile,
    ProjectChat,
    ProjectDetail,
    SubtaskChat,
    VendorWelcome,
    VendorRequirements,
    VendorProjects,
    VendorProfile,
    VendorSubtaskChat,
    VendorHistory,
}

/// One entry of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    pub pattern: &'static str,
    pub view: ViewKind,
    /// Role a session must hold to enter; `None` for public routes.
    pub required_role: Option<UserRole>,
}

impl RouteDef {
    const fn public(pattern: &'static str, view: ViewKind) -> Self {
        Self {
            pattern,
            view,
            required_role: None,
        }
    }

    const fn client(pattern: &'static str, view: ViewKind) -> Self {
        Self {
            pattern,
            view,
            required_role: Some(UserRole::Client),
        }
    }

    const fn vendor(pattern: &'static str, view: ViewKind) -> Self {
        Self {
            pattern,
            view,
            required_role: Some(UserRole::Vendor),
        }
    }

    fn matches(&self, segments: &[&str]) -> Option<HashMap<String, String>> {
        let pattern: Vec<&str> = split_path(self.pattern);
        if pattern.len() != segments.len() {
            return None;
        }
        let mut params = HashMap::new();
        for (expected, actual) in pattern.iter().zip(segments) {
            if let Some(name) = expected.strip_prefix(':') {
                params.insert(name.to_string(), (*actual).to_string());
            } else if expected != actual {
                return None;
            }
        }
        Some(params)
    }
}

/// A path matched against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Normalized path, always starting with `/`.
    pub path: String,
    pub view: ViewKind,
    pub required_role: Option<UserRole>,
    pub params: HashMap<String, String>,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The numeric `:id` parameter.
    pub fn id(&self) -> Result<i64> {
        let raw = self
            .param("id")
            .ok_or_else(|| GremioError::validation(format!("route {} has no id", self.path)))?;
        raw.parse()
            .map_err(|_| GremioError::validation(format!("invalid id '{raw}' in {}", self.path)))
    }

    pub fn is_protected(&self) -> bool {
        self.required_role.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDef>) -> Self {
        Self { routes }
    }

    /// Matches `path`; unknown paths fall back to the home route.
    pub fn resolve(&self, path: &str) -> ResolvedRoute {
        let segments = split_path(path);
        for route in &self.routes {
            if let Some(params) = route.matches(&segments) {
                return ResolvedRoute {
                    path: join_path(&segments),
                    view: route.view,
                    required_role: route.required_role,
                    params,
                };
            }
        }
        ResolvedRoute {
            path: HOME_PATH.to_string(),
            view: ViewKind::Home,
            required_role: None,
            params: HashMap::new(),
        }
    }

    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        use ViewKind::*;
        Self::new(vec![
            RouteDef::public("/", Home),
            RouteDef::public("/login", Login),
            RouteDef::public("/registro-cliente", RegisterClient),
            RouteDef::public("/registro-vendedor", RegisterVendor),
            RouteDef::public("/registro-especialidades", SpecialtySelection),
            RouteDef::public("/dashboard", Dashboard),
            RouteDef::client("/cliente/bienvenida", ClientWelcome),
            RouteDef::client("/cliente/chat-asistente", AnalysisChat),
            RouteDef::client("/cliente/requerimientos", ClientRequirements),
            RouteDef::client("/cliente/estado-proyectos", ClientProjects),
            RouteDef::client("/cliente/ayuda", Help),
            RouteDef::client("/cliente/mi-perfil", ClientProfile),
            RouteDef::client("/cliente/chat/:id", ProjectChat),
            RouteDef::client("/cliente/proyecto/:id", ProjectDetail),
            RouteDef::client("/cliente/subtarea/:id", SubtaskChat),
            RouteDef::vendor("/vendedor/bienvenida", VendorWelcome),
            RouteDef::vendor("/vendedor/requerimientos", VendorRequirements),
            RouteDef::vendor("/vendedor/mis-proyectos", VendorProjects),
            RouteDef::vendor("/vendedor/mi-perfil", VendorProfile),
            RouteDef::vendor("/vendedor/chat/:id", ProjectChat),
            RouteDef::vendor("/vendedor/subtarea/:id", VendorSubtaskChat),
            RouteDef::vendor("/vendedor/historial", VendorHistory),
        ])
    }
}

/// Landing route after login.
pub fn welcome_path(role: UserRole) -> &'static str {
    match role {
        UserRole::Client => "/cliente/bienvenida",
        UserRole::Vendor => "/vendedor/bienvenida",
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn join_path(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}
