//! Navigation shell.
//!
//! Resolves paths against the [`RouteTable`], applies the [`RouteGuard`],
//! tears down the previous view and activates the next one. A denied
//! navigation lands on the login screen without building the protected
//! view, so nothing it would fetch is requested.

use crate::auth_usecase::AuthUseCase;
use crate::services::Services;
use crate::views::{
    AnalysisChatView, ChatView, ProfileView, ProjectDetailView, ProjectsView, RequirementsView,
    SubtaskBoardView,
};
use anyhow::Result;
use gremio_core::auth::Credentials;
use gremio_core::chat::ConversationScope;
use gremio_core::route::{
    DenyReason, GuardDecision, LOGIN_PATH, ResolvedRoute, RouteGuard, RouteTable, ViewKind,
    welcome_path,
};

/// The view currently on screen.
pub enum ActiveView {
    /// Screens with no data of their own (home, forms, welcome pages, help).
    Static(ViewKind),
    Chat(ChatView),
    Projects(ProjectsView),
    ProjectDetail(ProjectDetailView),
    SubtaskBoard(SubtaskBoardView),
    Requirements(RequirementsView),
    AnalysisChat(AnalysisChatView),
    Profile(ProfileView),
}

impl ActiveView {
    fn build(services: &Services, route: &ResolvedRoute) -> Result<Self> {
        use ViewKind::*;
        let view = match route.view {
            ProjectChat => Self::Chat(ChatView::new(
                services,
                ConversationScope::Project(route.id()?),
            )?),
            SubtaskChat | VendorSubtaskChat => Self::Chat(ChatView::new(
                services,
                ConversationScope::Subtask(route.id()?),
            )?),
            ClientProjects | VendorProjects => Self::Projects(ProjectsView::new(services)?),
            ProjectDetail => Self::ProjectDetail(ProjectDetailView::new(services, route.id()?)),
            VendorRequirements | VendorHistory => {
                Self::SubtaskBoard(SubtaskBoardView::new(services)?)
            }
            ClientRequirements => Self::Requirements(RequirementsView::new(services)?),
            AnalysisChat => Self::AnalysisChat(AnalysisChatView::new(services)?),
            ClientProfile | VendorProfile => Self::Profile(ProfileView::new(services)),
            other => Self::Static(other),
        };
        Ok(view)
    }

    async fn activate(&mut self) -> Result<()> {
        match self {
            Self::Static(_) | Self::AnalysisChat(_) => Ok(()),
            Self::Chat(view) => view.activate().await,
            Self::Projects(view) => view.activate().await,
            Self::ProjectDetail(view) => view.activate().await,
            Self::SubtaskBoard(view) => view.activate().await,
            Self::Requirements(view) => view.activate().await,
            Self::Profile(view) => view.activate().await,
        }
    }

    async fn deactivate(&mut self) {
        if let Self::Chat(view) = self {
            view.deactivate().await;
        }
    }
}

/// Where a navigation request ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: String,
    pub route: ResolvedRoute,
    /// Set when the guard sent the user to the login screen instead.
    pub redirected: Option<DenyReason>,
}

pub struct AppShell {
    services: Services,
    routes: RouteTable,
    guard: RouteGuard,
    auth: AuthUseCase,
    current: Option<(ResolvedRoute, ActiveView)>,
}

impl AppShell {
    pub fn new(services: Services) -> Self {
        let auth = AuthUseCase::new(services.auth.clone(), services.session.clone());
        Self {
            services,
            routes: RouteTable::default(),
            guard: RouteGuard,
            auth,
            current: None,
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn auth(&self) -> &AuthUseCase {
        &self.auth
    }

    pub fn current_route(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref().map(|(route, _)| route)
    }

    pub fn current_view(&self) -> Option<&ActiveView> {
        self.current.as_ref().map(|(_, view)| view)
    }

    pub fn current_view_mut(&mut self) -> Option<&mut ActiveView> {
        self.current.as_mut().map(|(_, view)| view)
    }

    /// Navigates to `path`, applying the role guard.
    ///
    /// The previous view is always torn down. When the new view fails to
    /// load it stays current (so its flags can be shown) and the error is
    /// returned.
    pub async fn navigate(&mut self, path: &str) -> Result<Navigation> {
        let requested = self.routes.resolve(path);
        let user = self.services.session.current_user();

        let (route, redirected) = match self.guard.check(&requested, user.as_ref()) {
            GuardDecision::Allow => (requested, None),
            GuardDecision::RedirectToLogin { reason } => {
                tracing::warn!("Access to {} denied ({:?}), redirecting to login", path, reason);
                (self.routes.resolve(LOGIN_PATH), Some(reason))
            }
        };

        self.teardown().await;

        let mut view = ActiveView::build(&self.services, &route)?;
        let activated = view.activate().await;
        tracing::debug!("Showing {} at {}", route.view, route.path);
        self.current = Some((route.clone(), view));
        activated?;

        Ok(Navigation {
            requested: path.to_string(),
            route,
            redirected,
        })
    }

    /// Logs in and lands on the role's welcome screen.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<Navigation> {
        let user = self.auth.login(credentials).await?;
        self.navigate(welcome_path(user.role)).await
    }

    /// Tears down the current view, clears the session and shows the login screen.
    pub async fn logout(&mut self) -> Result<Navigation> {
        self.teardown().await;
        self.auth.logout()?;
        self.navigate(LOGIN_PATH).await
    }

    pub async fn teardown(&mut self) {
        if let Some((_, mut view)) = self.current.take() {
            view.deactivate().await;
        }
    }
}
