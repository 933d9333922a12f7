use crate::session::SessionState;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/dashboard";

/// Access level a screen requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    /// Any signed-in user
    Protected,
    /// Admins and super admins only
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not settled yet
    Placeholder,
    Render,
    /// Send to login, remembering where the user was going
    RedirectToLogin { from: String },
    /// Signed in but not allowed here
    RedirectToHome,
}

impl GuardDecision {
    /// Path to navigate to, if the decision is a redirect
    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            GuardDecision::RedirectToLogin { .. } => Some(LOGIN_PATH),
            GuardDecision::RedirectToHome => Some(HOME_PATH),
            GuardDecision::Placeholder | GuardDecision::Render => None,
        }
    }
}

impl RouteGuard {
    pub fn decide(self, state: &SessionState, requested_path: &str) -> GuardDecision {
        match state {
            SessionState::Uninitialized | SessionState::Loading => GuardDecision::Placeholder,
            SessionState::Unauthenticated => GuardDecision::RedirectToLogin {
                from: requested_path.to_string(),
            },
            SessionState::Authenticated(user) => match self {
                RouteGuard::Admin if !user.role.is_admin() => GuardDecision::RedirectToHome,
                _ => GuardDecision::Render,
            },
        }
    }
}
