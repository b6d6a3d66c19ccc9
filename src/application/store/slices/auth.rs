//! Signed-in user slice.

use crate::application::store::fetch::{Fetch, FetchStatus, Outcome, ResponseOrdering};
use crate::application::store::Slice;
use crate::domain::entities::User;

/// Auth slice actions.
#[derive(Debug, Clone)]
pub enum AuthAction {
    /// `POST /auth/login`.
    LoginUser(Fetch<User>),
    /// `GET /auth/check-auth`.
    CheckAuth(Fetch<User>),
    /// `POST /auth/logout`.
    LogoutUser(Fetch<()>),
}

impl AuthAction {
    /// Action type string.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::LoginUser(f) => format!("auth/login/{}", f.phase.label()),
            Self::CheckAuth(f) => format!("auth/checkauth/{}", f.phase.label()),
            Self::LogoutUser(f) => format!("auth/logout/{}", f.phase.label()),
        }
    }
}

/// Session state.
#[derive(Debug, Clone, Default)]
pub struct AuthSlice {
    status: FetchStatus,
    user: Option<User>,
}

impl AuthSlice {
    /// Signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Slice for AuthSlice {
    type Action = AuthAction;

    fn reduce(mut self, action: AuthAction, ordering: ResponseOrdering) -> Self {
        match action {
            AuthAction::LoginUser(fetch) | AuthAction::CheckAuth(fetch) => {
                match self.status.observe(fetch, ordering) {
                    Outcome::Replace(user) => self.user = Some(user),
                    Outcome::Clear => self.user = None,
                    Outcome::Ignore => {}
                }
            }
            AuthAction::LogoutUser(fetch) => {
                if let Outcome::Replace(()) = self.status.observe(fetch, ordering) {
                    self.user = None;
                }
            }
        }
        self
    }

    fn is_loading(&self) -> bool {
        self.status.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::fetch::RequestId;
    use crate::domain::errors::ShopError;

    const ORDER: ResponseOrdering = ResponseOrdering::LastResolved;

    #[test]
    fn test_login_then_logout() {
        let slice = AuthSlice::default().reduce(
            AuthAction::LoginUser(Fetch::fulfilled(RequestId(1), User::new("u1", "Ada", "a@x.io"))),
            ORDER,
        );
        assert!(slice.is_authenticated());

        let slice = slice.reduce(AuthAction::LogoutUser(Fetch::fulfilled(RequestId(2), ())), ORDER);
        assert!(!slice.is_authenticated());
    }

    #[test]
    fn test_failed_logout_keeps_session() {
        let slice = AuthSlice::default()
            .reduce(
                AuthAction::CheckAuth(Fetch::fulfilled(RequestId(1), User::new("u1", "Ada", "a@x.io"))),
                ORDER,
            )
            .reduce(
                AuthAction::LogoutUser(Fetch::rejected(RequestId(2), ShopError::network("down"))),
                ORDER,
            );

        assert!(slice.is_authenticated());
        assert!(!slice.is_loading());
    }
}
