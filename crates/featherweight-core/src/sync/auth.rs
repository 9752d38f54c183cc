//! Signed-in user lookup.

use std::sync::{Arc, RwLock};

/// Resolves the currently signed-in user. `None` means nobody is signed in.
pub trait AuthProvider {
    fn current_user_id(&self) -> Option<String>;
}

/// Auth collaborator holding a user id set by the composition root.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthProvider {
    user_id: Arc<RwLock<Option<String>>>,
}

impl StaticAuthProvider {
    #[must_use]
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Arc::new(RwLock::new(Some(user_id.into()))),
        }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn set_user(&self, user_id: Option<String>) {
        let mut guard = self
            .user_id
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = user_id;
    }
}

impl AuthProvider for StaticAuthProvider {
    fn current_user_id(&self) -> Option<String> {
        self.user_id
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_out_clears_user_for_all_clones() {
        let auth = StaticAuthProvider::signed_in("user-1");
        let shared = auth.clone();
        assert_eq!(shared.current_user_id().as_deref(), Some("user-1"));

        auth.set_user(None);
        assert_eq!(shared.current_user_id(), None);
    }
}
