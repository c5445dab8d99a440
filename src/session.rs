use std::fmt;

pub const GUEST: &str = "guest";

/// Storage namespace: a user identifier, or `guest` when nobody is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    pub fn guest() -> Self {
        Self(GUEST.to_string())
    }

    pub fn user(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Guest,
    User,
    Admin,
}

/// Signed-in user and admin flag. The two are independent: an admin sign-in
/// leaves any user sign-in untouched and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<String>,
    is_admin: bool,
}

impl Session {
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn namespace(&self) -> Namespace {
        match &self.user_id {
            Some(id) => Namespace::user(id),
            None => Namespace::guest(),
        }
    }

    /// Admin wins when both flags are set, matching what the admin pages show.
    pub fn state(&self) -> SessionState {
        if self.is_admin {
            SessionState::Admin
        } else if self.user_id.is_some() {
            SessionState::User
        } else {
            SessionState::Guest
        }
    }

    pub fn sign_in(&mut self, user_id: &str) {
        self.user_id = Some(user_id.to_string());
    }

    pub fn sign_out(&mut self) {
        self.user_id = None;
    }

    pub fn grant_admin(&mut self) {
        self.is_admin = true;
    }

    pub fn revoke_admin(&mut self) {
        self.is_admin = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_guest() {
        let session = Session::default();
        assert_eq!(session.state(), SessionState::Guest);
        assert_eq!(session.namespace(), Namespace::guest());
    }

    #[test]
    fn test_admin_and_user_flags_are_independent() {
        let mut session = Session::default();
        session.sign_in("ada@example.com");
        session.grant_admin();
        assert_eq!(session.state(), SessionState::Admin);

        session.revoke_admin();
        assert_eq!(session.state(), SessionState::User);
        assert_eq!(session.namespace().as_str(), "ada@example.com");

        session.grant_admin();
        session.sign_out();
        assert!(session.is_admin());
        assert_eq!(session.namespace(), Namespace::guest());
    }
}
