//! Local account directory and the demo admin credential.
//!
//! Passwords are kept and compared in plain text. This is a teaching demo,
//! not an authentication system.

use thiserror::Error;

use crate::error::AppError;
use crate::models::Account;
use crate::session::{Namespace, Session};
use crate::storage::{Collection, Storage};

const ADMIN_EMAIL: &str = "admin@reva.local";
const ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Complete all fields")]
    MissingFields,

    #[error("Email already registered")]
    AlreadyRegistered,

    #[error("No such user")]
    NoSuchUser,

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Invalid admin credentials")]
    InvalidAdminCredentials,

    #[error(transparent)]
    Storage(#[from] AppError),
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Outcome of the shared login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignIn {
    User(Account),
    Admin,
}

pub fn is_admin_credential(email: &str, password: &str) -> bool {
    email == ADMIN_EMAIL && password == ADMIN_PASSWORD
}

pub async fn find_by_email(storage: &Storage, email: &str) -> AuthResult<Option<Account>> {
    let users = storage.read_users().await?;
    Ok(users.into_iter().find(|u| u.matches_email(email)))
}

/// Creates an account, signs it in and seeds its collections empty.
pub async fn register(
    storage: &Storage,
    session: &mut Session,
    name: &str,
    email: &str,
    password: &str,
) -> AuthResult<Account> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }

    let mut users = storage.read_users().await?;
    if users.iter().any(|u| u.matches_email(email)) {
        return Err(AuthError::AlreadyRegistered);
    }

    let account = Account::new(name, email, password);
    users.push(account.clone());
    storage.write_users(&users).await?;

    session.sign_in(&account.id);
    let namespace = Namespace::user(&account.id);
    for collection in Collection::ALL {
        storage.clear(&namespace, collection).await?;
    }

    tracing::info!("Registered {}", account.id);
    Ok(account)
}

pub async fn login(
    storage: &Storage,
    session: &mut Session,
    email: &str,
    password: &str,
) -> AuthResult<Account> {
    let account = find_by_email(storage, email.trim())
        .await?
        .ok_or(AuthError::NoSuchUser)?;

    if account.password != password {
        return Err(AuthError::WrongPassword);
    }

    session.sign_in(&account.id);
    tracing::info!("Signed in {}", account.id);
    Ok(account)
}

/// Login form: a regular account first, then the admin credential.
pub async fn sign_in(
    storage: &Storage,
    session: &mut Session,
    email: &str,
    password: &str,
) -> AuthResult<SignIn> {
    match login(storage, session, email, password).await {
        Ok(account) => Ok(SignIn::User(account)),
        Err(AuthError::Storage(e)) => Err(AuthError::Storage(e)),
        Err(e) => {
            if is_admin_credential(email.trim(), password) {
                session.grant_admin();
                tracing::info!("Admin signed in");
                Ok(SignIn::Admin)
            } else {
                Err(e)
            }
        }
    }
}

pub fn admin_login(session: &mut Session, email: &str, password: &str) -> AuthResult<()> {
    if !is_admin_credential(email.trim(), password) {
        return Err(AuthError::InvalidAdminCredentials);
    }
    session.grant_admin();
    tracing::info!("Admin signed in");
    Ok(())
}

pub fn logout(session: &mut Session) {
    if let Some(id) = session.user_id() {
        tracing::info!("Signed out {}", id);
    }
    session.sign_out();
}

pub fn admin_logout(session: &mut Session) {
    session.revoke_admin();
    tracing::info!("Admin signed out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Repository;
    use crate::models::MoodLog;
    use crate::session::SessionState;

    async fn storage() -> Storage {
        Storage::new(Repository::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_register_signs_in_and_seeds_collections() {
        let storage = storage().await;
        let mut session = Session::default();
        let account = register(&storage, &mut session, "Ada", "Ada@Example.com", "pw")
            .await
            .unwrap();

        assert_eq!(account.id, "ada@example.com");
        assert_eq!(session.user_id(), Some("ada@example.com"));

        let ns = Namespace::user(&account.id);
        for collection in Collection::ALL {
            let raw = storage.repository().get(&collection.key(&ns)).await.unwrap();
            assert_eq!(raw.as_deref(), Some("[]"));
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fails_without_change() {
        let storage = storage().await;
        let mut session = Session::default();
        register(&storage, &mut session, "Ada", "ada@example.com", "pw")
            .await
            .unwrap();
        let ns = Namespace::user("ada@example.com");
        let log = MoodLog {
            id: "log_1".to_string(),
            date: "2024-01-01".parse().unwrap(),
            mood: 7,
            symptoms: Vec::new(),
            med_taken: true,
            notes: String::new(),
        };
        storage.write(&ns, &[log]).await.unwrap();
        let before = storage.read_users().await.unwrap();

        let mut other = Session::default();
        let err = register(&storage, &mut other, "Imposter", "ADA@example.com", "x")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::AlreadyRegistered));
        assert_eq!(storage.read_users().await.unwrap(), before);
        assert_eq!(other.state(), SessionState::Guest);
        assert_eq!(storage.read::<MoodLog>(&ns).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_requires_all_fields() {
        let storage = storage().await;
        let mut session = Session::default();
        let err = register(&storage, &mut session, "  ", "a@b.c", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
        assert!(storage.read_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_distinguishes_unknown_user_and_wrong_password() {
        let storage = storage().await;
        let mut session = Session::default();
        register(&storage, &mut session, "Ada", "ada@example.com", "pw")
            .await
            .unwrap();
        logout(&mut session);

        let err = login(&storage, &mut session, "ada@example.com", "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WrongPassword));

        let err = login(&storage, &mut session, "bob@example.com", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NoSuchUser));
        assert_eq!(session.state(), SessionState::Guest);

        let account = login(&storage, &mut session, "ADA@example.com", "pw")
            .await
            .unwrap();
        assert_eq!(session.user_id(), Some(account.id.as_str()));
    }

    #[tokio::test]
    async fn test_sign_in_falls_back_to_admin_credential() {
        let storage = storage().await;
        let mut session = Session::default();
        let outcome = sign_in(&storage, &mut session, "admin@reva.local", "admin123")
            .await
            .unwrap();

        assert_eq!(outcome, SignIn::Admin);
        assert!(session.is_admin());
        assert!(!session.is_authenticated());
        assert!(storage.read_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_surfaces_user_error() {
        let storage = storage().await;
        let mut session = Session::default();
        let err = sign_in(&storage, &mut session, "admin@reva.local", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NoSuchUser));
        assert!(!session.is_admin());
    }

    #[test]
    fn test_admin_login_and_logout_leave_user_alone() {
        let mut session = Session::default();
        session.sign_in("ada@example.com");

        assert!(matches!(
            admin_login(&mut session, "admin@reva.local", "guess"),
            Err(AuthError::InvalidAdminCredentials)
        ));
        admin_login(&mut session, "admin@reva.local", "admin123").unwrap();
        assert!(session.is_admin());

        admin_logout(&mut session);
        assert!(!session.is_admin());
        assert_eq!(session.user_id(), Some("ada@example.com"));
    }
}
