use serde::{Deserialize, Serialize};

/// A registered user. The identifier is the lowercased email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "pass")]
    pub password: String,
}

impl Account {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        let email = email.to_lowercase();
        let name = if name.is_empty() {
            email.split('@').next().unwrap_or_default().to_string()
        } else {
            name.to_string()
        };

        Self {
            id: email.clone(),
            name,
            email,
            password: password.to_string(),
        }
    }

    pub fn matches_email(&self, email: &str) -> bool {
        !self.email.is_empty() && self.email.to_lowercase() == email.to_lowercase()
    }

    pub fn display(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lowercases_email_and_id() {
        let account = Account::new("Ada", "Ada@Example.COM", "pw");
        assert_eq!(account.id, "ada@example.com");
        assert_eq!(account.email, "ada@example.com");
    }

    #[test]
    fn test_empty_name_falls_back_to_local_part() {
        let account = Account::new("", "sam@example.com", "pw");
        assert_eq!(account.name, "sam");
    }

    #[test]
    fn test_password_stored_under_pass_key() {
        let json = serde_json::to_value(Account::new("A", "a@b.c", "secret")).unwrap();
        assert_eq!(json["pass"], "secret");
    }
}
