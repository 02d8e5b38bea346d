use crate::errors::SessionError;
use crate::storage::{Store, SESSION_KEY, USER_KEY};

pub const MIN_PASSWORD_LEN: usize = 3;
pub const FALLBACK_NAME: &str = "Operator";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: Option<String>,
    pub is_logged_in: bool,
}

impl Identity {
    pub fn from_store(store: &Store) -> Self {
        Self {
            name: store
                .get(USER_KEY)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            is_logged_in: store.get(SESSION_KEY) == Some("true"),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(FALLBACK_NAME)
    }

    // A derived name lives in memory only.
    pub fn login(&mut self, email: &str, password: &str) -> Result<(), SessionError> {
        if password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(SessionError::AccessDenied);
        }
        if self.name.is_none() {
            let derived = local_part(email.trim());
            if !derived.is_empty() {
                self.name = Some(derived.to_string());
            }
        }
        self.is_logged_in = true;
        Ok(())
    }

    pub fn signup(&mut self, name: &str) {
        let name = name.trim();
        self.name = (!name.is_empty()).then(|| name.to_string());
        self.is_logged_in = true;
    }
}

pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

pub fn welcome_notice(name: &str) -> String {
    format!("Identity Established. Welcome, {name}.")
}
