//! User aggregate.

use super::{UserDomainError, UserId};

const MAX_NAME_LENGTH: usize = 255;

/// A person tasks can be assigned to.
///
/// `role` is a free-form designation such as `Manager` or `Tester`; it often
/// matches a workflow stage name but is not tied to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: String,
    avatar_url: Option<String>,
}

/// Data required to rebuild a user from storage.
#[derive(Debug, Clone)]
pub struct PersistedUserData {
    /// Identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role designation.
    pub role: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
}

impl User {
    /// Creates a user.
    ///
    /// The email is trimmed and lower-cased.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError`] when the name or role is blank, the name
    /// exceeds 255 characters, or the email is not of the form
    /// `local@domain`.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Result<Self, UserDomainError> {
        let name = required(name.into()).ok_or(UserDomainError::EmptyName)?;
        let length = name.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(UserDomainError::NameTooLong(length));
        }
        let role = required(role.into()).ok_or(UserDomainError::EmptyRole)?;
        let email = normalize_email(email.into())?;
        Ok(Self {
            id: UserId::new(),
            name,
            email,
            role,
            avatar_url: None,
        })
    }

    /// Sets the avatar URL. Blank URLs are dropped.
    #[must_use]
    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = required(url.into());
        self
    }

    /// Rebuilds a user from persisted data without validation.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            role: data.role,
            avatar_url: data.avatar_url,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the role designation.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns the avatar URL, if any.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

fn required(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn normalize_email(raw: String) -> Result<String, UserDomainError> {
    let email = raw.trim().to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(UserDomainError::InvalidEmail(raw));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(UserDomainError::InvalidEmail(raw));
    }
    Ok(email)
}
