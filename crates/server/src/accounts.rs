//! Registration, login and profile lookup.

use std::sync::Arc;

use catalog::{EnrollmentRecord, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ServiceError};
use crate::identity::{CredentialHasher, IdentityProvider};
use crate::store::CourseStore;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub username: String,
}

/// A user as shown to that user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub email: String,
    pub username: String,
    pub enrolled_courses: Vec<EnrollmentRecord>,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for ProfileView {
    fn from(user: UserProfile) -> Self {
        Self {
            email: user.email,
            username: user.username,
            enrolled_courses: user.enrolled_courses,
            created_at: user.created_at,
        }
    }
}

pub struct AccountService<S, H, I> {
    store: Arc<S>,
    hasher: H,
    identity: I,
}

impl<S, H, I> AccountService<S, H, I>
where
    S: CourseStore,
    H: CredentialHasher,
    I: IdentityProvider,
{
    pub fn new(store: Arc<S>, hasher: H, identity: I) -> Self {
        Self { store, hasher, identity }
    }

    /// Create an account and return a token for it
    pub fn register(&self, request: RegisterRequest) -> Result<String> {
        let email = request.email.trim();
        if email.is_empty() {
            return Err(ServiceError::MissingField("email"));
        }
        if request.password.is_empty() {
            return Err(ServiceError::MissingField("password"));
        }
        if self.store.find_user(email)?.is_some() {
            return Err(ServiceError::EmailTaken);
        }

        let hash = self.hasher.hash(&request.password)?;
        let profile = UserProfile::new(email, hash, request.username.trim());
        if !self.store.insert_user(profile)? {
            // lost a race with a concurrent registration
            return Err(ServiceError::EmailTaken);
        }

        info!("Registered {}", email);
        self.identity.issue_token(email)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<String> {
        let user = self
            .store
            .find_user(email.trim())?
            .ok_or(ServiceError::InvalidCredentials)?;
        if !self.hasher.verify(password, &user.password_hash) {
            warn!("Failed login for {}", user.email);
            return Err(ServiceError::InvalidCredentials);
        }
        self.identity.issue_token(&user.email)
    }

    /// Resolve a bearer token to the email it was issued for
    pub fn authenticate(&self, token: &str) -> Result<String> {
        self.identity.verify_token(token).ok_or(ServiceError::Unauthorized)
    }

    pub fn profile(&self, token: &str) -> Result<ProfileView> {
        let email = self.authenticate(token)?;
        let user = self
            .store
            .find_user(&email)?
            .ok_or(ServiceError::UnknownUser(email))?;
        Ok(user.into())
    }
}
