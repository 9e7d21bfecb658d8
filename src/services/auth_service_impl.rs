//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::Config;
use crate::db::Store;
use crate::services::auth_service::{AuthError, AuthService, LoginResult, UserInfo};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

pub struct SeaOrmAuthService {
    store: Arc<Store>,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Arc<Store>, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn signup(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("Username must not be empty".to_string()));
        }

        let security = self.config.read().await.security.clone();

        if password.len() < security.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                security.min_password_length
            )));
        }

        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(AuthError::Validation(format!(
                "Username already taken: {username}"
            )));
        }

        let user = self.store.create_user(username, password, &security).await?;

        info!("Registered user {}", user.username);

        Ok(LoginResult {
            username: user.username,
            api_key: user.api_key,
        })
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let is_valid = self.store.verify_password(username, password).await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(LoginResult {
            username: user.username,
            api_key: user.api_key,
        })
    }

    async fn verify_api_key(&self, api_key: &str) -> Result<Option<String>, AuthError> {
        let user = self.store.verify_api_key(api_key).await?;
        Ok(user.map(|u| u.username))
    }

    async fn get_user_info(&self, username: &str) -> Result<UserInfo, AuthError> {
        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(UserInfo {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }

    async fn get_api_key(&self, username: &str) -> Result<String, AuthError> {
        let api_key = self
            .store
            .get_api_key(username)
            .await?
            .ok_or_else(|| AuthError::Internal("API key not found".to_string()))?;

        Ok(api_key)
    }

    async fn regenerate_api_key(&self, username: &str) -> Result<String, AuthError> {
        let new_api_key = self.store.regenerate_api_key(username).await?;
        Ok(new_api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> SeaOrmAuthService {
        let store = Store::new("sqlite::memory:")
            .await
            .expect("in-memory store");
        SeaOrmAuthService::new(Arc::new(store), Arc::new(RwLock::new(Config::default())))
    }

    #[tokio::test]
    async fn signup_then_login() {
        let svc = service().await;

        let created = svc.signup("cook", "longenough").await.unwrap();
        assert_eq!(created.username, "cook");
        assert_eq!(created.api_key.len(), 64);

        let logged_in = svc.login("cook", "longenough").await.unwrap();
        assert_eq!(logged_in.api_key, created.api_key);
    }

    #[tokio::test]
    async fn signup_rejects_short_password() {
        let svc = service().await;

        assert!(matches!(
            svc.signup("cook", "short").await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn signup_rejects_taken_username() {
        let svc = service().await;

        svc.signup("cook", "longenough").await.unwrap();

        assert!(matches!(
            svc.signup("cook", "otherpassword").await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let svc = service().await;

        svc.signup("cook", "longenough").await.unwrap();

        assert!(matches!(
            svc.login("cook", "wrongpassword").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn api_key_round_trip() {
        let svc = service().await;

        let created = svc.signup("cook", "longenough").await.unwrap();

        let username = svc.verify_api_key(&created.api_key).await.unwrap();
        assert_eq!(username.as_deref(), Some("cook"));

        let rotated = svc.regenerate_api_key("cook").await.unwrap();
        assert_ne!(rotated, created.api_key);
        assert!(svc.verify_api_key(&created.api_key).await.unwrap().is_none());
    }
}
