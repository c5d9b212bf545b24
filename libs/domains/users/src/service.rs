use axum_helpers::JwtAuth;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::password::{hash_password, verify_password};
use crate::repository::UserRepository;

/// Registration and login
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    jwt_auth: JwtAuth,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repository: R, jwt_auth: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt_auth,
        }
    }

    /// Register a new account.
    ///
    /// Input is validated before the store is touched. The unique index on
    /// the store reports a concurrent duplicate as `DuplicateUser` too.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<()> {
        input.validate()?;

        if self.repository.find_by_email(&input.email).await?.is_some() {
            return Err(UserError::DuplicateUser);
        }

        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| UserError::Internal(e.to_string()))??;

        let user = User::new(input.name, input.email, password_hash);
        self.repository.insert(user).await?;

        Ok(())
    }

    /// Check credentials and issue a token for the account email.
    ///
    /// Unknown email, wrong password and blank fields are indistinguishable
    /// to the caller.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<String> {
        if let Err(e) = input.validate() {
            tracing::info!(error = %e, "Login rejected before lookup");
            return Err(UserError::InvalidCredentials);
        }

        let user = self
            .repository
            .find_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let password = input.password;
        let stored_hash = user.password_hash;
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
                .await
                .map_err(|e| UserError::Internal(e.to_string()))?;

        if !matches {
            tracing::info!("Password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        self.jwt_auth
            .issue_token(&user.email)
            .map_err(|e| UserError::Token(e.to_string()))
    }
}

impl<R: UserRepository> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            jwt_auth: self.jwt_auth.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use axum_helpers::JwtConfig;

    const SECRET: &str = "test-secret-that-is-at-least-32-chars-long";

    fn jwt_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET, "1h").unwrap())
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Alice".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .withf(|user| {
                user.email == "a@x.com"
                    && user.name == "Alice"
                    && user.password_hash != "pw1"
                    && verify_password("pw1", &user.password_hash)
            })
            .times(1)
            .returning(Ok);

        let service = AuthService::new(mock_repo, jwt_auth());
        service
            .register(register_request("a@x.com", "pw1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_register_existing_email_is_duplicate() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_find_by_email().returning(|email| {
            Ok(Some(User::new(
                "Alice".to_string(),
                email.to_string(),
                "hash".to_string(),
            )))
        });
        mock_repo.expect_insert().never();

        let service = AuthService::new(mock_repo, jwt_auth());
        let result = service.register(register_request("a@x.com", "pw2")).await;

        assert!(matches!(result, Err(UserError::DuplicateUser)));
    }

    #[tokio::test]
    async fn test_register_invalid_input_skips_store() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().never();
        mock_repo.expect_insert().never();

        let service = AuthService::new(mock_repo, jwt_auth());
        let result = service.register(register_request("a@x.com", "  ")).await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_email() {
        let stored_hash = hash_password("pw1").unwrap();
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_find_by_email().returning(move |email| {
            Ok(Some(User::new(
                "Alice".to_string(),
                email.to_string(),
                stored_hash.clone(),
            )))
        });

        let service = AuthService::new(mock_repo, jwt_auth());
        let token = service.login(login_request("a@x.com", "pw1")).await.unwrap();

        let claims = jwt_auth().verify_token(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email_match() {
        let stored_hash = hash_password("pw1").unwrap();
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .returning(move |email| {
                Ok(Some(User::new(
                    "Alice".to_string(),
                    email.to_string(),
                    stored_hash.clone(),
                )))
            });
        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "nobody@x.com")
            .returning(|_| Ok(None));

        let service = AuthService::new(mock_repo, jwt_auth());

        let wrong_password = service.login(login_request("a@x.com", "wrong")).await;
        let unknown_email = service.login(login_request("nobody@x.com", "pw1")).await;

        assert!(matches!(wrong_password, Err(UserError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_blank_password_is_invalid_credentials() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().never();

        let service = AuthService::new(mock_repo, jwt_auth());
        let blank_password = service.login(login_request("a@x.com", "   ")).await;
        let blank_email = service.login(login_request("", "pw1")).await;

        assert!(matches!(blank_password, Err(UserError::InvalidCredentials)));
        assert!(matches!(blank_email, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_database_failure_surfaces() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(|_| Err(UserError::Database("no reachable servers".to_string())));

        let service = AuthService::new(mock_repo, jwt_auth());
        let result = service.login(login_request("a@x.com", "pw1")).await;

        assert!(matches!(result, Err(UserError::Database(_))));
    }
}
