//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    auth::{
        AuthServiceError, AuthenticatedUser, MIN_PASSWORD_LENGTH, Registration, Session,
        TokenIssuer, hash_password, repository::PgAuthRepository, verify_password,
    },
    database::Db,
    domain::{
        users::{
            data::NewUser,
            records::{Role, UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
        validation::{ValidationError, normalize_email, optional_text, required_text},
        vendors::{repository::PgVendorsRepository, service::validate_profile},
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    tokens: TokenIssuer,
    repository: PgAuthRepository,
    users: PgUsersRepository,
    vendors: PgVendorsRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, tokens: TokenIssuer) -> Self {
        Self {
            db,
            tokens,
            repository: PgAuthRepository::new(),
            users: PgUsersRepository::new(),
            vendors: PgVendorsRepository::new(),
        }
    }

    fn session(&self, user: UserRecord) -> Result<Session, AuthServiceError> {
        let issued = self.tokens.issue(user.uuid, user.role)?;

        Ok(Session {
            user,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    /// Create an admin account, or make an existing account an admin with a new password.
    ///
    /// Returns the account and whether it was newly created.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid input or if the database write fails.
    pub async fn create_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(UserRecord, bool), AuthServiceError> {
        let name = required_text("Name", name, 100)?;
        let email = normalize_email(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let mut tx = self.db.begin().await?;

        if let Some(user) = self
            .repository
            .reset_admin(&mut tx, &email, &password_hash)
            .await?
        {
            tx.commit().await?;

            info!(user = %user.uuid, "reset admin account");

            return Ok((user, false));
        }

        let user = self
            .users
            .create_user(
                &mut tx,
                &NewUser {
                    uuid: UserUuid::new(),
                    name,
                    email,
                    password_hash,
                    role: Role::Admin,
                    phone: None,
                },
            )
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, "created admin account");

        Ok((user, true))
    }
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new(
            "Password must be at least 6 characters",
        ));
    }

    Ok(())
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, registration: Registration) -> Result<Session, AuthServiceError> {
        let role = registration.role.unwrap_or(Role::Customer);

        if role == Role::Admin {
            return Err(ValidationError::new("Cannot register as an admin").into());
        }

        let name = required_text("Name", &registration.name, 100)?;
        let email = normalize_email(&registration.email)?;
        let phone = optional_text("Phone", registration.phone.as_deref(), 40)?;
        validate_password(&registration.password)?;

        let vendor = match (role, registration.vendor) {
            (Role::Vendor, Some(profile)) => Some(validate_profile(profile)?),
            _ => None,
        };

        let password_hash = hash_password(&registration.password)?;

        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .create_user(
                &mut tx,
                &NewUser {
                    uuid: UserUuid::new(),
                    name,
                    email,
                    password_hash,
                    role,
                    phone,
                },
            )
            .await?;

        if let Some(profile) = vendor {
            let vendor = self.vendors.upsert_vendor(&mut tx, user.uuid, &profile).await?;

            debug!(vendor = %vendor.uuid, "created vendor profile at registration");
        }

        tx.commit().await?;

        info!(user = %user.uuid, role = role.as_str(), "registered user");

        self.session(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthServiceError> {
        let Ok(email) = normalize_email(email) else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .find_credentials_by_email(&mut tx, &email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !credentials.is_active {
            return Err(AuthServiceError::AccountDeactivated);
        }

        if !verify_password(password, &credentials.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let user = self.users.get_user(&mut tx, credentials.uuid).await?;

        tx.commit().await?;

        self.session(user)
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let claims = self.tokens.verify(bearer_token)?;

        let mut tx = self.db.begin().await?;

        let user = self.users.get_user(&mut tx, claims.user()).await?;

        tx.commit().await?;

        if !user.is_active {
            return Err(AuthServiceError::AccountDeactivated);
        }

        Ok(AuthenticatedUser::from(&user))
    }

    async fn change_password(
        &self,
        user: UserUuid,
        current: &str,
        new: &str,
    ) -> Result<(), AuthServiceError> {
        validate_password(new)?;

        let mut tx = self.db.begin().await?;

        let credentials = self.repository.get_credentials(&mut tx, user).await?;

        if !verify_password(current, &credentials.password_hash)? {
            return Err(AuthServiceError::IncorrectPassword);
        }

        let password_hash = hash_password(new)?;

        self.repository
            .update_password(&mut tx, user, &password_hash)
            .await?;

        tx.commit().await?;

        info!(user = %user, "changed password");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Sign up a customer or vendor and start a session.
    async fn register(&self, registration: Registration) -> Result<Session, AuthServiceError>;

    /// Start a session from an email and password.
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthServiceError>;

    /// Resolve a bearer token to an active user.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;

    async fn change_password(
        &self,
        user: UserUuid,
        current: &str,
        new: &str,
    ) -> Result<(), AuthServiceError>;
}
