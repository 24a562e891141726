//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        pagination::Page,
        users::{
            data::{ProfileUpdate, UsersFilter},
            errors::UsersServiceError,
            records::{Role, UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
        validation::{optional_text, required_text},
    },
};

const MAX_NAME_CHARS: usize = 100;
const MAX_PHONE_CHARS: usize = 40;

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

fn validate_profile(update: ProfileUpdate) -> Result<ProfileUpdate, UsersServiceError> {
    let name = update
        .name
        .map(|name| required_text("Name", &name, MAX_NAME_CHARS))
        .transpose()?;

    let phone = optional_text("Phone", update.phone.as_deref(), MAX_PHONE_CHARS)?;

    Ok(ProfileUpdate { name, phone })
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let update = validate_profile(update)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .update_profile(&mut tx, user, &update)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_users(&self, filter: UsersFilter) -> Result<Page<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let (users, total) = self.repository.list_users(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(Page::new(users, filter.page, total))
    }

    async fn toggle_active(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        if self.repository.lock_user_role(&mut tx, user).await? == Role::Admin {
            return Err(UsersServiceError::AdminProtected);
        }

        let record = self.repository.toggle_active(&mut tx, user).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Change a user's name and/or phone number.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// List users, newest first.
    async fn list_users(&self, filter: UsersFilter) -> Result<Page<UserRecord>, UsersServiceError>;

    /// Flip a non-admin user's active flag.
    async fn toggle_active(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::pagination::PageRequest,
        test::{TestContext, helpers::create_user},
    };

    use super::*;

    #[tokio::test]
    async fn update_profile_keeps_unset_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com", Role::Customer).await?;

        let updated = ctx
            .users
            .update_profile(
                user.uuid,
                ProfileUpdate {
                    name: None,
                    phone: Some("+2348000000000".to_string()),
                },
            )
            .await?;

        assert_eq!(updated.name, user.name);
        assert_eq!(updated.phone.as_deref(), Some("+2348000000000"));

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_rejects_blank_name() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com", Role::Customer).await?;

        let result = ctx
            .users
            .update_profile(
                user.uuid,
                ProfileUpdate {
                    name: Some("  ".to_string()),
                    phone: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_users_filters_by_role_and_counts() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, "a@example.com", Role::Customer).await?;
        create_user(&ctx, "b@example.com", Role::Customer).await?;
        create_user(&ctx, "c@example.com", Role::Vendor).await?;

        let page = ctx
            .users
            .list_users(UsersFilter {
                role: Some(Role::Customer),
                is_active: None,
                page: PageRequest::new(1, 1)?,
            })
            .await?;

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 2);
        assert_eq!(page.pages(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn toggle_active_flips_flag() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com", Role::Customer).await?;

        let toggled = ctx.users.toggle_active(user.uuid).await?;
        assert!(!toggled.is_active);

        let toggled = ctx.users.toggle_active(user.uuid).await?;
        assert!(toggled.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn toggle_active_refuses_admins() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_user(&ctx, "root@example.com", Role::Admin).await?;

        let result = ctx.users.toggle_active(admin.uuid).await;

        assert!(
            matches!(result, Err(UsersServiceError::AdminProtected)),
            "expected AdminProtected, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn toggle_active_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.toggle_active(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
