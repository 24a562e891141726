//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenIssuer},
    database::{self, Db},
    domain::{
        categories::{CategoriesService, PgCategoriesService},
        dashboard::{DashboardService, PgDashboardService},
        products::{PgProductsService, ProductsService},
        promotions::{PgPromotionsService, PromotionsService},
        users::{PgUsersService, UsersService},
        vendors::{PgVendorsService, VendorsService},
    },
    uploads::ImageStore,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub vendors: Arc<dyn VendorsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub dashboard: Arc<dyn DashboardService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire every service to one database handle and image store.
    #[must_use]
    pub fn new(db: &Db, tokens: TokenIssuer, images: &Arc<dyn ImageStore>) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), tokens)),
            users: Arc::new(PgUsersService::new(db.clone())),
            vendors: Arc::new(PgVendorsService::new(db.clone(), Arc::clone(images))),
            categories: Arc::new(PgCategoriesService::new(db.clone(), Arc::clone(images))),
            products: Arc::new(PgProductsService::new(db.clone(), Arc::clone(images))),
            promotions: Arc::new(PgPromotionsService::new(db.clone())),
            dashboard: Arc::new(PgDashboardService::new(db.clone())),
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying migrations fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        run_migrations: bool,
        tokens: TokenIssuer,
        images: Arc<dyn ImageStore>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::new(&Db::new(pool), tokens, &images))
    }
}
