//! Dashboard service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, query_as};
use thiserror::Error;

use crate::{database::Db, domain::dashboard::records::DashboardStats};

const STATS_SQL: &str = include_str!("sql/stats.sql");

#[derive(Debug, Error)]
pub enum DashboardServiceError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct PgDashboardService {
    db: Db,
}

impl PgDashboardService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DashboardService for PgDashboardService {
    #[tracing::instrument(name = "dashboard.service.stats", skip(self), err)]
    async fn stats(&self) -> Result<DashboardStats, DashboardServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = query_as::<Postgres, DashboardStats>(STATS_SQL)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Counts of users, vendors, products and promotions.
    async fn stats(&self) -> Result<DashboardStats, DashboardServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            products::{ProductsService, data::ProductUpdate, records::Availability},
            users::records::Role,
        },
        test::{
            TestContext,
            helpers::{approved_vendor, create_category, create_product, create_user},
        },
    };

    use super::*;

    #[tokio::test]
    async fn stats_on_empty_marketplace_are_zero() -> TestResult {
        let ctx = TestContext::new().await;

        assert_eq!(ctx.dashboard.stats().await?, DashboardStats::default());

        Ok(())
    }

    #[tokio::test]
    async fn stats_count_by_role_status_and_availability() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, "buyer@example.com", Role::Customer).await?;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;
        let lamp = create_product(&ctx, vendor.uuid, category.uuid, "Desk Lamp", 2_500).await?;
        create_product(&ctx, vendor.uuid, category.uuid, "Floor Lamp", 9_000).await?;

        ctx.products
            .update_product(
                vendor.uuid,
                lamp.uuid,
                ProductUpdate {
                    availability: Some(Availability::OutOfStock),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        let stats = ctx.dashboard.stats().await?;

        assert_eq!(stats.users.total, 2);
        assert_eq!(stats.users.customers, 1);
        assert_eq!(stats.users.vendors, 1);
        assert_eq!(stats.vendors.approved, 1);
        assert_eq!(stats.products.total, 2);
        assert_eq!(stats.products.out_of_stock, 1);
        assert_eq!(stats.promotions.total, 0);

        Ok(())
    }
}
