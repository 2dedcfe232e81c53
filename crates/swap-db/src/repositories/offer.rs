//! PostgreSQL implementation of OfferRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use swap_core::entities::{Offer, OfferStatus};
use swap_core::error::DomainError;
use swap_core::traits::{OfferQuery, OfferRepository, RepoResult};

use crate::models::OfferModel;

use super::error::{map_db_error, offer_not_found};

/// PostgreSQL implementation of OfferRepository
#[derive(Clone)]
pub struct PgOfferRepository {
    pool: PgPool,
}

impl PgOfferRepository {
    /// Create a new PgOfferRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfferRepository for PgOfferRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Offer>> {
        let result = sqlx::query_as::<_, OfferModel>(
            r"
            SELECT id, user_id, kind, skill, description, zip, city, tags,
                   image_url, status, completed_at, created_at, updated_at
            FROM offers
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Offer::from))
    }

    #[instrument(skip(self))]
    async fn find_open(&self, query: OfferQuery) -> RepoResult<Vec<Offer>> {
        let results = match query.kind {
            Some(kind) => {
                sqlx::query_as::<_, OfferModel>(
                    r"
                    SELECT id, user_id, kind, skill, description, zip, city, tags,
                           image_url, status, completed_at, created_at, updated_at
                    FROM offers
                    WHERE status = 'open' AND kind = $1
                    ORDER BY created_at DESC
                    ",
                )
                .bind(kind.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, OfferModel>(
                    r"
                    SELECT id, user_id, kind, skill, description, zip, city, tags,
                           image_url, status, completed_at, created_at, updated_at
                    FROM offers
                    WHERE status = 'open'
                    ORDER BY created_at DESC
                    ",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Offer::from).collect())
    }

    #[instrument(skip(self, offer))]
    async fn create(&self, offer: &Offer) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO offers (id, user_id, kind, skill, description, zip, city, tags,
                                image_url, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(offer.id)
        .bind(offer.user_id)
        .bind(offer.kind.as_str())
        .bind(&offer.skill)
        .bind(&offer.description)
        .bind(&offer.zip)
        .bind(&offer.city)
        .bind(&offer.tags)
        .bind(&offer.image_url)
        .bind(offer.status.as_str())
        .bind(offer.created_at)
        .bind(offer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_image(&self, id: Uuid, image_url: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE offers
            SET image_url = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(image_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(offer_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_status(&self, id: Uuid, status: OfferStatus) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE offers
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(offer_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn complete(&self, id: Uuid, completed_at: DateTime<Utc>) -> RepoResult<()> {
        // completed_at is written once; a second pass matches no rows.
        // Callers verify existence and ownership before getting here.
        let result = sqlx::query(
            r"
            UPDATE offers
            SET status = 'completed', completed_at = $2, updated_at = NOW()
            WHERE id = $1 AND completed_at IS NULL
            ",
        )
        .bind(id)
        .bind(completed_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::OfferAlreadyCompleted);
        }

        Ok(())
    }
}
