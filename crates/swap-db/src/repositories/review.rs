//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use swap_core::entities::Review;
use swap_core::error::DomainError;
use swap_core::traits::{RepoResult, ReviewRepository};

use crate::models::ReviewModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self, review))]
    async fn create(&self, review: &Review) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO reviews (id, offer_id, reviewer_id, reviewee_id, stars, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(review.id)
        .bind(review.offer_id)
        .bind(review.reviewer_id)
        .bind(review.reviewee_id)
        .bind(review.stars)
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyReviewed))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_triple(
        &self,
        offer_id: Uuid,
        reviewer_id: Uuid,
        reviewee_id: Uuid,
    ) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, offer_id, reviewer_id, reviewee_id, stars, comment, created_at
            FROM reviews
            WHERE offer_id = $1 AND reviewer_id = $2 AND reviewee_id = $3
            ",
        )
        .bind(offer_id)
        .bind(reviewer_id)
        .bind(reviewee_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Review::from))
    }

    #[instrument(skip(self))]
    async fn find_by_reviewee(&self, reviewee_id: Uuid, limit: i64) -> RepoResult<Vec<Review>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, offer_id, reviewer_id, reviewee_id, stars, comment, created_at
            FROM reviews
            WHERE reviewee_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            ",
        )
        .bind(reviewee_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Review::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_offer(&self, offer_id: Uuid, limit: i64) -> RepoResult<Vec<Review>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, offer_id, reviewer_id, reviewee_id, stars, comment, created_at
            FROM reviews
            WHERE offer_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            ",
        )
        .bind(offer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Review::from).collect())
    }

    #[instrument(skip(self))]
    async fn reviewed_offer_ids(
        &self,
        reviewer_id: Uuid,
        reviewee_id: Option<Uuid>,
    ) -> RepoResult<Vec<Uuid>> {
        let results = match reviewee_id {
            Some(reviewee) => {
                sqlx::query_scalar::<_, Uuid>(
                    r"
                    SELECT offer_id FROM reviews
                    WHERE reviewer_id = $1 AND reviewee_id = $2
                    ",
                )
                .bind(reviewer_id)
                .bind(reviewee)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, Uuid>(
                    r"
                    SELECT offer_id FROM reviews
                    WHERE reviewer_id = $1
                    ",
                )
                .bind(reviewer_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results)
    }
}
