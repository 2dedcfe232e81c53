//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use swap_core::entities::Profile;
use swap_core::error::DomainError;
use swap_core::traits::{ProfileRepository, RatingSummary, RepoResult};

use crate::models::ProfileModel;

use super::error::{map_db_error, map_unique_violation, profile_not_found};

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new PgProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, email, name, avatar_url, bio, phone, city, zip,
                   interests, skills_offered, skills_needed,
                   rating, reviews_count, completed_swaps, created_at, updated_at
            FROM profiles
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self, profile))]
    async fn create(&self, profile: &Profile) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO profiles (id, email, name, avatar_url, bio, phone, city, zip,
                                  interests, skills_offered, skills_needed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(profile.id)
        .bind(&profile.email)
        .bind(&profile.name)
        .bind(&profile.avatar_url)
        .bind(&profile.bio)
        .bind(&profile.phone)
        .bind(&profile.city)
        .bind(&profile.zip)
        .bind(&profile.interests)
        .bind(&profile.skills_offered)
        .bind(&profile.skills_needed)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, profile))]
    async fn update(&self, profile: &Profile) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET name = $2, bio = $3, phone = $4, city = $5, zip = $6,
                interests = $7, skills_offered = $8, skills_needed = $9,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(profile.id)
        .bind(&profile.name)
        .bind(&profile.bio)
        .bind(&profile.phone)
        .bind(&profile.city)
        .bind(&profile.zip)
        .bind(&profile.interests)
        .bind(&profile.skills_offered)
        .bind(&profile.skills_needed)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(profile.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_avatar(&self, id: Uuid, avatar_url: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET avatar_url = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(avatar_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn rating_summary(&self, id: Uuid) -> RepoResult<RatingSummary> {
        let (avg_rating, total_reviews) = sqlx::query_as::<_, (f64, i64)>(
            r"
            SELECT avg_rating, total_reviews FROM profile_rating($1)
            ",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(RatingSummary {
            avg_rating,
            total_reviews,
        })
    }
}
