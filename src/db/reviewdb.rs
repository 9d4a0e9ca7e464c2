use async_trait::async_trait;
use uuid::Uuid;

use crate::db::db::DBClient;
use crate::models::reviewmodel::Review;

const REVIEW_COLUMNS: &str = "id, reviewer_name, reviewer_email, rating, comment, created_at";

#[async_trait]
pub trait ReviewExt {
    async fn create_review(
        &self,
        reviewer_name: &str,
        reviewer_email: &str,
        rating: i32,
        comment: &str,
    ) -> Result<Review, sqlx::Error>;

    /// Newest first.
    async fn get_reviews(&self, limit: usize) -> Result<Vec<Review>, sqlx::Error>;

    async fn delete_review(&self, review_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn create_review(
        &self,
        reviewer_name: &str,
        reviewer_email: &str,
        rating: i32,
        comment: &str,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "INSERT INTO reviews (reviewer_name, reviewer_email, rating, comment) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            REVIEW_COLUMNS
        ))
        .bind(reviewer_name)
        .bind(reviewer_email)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_reviews(&self, limit: usize) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {} FROM reviews ORDER BY created_at DESC LIMIT $1",
            REVIEW_COLUMNS
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_review(&self, review_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
