//! PostgreSQL photo store
//!
//! Every query runs natively: month matching uses `TO_CHAR`, and the
//! statistics query uses `RANK()` and a windowed `SUM()`.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use tracing::error;

use super::{PhotoStore, Projection, DEFAULT_FILE_PATH};
use crate::core::error::{AppError, Result};
use crate::features::photos::models::{Photo, PhotoWithStatistics};

const ORDER_NEWEST_FIRST: &str = "ORDER BY uploaded_at DESC, id DESC";
const ORDER_OLDEST_FIRST: &str = "ORDER BY uploaded_at ASC, id ASC";

/// Column list for a photo row under the given projection
fn photo_columns(projection: Projection) -> String {
    let file_path = if projection.substitute_null_path {
        format!("COALESCE(file_path, '{}') AS file_path", DEFAULT_FILE_PATH)
    } else {
        "file_path".to_string()
    };

    format!(
        "id, original_file_name, photo_data, stored_file_name, {}, file_size, \
         mime_type, uploaded_at, width, height",
        file_path
    )
}

fn statistics_query(projection: Projection) -> String {
    // Peers on uploaded_at share one running total, hence RANGE rather than ROWS
    format!(
        r#"
        SELECT {},
               RANK() OVER (ORDER BY file_size DESC) AS size_rank,
               (SUM(file_size) OVER (
                   ORDER BY uploaded_at
                   RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW
               ))::BIGINT AS running_total
        FROM photos
        {}
        "#,
        photo_columns(projection),
        ORDER_NEWEST_FIRST
    )
}

/// Photo store backed by a shared PostgreSQL pool
#[derive(Clone)]
pub struct PgPhotoStore {
    pool: PgPool,
}

impl PgPhotoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoStore for PgPhotoStore {
    async fn list_all(&self, projection: Projection) -> Result<Vec<Photo>> {
        let query = format!(
            "SELECT {} FROM photos {}",
            photo_columns(projection),
            ORDER_NEWEST_FIRST
        );

        sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list photos: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_before(
        &self,
        uploaded_at: NaiveDateTime,
        limit: i64,
        projection: Projection,
    ) -> Result<Vec<Photo>> {
        let query = format!(
            "SELECT {} FROM photos WHERE uploaded_at < $1 {} LIMIT $2",
            photo_columns(projection),
            ORDER_NEWEST_FIRST
        );

        sqlx::query_as(&query)
            .bind(uploaded_at)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list photos before {}: {:?}", uploaded_at, e);
                AppError::Database(e)
            })
    }

    async fn list_after(
        &self,
        uploaded_at: NaiveDateTime,
        projection: Projection,
    ) -> Result<Vec<Photo>> {
        let query = format!(
            "SELECT {} FROM photos WHERE uploaded_at > $1 {}",
            photo_columns(projection),
            ORDER_OLDEST_FIRST
        );

        sqlx::query_as(&query)
            .bind(uploaded_at)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list photos after {}: {:?}", uploaded_at, e);
                AppError::Database(e)
            })
    }

    async fn list_by_month(
        &self,
        year: &str,
        month: &str,
        projection: Projection,
    ) -> Result<Vec<Photo>> {
        let query = format!(
            r#"
            SELECT {} FROM photos
            WHERE TO_CHAR(uploaded_at, 'YYYY') = $1
              AND TO_CHAR(uploaded_at, 'MM') = $2
            {}
            "#,
            photo_columns(projection),
            ORDER_NEWEST_FIRST
        );

        sqlx::query_as(&query)
            .bind(year)
            .bind(month)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list photos for {}-{}: {:?}", year, month, e);
                AppError::Database(e)
            })
    }

    async fn list_page(
        &self,
        offset: i64,
        limit: i64,
        projection: Projection,
    ) -> Result<Vec<Photo>> {
        let query = format!(
            "SELECT {} FROM photos {} LIMIT $1 OFFSET $2",
            photo_columns(projection),
            ORDER_NEWEST_FIRST
        );

        sqlx::query_as(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Failed to fetch photo page (offset={}, limit={}): {:?}",
                    offset, limit, e
                );
                AppError::Database(e)
            })
    }

    async fn list_with_statistics(
        &self,
        projection: Projection,
    ) -> Result<Vec<PhotoWithStatistics>> {
        sqlx::query_as(&statistics_query(projection))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to compute photo statistics: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM photos")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to count photos: {:?}", e);
                AppError::Database(e)
            })
    }
}
