//! Photo store adapters
//!
//! The photo table is owned by the upload pipeline. These adapters expose the
//! read queries the album needs, either natively in PostgreSQL or as an
//! in-process computation over an in-memory table.

mod memory;
mod postgres;

pub use memory::MemoryPhotoStore;
pub use postgres::PgPhotoStore;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::core::error::Result;
use crate::features::photos::models::{Photo, PhotoWithStatistics};

/// Substituted for a missing file path when a projection asks for it
pub const DEFAULT_FILE_PATH: &str = "default_path";

/// Per-query projection options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Projection {
    /// Replace a NULL `file_path` with [`DEFAULT_FILE_PATH`]
    pub substitute_null_path: bool,
}

impl Projection {
    pub const PASS_THROUGH: Projection = Projection {
        substitute_null_path: false,
    };

    pub const SUBSTITUTE_NULL_PATH: Projection = Projection {
        substitute_null_path: true,
    };

    pub(crate) fn apply(&self, mut photo: Photo) -> Photo {
        if self.substitute_null_path && photo.file_path.is_none() {
            photo.file_path = Some(DEFAULT_FILE_PATH.to_string());
        }
        photo
    }
}

/// Read access to the photo table.
///
/// Chronological queries order by `uploaded_at`, breaking ties by `id` in the
/// same direction, so a descending listing is the exact reverse of an
/// ascending one.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// All photos, newest first
    async fn list_all(&self, projection: Projection) -> Result<Vec<Photo>>;

    /// Up to `limit` photos uploaded strictly before `uploaded_at`, newest first
    async fn list_before(
        &self,
        uploaded_at: NaiveDateTime,
        limit: i64,
        projection: Projection,
    ) -> Result<Vec<Photo>>;

    /// All photos uploaded strictly after `uploaded_at`, oldest first
    async fn list_after(
        &self,
        uploaded_at: NaiveDateTime,
        projection: Projection,
    ) -> Result<Vec<Photo>>;

    /// Photos whose upload timestamp formats to `year` (`YYYY`) and `month` (`MM`), newest first
    async fn list_by_month(
        &self,
        year: &str,
        month: &str,
        projection: Projection,
    ) -> Result<Vec<Photo>>;

    /// Newest-first slice starting at `offset`, at most `limit` long
    async fn list_page(
        &self,
        offset: i64,
        limit: i64,
        projection: Projection,
    ) -> Result<Vec<Photo>>;

    /// Every photo with its size rank and running total, newest first
    async fn list_with_statistics(
        &self,
        projection: Projection,
    ) -> Result<Vec<PhotoWithStatistics>>;

    /// Number of photos in the store
    async fn count(&self) -> Result<i64>;
}
