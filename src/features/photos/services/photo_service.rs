use chrono::NaiveDateTime;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::photos::dtos::{
    MonthQueryParams, PageQueryParams, PhotoResponseDto, PhotoStatisticsDto, NAVIGATION_WINDOW,
};
use crate::modules::photo_store::{PhotoStore, Projection};

/// Service for browsing the photo album
///
/// Holds no per-request state; every call is an independent read against the
/// store. Input is validated before the store is touched, and each store call
/// is bounded by the configured query timeout.
pub struct PhotoService {
    store: Arc<dyn PhotoStore>,
    query_timeout: Duration,
}

impl PhotoService {
    pub fn new(store: Arc<dyn PhotoStore>, query_timeout: Duration) -> Self {
        Self {
            store,
            query_timeout,
        }
    }

    /// Run a store call under the query timeout
    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.query_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!("Photo query '{}' failed: {}", operation, e);
                Err(e)
            }
            Err(_) => {
                error!(
                    "Photo query '{}' timed out after {:?}",
                    operation, self.query_timeout
                );
                Err(AppError::StoreUnavailable(format!(
                    "{} timed out after {}ms",
                    operation,
                    self.query_timeout.as_millis()
                )))
            }
        }
    }

    /// List every photo, newest first
    pub async fn list_all(&self) -> Result<Vec<PhotoResponseDto>> {
        let photos = self
            .bounded("list_all", self.store.list_all(Projection::PASS_THROUGH))
            .await?;

        debug!("Listed {} photos", photos.len());
        Ok(photos.into_iter().map(PhotoResponseDto::from).collect())
    }

    /// The photos shown just before `uploaded_at` when browsing towards older photos
    ///
    /// Returns at most [`NAVIGATION_WINDOW`] photos, newest first. A photo
    /// uploaded exactly at `uploaded_at` is excluded.
    pub async fn list_before(&self, uploaded_at: NaiveDateTime) -> Result<Vec<PhotoResponseDto>> {
        let photos = self
            .bounded(
                "list_before",
                self.store
                    .list_before(uploaded_at, NAVIGATION_WINDOW, Projection::PASS_THROUGH),
            )
            .await?;

        debug!("Found {} photos before {}", photos.len(), uploaded_at);
        Ok(photos.into_iter().map(PhotoResponseDto::from).collect())
    }

    /// Every photo uploaded after `uploaded_at`, oldest first
    ///
    /// Unlike the other listings, a missing file path is reported as
    /// `"default_path"`.
    pub async fn list_after(&self, uploaded_at: NaiveDateTime) -> Result<Vec<PhotoResponseDto>> {
        let photos = self
            .bounded(
                "list_after",
                self.store
                    .list_after(uploaded_at, Projection::SUBSTITUTE_NULL_PATH),
            )
            .await?;

        debug!("Found {} photos after {}", photos.len(), uploaded_at);
        Ok(photos.into_iter().map(PhotoResponseDto::from).collect())
    }

    /// Photos uploaded in the given calendar month, newest first
    pub async fn list_by_month(&self, params: &MonthQueryParams) -> Result<Vec<PhotoResponseDto>> {
        params
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let photos = self
            .bounded(
                "list_by_month",
                self.store
                    .list_by_month(&params.year, &params.month, Projection::PASS_THROUGH),
            )
            .await?;

        debug!(
            "Found {} photos for {}-{}",
            photos.len(),
            params.year,
            params.month
        );
        Ok(photos.into_iter().map(PhotoResponseDto::from).collect())
    }

    /// One offset page of photos, newest first
    /// Returns (photos, total_count)
    pub async fn list_page(&self, params: &PageQueryParams) -> Result<(Vec<PhotoResponseDto>, i64)> {
        params
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let photos = self
            .bounded(
                "list_page",
                self.store
                    .list_page(params.offset, params.limit, Projection::PASS_THROUGH),
            )
            .await?;
        let total = self.bounded("count", self.store.count()).await?;

        debug!(
            "Fetched page offset={} limit={}: {} of {} photos",
            params.offset,
            params.limit,
            photos.len(),
            total
        );
        Ok((
            photos.into_iter().map(PhotoResponseDto::from).collect(),
            total,
        ))
    }

    /// Every photo with its size rank and running upload total, newest first
    pub async fn list_with_statistics(&self) -> Result<Vec<PhotoStatisticsDto>> {
        let rows = self
            .bounded(
                "list_with_statistics",
                self.store.list_with_statistics(Projection::PASS_THROUGH),
            )
            .await?;

        debug!("Computed statistics for {} photos", rows.len());
        Ok(rows.into_iter().map(PhotoStatisticsDto::from).collect())
    }
}
