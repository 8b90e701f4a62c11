//! In-memory photo store
//!
//! Holds the table in process and evaluates every query with plain iterator
//! passes. Statistics are computed in two passes: accumulate along ascending
//! upload time, then present newest first.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{PhotoStore, Projection};
use crate::core::error::{AppError, Result};
use crate::features::photos::models::{Photo, PhotoWithStatistics};

fn oldest_first(a: &Photo, b: &Photo) -> Ordering {
    a.uploaded_at
        .cmp(&b.uploaded_at)
        .then_with(|| a.id.cmp(&b.id))
}

fn newest_first(a: &Photo, b: &Photo) -> Ordering {
    oldest_first(b, a)
}

fn to_usize(value: i64, name: &str) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| AppError::Validation(format!("{} must not be negative", name)))
}

/// Rank of `size` among `sizes_desc` with gaps after ties (SQL `RANK()`)
fn size_rank(sizes_desc: &[i64], size: i64) -> i64 {
    sizes_desc.partition_point(|&s| s > size) as i64 + 1
}

/// Photo store that keeps the whole table in memory
#[derive(Clone, Default)]
pub struct MemoryPhotoStore {
    photos: Arc<RwLock<Vec<Photo>>>,
}

#[allow(dead_code)]
impl MemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_photos(photos: Vec<Photo>) -> Self {
        Self {
            photos: Arc::new(RwLock::new(photos)),
        }
    }

    /// Add a photo, standing in for the upload pipeline
    pub async fn insert(&self, photo: Photo) {
        self.photos.write().await.push(photo);
    }

    /// Remove a photo by id, returning whether it existed
    pub async fn remove(&self, id: &str) -> bool {
        let mut photos = self.photos.write().await;
        let before = photos.len();
        photos.retain(|p| p.id != id);
        photos.len() != before
    }

    /// Snapshot of the rows matching `filter`, sorted by `order`
    async fn select<F>(&self, filter: F, order: fn(&Photo, &Photo) -> Ordering) -> Vec<Photo>
    where
        F: Fn(&Photo) -> bool,
    {
        let mut rows: Vec<Photo> = self
            .photos
            .read()
            .await
            .iter()
            .filter(|p| filter(p))
            .cloned()
            .collect();
        rows.sort_by(order);
        rows
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn list_all(&self, projection: Projection) -> Result<Vec<Photo>> {
        let rows = self.select(|_| true, newest_first).await;
        Ok(rows.into_iter().map(|p| projection.apply(p)).collect())
    }

    async fn list_before(
        &self,
        uploaded_at: NaiveDateTime,
        limit: i64,
        projection: Projection,
    ) -> Result<Vec<Photo>> {
        let limit = to_usize(limit, "limit")?;
        let rows = self
            .select(|p| p.uploaded_at < uploaded_at, newest_first)
            .await;
        Ok(rows
            .into_iter()
            .take(limit)
            .map(|p| projection.apply(p))
            .collect())
    }

    async fn list_after(
        &self,
        uploaded_at: NaiveDateTime,
        projection: Projection,
    ) -> Result<Vec<Photo>> {
        let rows = self
            .select(|p| p.uploaded_at > uploaded_at, oldest_first)
            .await;
        Ok(rows.into_iter().map(|p| projection.apply(p)).collect())
    }

    async fn list_by_month(
        &self,
        year: &str,
        month: &str,
        projection: Projection,
    ) -> Result<Vec<Photo>> {
        let rows = self
            .select(
                |p| {
                    p.uploaded_at.format("%Y").to_string() == year
                        && p.uploaded_at.format("%m").to_string() == month
                },
                newest_first,
            )
            .await;
        Ok(rows.into_iter().map(|p| projection.apply(p)).collect())
    }

    async fn list_page(
        &self,
        offset: i64,
        limit: i64,
        projection: Projection,
    ) -> Result<Vec<Photo>> {
        let offset = to_usize(offset, "offset")?;
        let limit = to_usize(limit, "limit")?;
        let rows = self.select(|_| true, newest_first).await;
        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|p| projection.apply(p))
            .collect())
    }

    async fn list_with_statistics(
        &self,
        projection: Projection,
    ) -> Result<Vec<PhotoWithStatistics>> {
        let ascending = self.select(|_| true, oldest_first).await;

        let mut sizes_desc: Vec<i64> = ascending.iter().map(|p| p.file_size).collect();
        sizes_desc.sort_unstable_by(|a, b| b.cmp(a));

        // Accumulate along ascending time; photos sharing a timestamp share a total
        let mut totals = Vec::with_capacity(ascending.len());
        let mut running_total = 0i64;
        for peers in ascending.chunk_by(|a, b| a.uploaded_at == b.uploaded_at) {
            running_total += peers.iter().map(|p| p.file_size).sum::<i64>();
            totals.extend(std::iter::repeat_n(running_total, peers.len()));
        }

        Ok(ascending
            .into_iter()
            .zip(totals)
            .rev()
            .map(|(photo, running_total)| PhotoWithStatistics {
                size_rank: size_rank(&sizes_desc, photo.file_size),
                running_total,
                photo: projection.apply(photo),
            })
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.photos.read().await.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fake::faker::filesystem::en::FileName;
    use fake::Fake;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_milli_opt(hour, 0, 0, 250)
            .unwrap()
    }

    fn photo(id: &str, uploaded_at: NaiveDateTime, file_size: i64) -> Photo {
        let name: String = FileName().fake();
        Photo {
            id: id.to_string(),
            original_file_name: name.clone(),
            photo_data: None,
            stored_file_name: format!("{}-{}", id, name),
            file_path: None,
            file_size,
            mime_type: "image/jpeg".to_string(),
            uploaded_at,
            width: Some(800),
            height: Some(600),
        }
    }

    fn ids(photos: &[Photo]) -> Vec<&str> {
        photos.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_size_rank_has_gaps_after_ties() {
        let sizes = vec![300, 200, 200, 100];
        assert_eq!(size_rank(&sizes, 300), 1);
        assert_eq!(size_rank(&sizes, 200), 2);
        assert_eq!(size_rank(&sizes, 100), 4);
    }

    #[tokio::test]
    async fn test_ties_on_timestamp_break_by_id() {
        let t = at(1, 9);
        let store = MemoryPhotoStore::with_photos(vec![
            photo("b", t, 1),
            photo("a", t, 1),
            photo("c", t, 1),
        ]);

        let newest = store.list_all(Projection::PASS_THROUGH).await.unwrap();
        assert_eq!(ids(&newest), vec!["c", "b", "a"]);

        let oldest = store
            .list_after(at(1, 8), Projection::PASS_THROUGH)
            .await
            .unwrap();
        assert_eq!(ids(&oldest), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_running_total_shares_value_across_equal_timestamps() {
        let store = MemoryPhotoStore::with_photos(vec![
            photo("a", at(1, 9), 100),
            photo("b", at(2, 9), 50),
            photo("c", at(2, 9), 25),
            photo("d", at(3, 9), 10),
        ]);

        let stats = store
            .list_with_statistics(Projection::PASS_THROUGH)
            .await
            .unwrap();
        let totals: Vec<(&str, i64)> = stats
            .iter()
            .map(|s| (s.photo.id.as_str(), s.running_total))
            .collect();

        assert_eq!(
            totals,
            vec![("d", 185), ("c", 175), ("b", 175), ("a", 100)]
        );
    }

    #[tokio::test]
    async fn test_negative_offset_is_rejected() {
        let store = MemoryPhotoStore::new();
        let result = store.list_page(-1, 10, Projection::PASS_THROUGH).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_insert_and_remove() {
        let store = MemoryPhotoStore::new();
        store.insert(photo("a", at(1, 9), 1)).await;
        store.insert(photo("b", at(2, 9), 1)).await;
        assert_eq!(store.count().await.unwrap(), 2);

        assert!(store.remove("a").await);
        assert!(!store.remove("a").await);
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
