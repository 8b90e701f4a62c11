use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Database model for photos
///
/// Rows are written by the upload pipeline; this service only reads them.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Photo {
    pub id: String,
    pub original_file_name: String,
    pub photo_data: Option<Vec<u8>>,
    pub stored_file_name: String,
    pub file_path: Option<String>,
    pub file_size: i64,
    pub mime_type: String,
    pub uploaded_at: NaiveDateTime,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// A photo joined with its size rank and running upload total across the whole table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PhotoWithStatistics {
    #[sqlx(flatten)]
    pub photo: Photo,
    pub size_rank: i64,
    pub running_total: i64,
}
