use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::photos::models::{Photo, PhotoWithStatistics};
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::validation::{MONTH_REGEX, YEAR_REGEX};

/// Number of photos returned when navigating to older photos
pub const NAVIGATION_WINDOW: i64 = 10;

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Cursor for before/after navigation
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CursorQueryParams {
    /// Upload timestamp of the photo currently shown (e.g. `2024-03-01T10:15:30.250`)
    #[param(value_type = String, example = "2024-03-01T10:15:30.250")]
    pub uploaded_at: NaiveDateTime,
}

/// Calendar month filter
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct MonthQueryParams {
    /// Four-digit year
    #[validate(regex(path = *YEAR_REGEX, message = "year must be a four-digit year (e.g. '2024')"))]
    #[param(example = "2024")]
    pub year: String,

    /// Zero-padded month, '01' to '12'
    #[validate(regex(path = *MONTH_REGEX, message = "month must be a zero-padded month between '01' and '12'"))]
    #[param(example = "03")]
    pub month: String,
}

/// Offset pagination parameters (not clamped)
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct PageQueryParams {
    /// Number of photos to skip (zero-based)
    #[serde(default)]
    #[validate(range(min = 0, message = "offset must not be negative"))]
    #[param(minimum = 0)]
    pub offset: i64,

    /// Maximum number of photos to return
    #[serde(default = "default_page_size")]
    #[validate(range(min = 0, message = "limit must not be negative"))]
    #[param(minimum = 0)]
    pub limit: i64,
}

/// Response DTO for a photo
///
/// The binary payload is never serialized; `has_data` reports whether one is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PhotoResponseDto {
    pub id: String,
    pub original_file_name: String,
    pub stored_file_name: String,
    /// Storage path; "default_path" replaces a missing path in after-navigation only
    pub file_path: Option<String>,
    /// Size of the file in bytes
    pub file_size: i64,
    pub mime_type: String,
    #[schema(value_type = String, example = "2024-03-01T10:15:30.250")]
    pub uploaded_at: NaiveDateTime,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub has_data: bool,
}

impl From<Photo> for PhotoResponseDto {
    fn from(p: Photo) -> Self {
        Self {
            id: p.id,
            original_file_name: p.original_file_name,
            stored_file_name: p.stored_file_name,
            file_path: p.file_path,
            file_size: p.file_size,
            mime_type: p.mime_type,
            uploaded_at: p.uploaded_at,
            width: p.width,
            height: p.height,
            has_data: p.photo_data.is_some(),
        }
    }
}

/// Photo with statistics computed over the whole album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PhotoStatisticsDto {
    #[serde(flatten)]
    pub photo: PhotoResponseDto,
    /// Rank by file size, largest first; ties share a rank and leave a gap
    pub size_rank: i64,
    /// Sum of file sizes of every photo uploaded at or before this one
    pub running_total: i64,
}

impl From<PhotoWithStatistics> for PhotoStatisticsDto {
    fn from(s: PhotoWithStatistics) -> Self {
        Self {
            photo: PhotoResponseDto::from(s.photo),
            size_rank: s.size_rank,
            running_total: s.running_total,
        }
    }
}
