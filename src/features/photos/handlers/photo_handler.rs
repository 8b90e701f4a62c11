use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::photos::dtos::{
    CursorQueryParams, MonthQueryParams, PageQueryParams, PhotoResponseDto, PhotoStatisticsDto,
};
use crate::features::photos::services::PhotoService;
use crate::shared::types::{ApiResponse, Meta};

/// List all photos, newest first
#[utoipa::path(
    get,
    path = "/api/photos",
    responses(
        (status = 200, description = "Photos retrieved successfully", body = ApiResponse<Vec<PhotoResponseDto>>),
        (status = 503, description = "Photo store unavailable")
    ),
    tag = "photos"
)]
pub async fn list_photos(
    State(service): State<Arc<PhotoService>>,
) -> Result<Json<ApiResponse<Vec<PhotoResponseDto>>>> {
    let photos = service.list_all().await?;
    Ok(Json(ApiResponse::success(Some(photos), None, None)))
}

/// Up to 10 photos uploaded before the given timestamp, newest first
#[utoipa::path(
    get,
    path = "/api/photos/before",
    params(CursorQueryParams),
    responses(
        (status = 200, description = "Older photos retrieved successfully", body = ApiResponse<Vec<PhotoResponseDto>>),
        (status = 400, description = "Invalid timestamp"),
        (status = 503, description = "Photo store unavailable")
    ),
    tag = "photos"
)]
pub async fn list_photos_before(
    State(service): State<Arc<PhotoService>>,
    AppQuery(params): AppQuery<CursorQueryParams>,
) -> Result<Json<ApiResponse<Vec<PhotoResponseDto>>>> {
    let photos = service.list_before(params.uploaded_at).await?;
    Ok(Json(ApiResponse::success(Some(photos), None, None)))
}

/// All photos uploaded after the given timestamp, oldest first
#[utoipa::path(
    get,
    path = "/api/photos/after",
    params(CursorQueryParams),
    responses(
        (status = 200, description = "Newer photos retrieved successfully", body = ApiResponse<Vec<PhotoResponseDto>>),
        (status = 400, description = "Invalid timestamp"),
        (status = 503, description = "Photo store unavailable")
    ),
    tag = "photos"
)]
pub async fn list_photos_after(
    State(service): State<Arc<PhotoService>>,
    AppQuery(params): AppQuery<CursorQueryParams>,
) -> Result<Json<ApiResponse<Vec<PhotoResponseDto>>>> {
    let photos = service.list_after(params.uploaded_at).await?;
    Ok(Json(ApiResponse::success(Some(photos), None, None)))
}

/// Photos uploaded in a calendar month, newest first
#[utoipa::path(
    get,
    path = "/api/photos/by-month",
    params(MonthQueryParams),
    responses(
        (status = 200, description = "Photos retrieved successfully", body = ApiResponse<Vec<PhotoResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 503, description = "Photo store unavailable")
    ),
    tag = "photos"
)]
pub async fn list_photos_by_month(
    State(service): State<Arc<PhotoService>>,
    AppQuery(params): AppQuery<MonthQueryParams>,
) -> Result<Json<ApiResponse<Vec<PhotoResponseDto>>>> {
    let photos = service.list_by_month(&params).await?;
    Ok(Json(ApiResponse::success(Some(photos), None, None)))
}

/// One offset page of photos, newest first
#[utoipa::path(
    get,
    path = "/api/photos/page",
    params(PageQueryParams),
    responses(
        (status = 200, description = "Page retrieved successfully", body = ApiResponse<Vec<PhotoResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 503, description = "Photo store unavailable")
    ),
    tag = "photos"
)]
pub async fn list_photos_page(
    State(service): State<Arc<PhotoService>>,
    AppQuery(params): AppQuery<PageQueryParams>,
) -> Result<Json<ApiResponse<Vec<PhotoResponseDto>>>> {
    let (photos, total) = service.list_page(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(photos),
        None,
        Some(Meta { total }),
    )))
}

/// All photos with file size rank and running upload total
#[utoipa::path(
    get,
    path = "/api/photos/statistics",
    responses(
        (status = 200, description = "Statistics computed successfully", body = ApiResponse<Vec<PhotoStatisticsDto>>),
        (status = 503, description = "Photo store unavailable")
    ),
    tag = "photos"
)]
pub async fn list_photo_statistics(
    State(service): State<Arc<PhotoService>>,
) -> Result<Json<ApiResponse<Vec<PhotoStatisticsDto>>>> {
    let stats = service.list_with_statistics().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
