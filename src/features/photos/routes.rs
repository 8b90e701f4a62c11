use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::photos::{handlers, services::PhotoService};

/// Create public read routes for the photo album
pub fn routes(photo_service: Arc<PhotoService>) -> Router {
    Router::new()
        .route("/api/photos", get(handlers::list_photos))
        // Cursor navigation
        .route("/api/photos/before", get(handlers::list_photos_before))
        .route("/api/photos/after", get(handlers::list_photos_after))
        // Filtering and paging
        .route("/api/photos/by-month", get(handlers::list_photos_by_month))
        .route("/api/photos/page", get(handlers::list_photos_page))
        .route("/api/photos/statistics", get(handlers::list_photo_statistics))
        .with_state(photo_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::photos::dtos::{PhotoResponseDto, PhotoStatisticsDto};
    use crate::features::photos::models::Photo;
    use crate::modules::photo_store::MemoryPhotoStore;
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::time::Duration;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_milli_opt(8, 30, 0, 125)
            .unwrap()
    }

    fn photo(id: &str, uploaded_at: NaiveDateTime, file_size: i64) -> Photo {
        Photo {
            id: id.to_string(),
            original_file_name: format!("{}.png", id),
            photo_data: None,
            stored_file_name: format!("stored-{}.png", id),
            file_path: None,
            file_size,
            mime_type: "image/png".to_string(),
            uploaded_at,
            width: None,
            height: None,
        }
    }

    fn server() -> TestServer {
        let store = MemoryPhotoStore::with_photos(vec![
            photo("p1", at(1), 100),
            photo("p2", at(2), 200),
            photo("p3", at(3), 200),
        ]);
        let service = Arc::new(PhotoService::new(
            Arc::new(store),
            Duration::from_secs(5),
        ));
        TestServer::new(routes(service)).unwrap()
    }

    fn ids(body: &ApiResponse<Vec<PhotoResponseDto>>) -> Vec<String> {
        body.data
            .as_ref()
            .unwrap()
            .iter()
            .map(|p| p.id.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_list_photos() {
        let response = server().get("/api/photos").await;

        response.assert_status_ok();
        let body: ApiResponse<Vec<PhotoResponseDto>> = response.json();
        assert!(body.success);
        assert_eq!(ids(&body), vec!["p3", "p2", "p1"]);
    }

    #[tokio::test]
    async fn test_before_and_after_navigation() {
        let server = server();

        let before: ApiResponse<Vec<PhotoResponseDto>> = server
            .get("/api/photos/before")
            .add_query_param("uploaded_at", "2024-05-02T08:30:00.125")
            .await
            .json();
        assert_eq!(ids(&before), vec!["p1"]);

        let after: ApiResponse<Vec<PhotoResponseDto>> = server
            .get("/api/photos/after")
            .add_query_param("uploaded_at", "2024-05-01T08:30:00.125")
            .await
            .json();
        assert_eq!(ids(&after), vec!["p2", "p3"]);
        assert!(after
            .data
            .unwrap()
            .iter()
            .all(|p| p.file_path.as_deref() == Some("default_path")));
    }

    #[tokio::test]
    async fn test_malformed_cursor_is_bad_request() {
        let response = server()
            .get("/api/photos/before")
            .add_query_param("uploaded_at", "yesterday")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ApiResponse<()> = response.json();
        assert!(!body.success);
    }

    #[tokio::test]
    async fn test_by_month() {
        let server = server();

        let may: ApiResponse<Vec<PhotoResponseDto>> = server
            .get("/api/photos/by-month")
            .add_query_param("year", "2024")
            .add_query_param("month", "05")
            .await
            .json();
        assert_eq!(ids(&may), vec!["p3", "p2", "p1"]);

        let june: ApiResponse<Vec<PhotoResponseDto>> = server
            .get("/api/photos/by-month")
            .add_query_param("year", "2024")
            .add_query_param("month", "06")
            .await
            .json();
        assert!(june.data.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_by_month_rejects_unpadded_month() {
        let response = server()
            .get("/api/photos/by-month")
            .add_query_param("year", "2024")
            .add_query_param("month", "5")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ApiResponse<()> = response.json();
        assert!(body.errors.is_some());
    }

    #[tokio::test]
    async fn test_page_reports_total() {
        let response = server()
            .get("/api/photos/page")
            .add_query_param("offset", 1)
            .add_query_param("limit", 1)
            .await;

        response.assert_status_ok();
        let body: ApiResponse<Vec<PhotoResponseDto>> = response.json();
        assert_eq!(ids(&body), vec!["p2"]);
        assert_eq!(body.meta.unwrap().total, 3);
    }

    #[tokio::test]
    async fn test_page_rejects_negative_limit() {
        let response = server()
            .get("/api/photos/page")
            .add_query_param("limit", -1)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_statistics() {
        let response = server().get("/api/photos/statistics").await;

        response.assert_status_ok();
        let body: ApiResponse<Vec<PhotoStatisticsDto>> = response.json();
        let rows: Vec<(String, i64, i64)> = body
            .data
            .unwrap()
            .into_iter()
            .map(|s| (s.photo.id, s.size_rank, s.running_total))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("p3".to_string(), 1, 500),
                ("p2".to_string(), 1, 300),
                ("p1".to_string(), 3, 100),
            ]
        );
    }
}
