use utoipa::{Modify, OpenApi};

use crate::features::photos::{dtos as photos_dtos, handlers as photos_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Photos
        photos_handlers::list_photos,
        photos_handlers::list_photos_before,
        photos_handlers::list_photos_after,
        photos_handlers::list_photos_by_month,
        photos_handlers::list_photos_page,
        photos_handlers::list_photo_statistics,
    ),
    components(
        schemas(
            Meta,
            photos_dtos::PhotoResponseDto,
            photos_dtos::PhotoStatisticsDto,
            ApiResponse<Vec<photos_dtos::PhotoResponseDto>>,
            ApiResponse<Vec<photos_dtos::PhotoStatisticsDto>>,
        )
    ),
    tags(
        (name = "photos", description = "Photo album browsing, navigation and statistics"),
    ),
    info(
        title = "Photo Album API",
        version = "0.1.0",
        description = "Read API for browsing the photo album",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_photo_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/photos",
            "/api/photos/before",
            "/api/photos/after",
            "/api/photos/by-month",
            "/api/photos/page",
            "/api/photos/statistics",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_swagger_info_modifier_overrides_info() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Album".to_string(),
            version: "9.9.9".to_string(),
            description: "custom".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Album");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("custom"));
    }
}
