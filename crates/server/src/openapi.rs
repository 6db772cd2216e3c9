use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct WriteResultDoc { pub success: bool, pub message: String }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct SectionSummaryDoc {
    pub name: String,
    pub hasValue: bool,
    pub updatedAt: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::sections::get_section,
        crate::routes::sections::post_section,
        crate::routes::sections::list_sections,
    ),
    components(
        schemas(
            HealthResponse,
            WriteResultDoc,
            SectionSummaryDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "sections")
    )
)]
pub struct ApiDoc;
