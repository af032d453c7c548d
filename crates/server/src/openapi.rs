use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// `visit_count` is -1 and `error` is set on every failure.
#[derive(ToSchema)]
pub struct VisitCountDoc {
    pub visit_count: i64,
    pub error: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::sequence::increment,
    ),
    components(
        schemas(
            HealthResponse,
            VisitCountDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "sequence", description = "Atomic named counters"),
    )
)]
pub struct ApiDoc;
