use axum::{extract::{Query, State}, Json};
use common::types::VisitCount;
use service::sequence::storage::SequenceStorage;

use crate::errors::IncrementError;
use crate::routes::AppState;

/// Picks the sequence name from raw query pairs.
///
/// The first `sequence_name` wins, then the first `sequence`. Repeated keys
/// are ignored rather than rejected.
pub fn sequence_name_from(pairs: &[(String, String)]) -> Option<&str> {
    let first = |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());
    first("sequence_name").or_else(|| first("sequence"))
}

#[utoipa::path(
    get, path = "/increment", tag = "sequence",
    params(("sequence_name" = String, Query, description = "Name of an existing sequence")),
    responses(
        (status = 200, description = "Incremented", body = crate::openapi::VisitCountDoc),
        (status = 400, description = "Missing sequence_name", body = crate::openapi::VisitCountDoc),
        (status = 404, description = "Unknown sequence", body = crate::openapi::VisitCountDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::VisitCountDoc)
    )
)]
pub async fn increment<S>(
    State(state): State<AppState<S>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<VisitCount>, IncrementError>
where
    S: SequenceStorage + 'static,
{
    let name = sequence_name_from(&pairs).unwrap_or_default();
    let count = state.store.increment(name).await?;
    Ok(Json(VisitCount::ok(count)))
}
