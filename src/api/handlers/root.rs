use axum::response::IntoResponse;

// Undocumented banner route; not part of the OpenAPI spec.
pub async fn root() -> impl IntoResponse {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
