use actix_web::HttpResponse;

/// Liveness probe: answers 200 with an empty body as long as the server accepts requests.
#[tracing::instrument(name = "Checking service health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
