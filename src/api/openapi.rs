//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, catalog, health, loans, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Library API",
        version = "0.1.0",
        description = "Library catalog and loan renewal REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        health::health_check,
        health::readiness_check,
        stats::get_stats,
        catalog::list_authors,
        catalog::list_languages,
        catalog::list_genres,
        books::get_book,
        books::create_book,
        books::update_book,
        loans::get_renewal,
        loans::renew_book_instance,
    ),
    components(
        schemas(
            crate::models::author::Author,
            crate::models::language::Language,
            crate::models::genre::Genre,
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::LoanStatus,
            crate::forms::book::BookForm,
            crate::forms::renewal::RenewBookForm,
            crate::forms::FieldError,
            crate::services::stats::IndexStats,
            loans::RenewalProposal,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "stats", description = "Home page counts"),
        (name = "catalog", description = "Authors, languages and genres"),
        (name = "books", description = "Book records"),
        (name = "loans", description = "Loan renewal")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
