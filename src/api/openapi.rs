//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    audit, auth, authors, books, health, penalties, publishers, registry, roles, taxonomies,
    translators, users,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblion API",
        version = "0.3.0",
        description = "Library catalog management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        auth::logout,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Publishers
        publishers::list_publishers,
        publishers::get_publisher,
        publishers::create_publisher,
        publishers::update_publisher,
        publishers::delete_publisher,
        // Categories
        taxonomies::list_categories,
        taxonomies::get_category,
        taxonomies::create_category,
        taxonomies::update_category,
        taxonomies::delete_category,
        // Languages
        taxonomies::list_languages,
        taxonomies::get_language,
        taxonomies::create_language,
        taxonomies::update_language,
        taxonomies::delete_language,
        // Formats
        taxonomies::list_formats,
        taxonomies::get_format,
        taxonomies::create_format,
        taxonomies::update_format,
        taxonomies::delete_format,
        // Translators
        translators::list_translators,
        translators::get_translator,
        translators::create_translator,
        translators::update_translator,
        translators::delete_translator,
        // Roles
        roles::list_roles,
        roles::get_role,
        roles::create_role,
        roles::update_role,
        roles::delete_role,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Penalty rules
        penalties::list_penalty_rules,
        penalties::get_penalty_rule,
        penalties::create_penalty_rule,
        penalties::update_penalty_rule,
        penalties::delete_penalty_rule,
        // Audit
        audit::list_audit,
        audit::get_audit_entry,
        // Registry
        registry::lookup,
        registry::import,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            auth::LogoutResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Publishers
            crate::models::publisher::Publisher,
            crate::models::publisher::CreatePublisher,
            crate::models::publisher::UpdatePublisher,
            // Taxonomies
            crate::models::taxonomy::Lookup,
            crate::models::taxonomy::CreateLookup,
            crate::models::taxonomy::UpdateLookup,
            // Translators
            crate::models::translator::Translator,
            crate::models::translator::CreateTranslator,
            crate::models::translator::UpdateTranslator,
            // Roles
            crate::models::role::Role,
            crate::models::role::CreateRole,
            crate::models::role::UpdateRole,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::user::UserRole,
            crate::models::user::UserStatus,
            // Penalty rules
            crate::models::penalty::PenaltyRule,
            crate::models::penalty::CreatePenaltyRule,
            crate::models::penalty::UpdatePenaltyRule,
            // Audit
            crate::models::audit::AuditEntry,
            crate::models::audit::AuditAction,
            // Registry
            crate::models::record::BiblioRecord,
            crate::models::record::ImportRequest,
            registry::LookupQuery,
            // Collection predicates
            crate::collection::SortDirection,
            crate::collection::StatusFilter,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Session authentication"),
        (name = "books", description = "Catalog book management"),
        (name = "authors", description = "Author management"),
        (name = "publishers", description = "Publisher management"),
        (name = "taxonomies", description = "Categories, languages, and formats"),
        (name = "translators", description = "Translator management"),
        (name = "roles", description = "Contributor role management"),
        (name = "users", description = "User management"),
        (name = "penalties", description = "Penalty rule management"),
        (name = "audit", description = "Audit trail"),
        (name = "registry", description = "ISBN registry lookup and import")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
