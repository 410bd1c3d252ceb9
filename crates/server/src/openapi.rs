use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CredentialsRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct AccountResponse { pub username: String, pub token: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String, pub code: u16 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::account::register,
        crate::routes::account::login,
    ),
    components(
        schemas(
            HealthResponse,
            CredentialsRequest,
            AccountResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "account")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_account_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/account/register"));
        assert!(doc.paths.paths.contains_key("/api/account/login"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
