use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use service::auth::{
    domain::{AuthSession, LoginInput, RegisterInput},
    repository::UserStore,
    service::AuthService,
    token::TokenIssuer,
};

use crate::errors::ApiError;

pub type DynAuthService = AuthService<dyn UserStore, dyn TokenIssuer>;

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<DynAuthService>,
}

impl ServerState {
    pub fn new(store: Arc<dyn UserStore>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { auth: Arc::new(AuthService::new(store, issuer)) }
    }
}

#[utoipa::path(post, path = "/api/account/register", tag = "account", request_body = crate::openapi::CredentialsRequest, responses((status = 200, description = "Registered", body = crate::openapi::AccountResponse), (status = 409, description = "Username is taken", body = crate::openapi::ErrorResponse), (status = 422, description = "Malformed body", body = crate::openapi::ErrorResponse)))]
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<Json<AuthSession>, ApiError> {
    let Json(input) = payload?;
    let session = state.auth.register(input).await?;
    Ok(Json(session))
}

#[utoipa::path(post, path = "/api/account/login", tag = "account", request_body = crate::openapi::CredentialsRequest, responses((status = 200, description = "Logged In", body = crate::openapi::AccountResponse), (status = 401, description = "Credentials are invalid", body = crate::openapi::ErrorResponse), (status = 422, description = "Malformed body", body = crate::openapi::ErrorResponse)))]
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<AuthSession>, ApiError> {
    let Json(input) = payload?;
    let session = state.auth.login(input).await?;
    Ok(Json(session))
}
