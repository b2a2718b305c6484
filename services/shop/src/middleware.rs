//! Authorization gate and token attachment
//!
//! Protected routes run behind [`auth_middleware`], which turns a bearer
//! token into an [`AuthUser`] stored in the request extensions. Handlers ask
//! for `Extension<AuthUser>`, so they cannot be reached without a verified
//! identity. Signup and signin mint their token through [`attach_token`].

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{
    error::{ApiError, ApiResult},
    jwt::JwtService,
    models::{Account, SessionResponse},
    state::AppState,
};

/// Authenticated account information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
}

/// Authentication middleware
///
/// A missing or non-bearer `Authorization` header is verified as an empty
/// token, so it fails exactly like a forged or expired one.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer
        .as_ref()
        .map(|TypedHeader(Authorization(credentials))| credentials.token())
        .unwrap_or_default();

    let claims = state.jwt_service.verify(token)?;

    req.extensions_mut().insert(AuthUser { id: claims.sub });

    Ok(next.run(req).await)
}

/// Mint a token for a freshly identified account and merge it into the session payload
pub fn attach_token(jwt_service: &JwtService, account: Account) -> ApiResult<SessionResponse> {
    let token = jwt_service
        .issue(account.id)
        .map_err(ApiError::store("Failed to generate token!"))?;

    Ok(SessionResponse {
        id: account.id,
        name: account.name,
        email: account.email,
        token,
    })
}
