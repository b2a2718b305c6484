//! Shop service routes
//!
//! Each handler runs the same pipeline: the body is parsed and validated,
//! protected routes have already passed the authorization gate, the store
//! is called, and the result is wrapped in the `{"status": "OK"}` envelope.
//! Every failure short-circuits as an [`ApiError`].

use axum::{
    Extension, Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    middleware::{AuthUser, attach_token, auth_middleware},
    models::{
        AccountsResponse, Ack, CartResponse, Envelope, NewAccount, NewOrder, NewOrderRequest,
        NewOrderResponse, OrdersResponse, SigninRequest, SignupRequest, UpdateCartRequest,
        UpdateOrderRequest, UpdateOrderResponse, UpdateProfileRequest, UpdateProfileResponse,
    },
    state::AppState,
    validation,
};

/// JSON body whose parse failures become validation envelopes
type JsonBody<T> = WithRejection<Json<T>, ApiError>;

/// Create the router for the shop service
///
/// `debug_routes` mounts the unauthenticated `GET /users` and `GET /orders`
/// listings.
pub fn create_router(state: AppState, debug_routes: bool) -> Router {
    let protected_routes = Router::new()
        .route("/users/update", post(update_profile))
        .route("/cart", get(get_cart).put(put_cart))
        .route("/orders/neworder", post(new_order))
        .route("/orders/all", get(get_user_orders))
        .route("/orders/updateorder", post(update_order))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let mut public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/users/signup", post(signup))
        .route("/users/signin", post(signin));

    if debug_routes {
        public_routes = public_routes
            .route("/users", get(get_users))
            .route("/orders", get(get_orders));
    }

    public_routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match common::database::health_check(&state.db_pool).await {
        Ok(true) => "up",
        _ => "down",
    };

    Json(json!({
        "status": "OK",
        "database": database,
    }))
}

/// Sign up a new account
pub async fn signup(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_signup(&payload.name, &payload.email, &payload.password)
        .map_err(ApiError::Validation)?;

    let new_account = NewAccount::from(payload);
    let account = state
        .account_repository
        .create(&new_account)
        .await
        .map_err(|e| e.into_api("Failed to insert user into table!"))?;

    info!("Account {} signed up", account.id);

    Ok(Envelope::ok(attach_token(&state.jwt_service, account)?))
}

/// Sign in an existing account
pub async fn signin(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<SigninRequest>,
) -> ApiResult<impl IntoResponse> {
    let account = state
        .account_repository
        .authenticate(&payload.email, &payload.password)
        .await
        .map_err(|e| e.into_api("Failed to login user!"))?;

    Ok(Envelope::ok(attach_token(&state.jwt_service, account)?))
}

/// Update the caller's name and password
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): JsonBody<UpdateProfileRequest>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_profile_update(&payload.name, &payload.password)
        .map_err(ApiError::Validation)?;

    state
        .account_repository
        .update_profile(user.id, &payload.name, &payload.password)
        .await
        .map_err(ApiError::store("Failed to update user!"))?;

    Ok(Envelope::ok(UpdateProfileResponse {
        name: payload.name,
        message: "User name and password update successfully.",
    }))
}

/// Get the caller's cart
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let items = state
        .cart_repository
        .get(user.id)
        .await
        .map_err(ApiError::store("Failed to get cart!"))?;

    Ok(Envelope::ok(CartResponse { items }))
}

/// Replace the caller's cart
pub async fn put_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): JsonBody<UpdateCartRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .cart_repository
        .put(user.id, &payload.items)
        .await
        .map_err(ApiError::store("Failed to update cart!"))?;

    Ok(Envelope::ok(Ack {}))
}

/// Place a new order for the caller
pub async fn new_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): JsonBody<NewOrderRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_order = NewOrder::try_from(payload).map_err(ApiError::Validation)?;

    let id = state
        .order_repository
        .create(user.id, &new_order)
        .await
        .map_err(ApiError::store("Failed to create order!"))?;

    Ok(Envelope::ok(NewOrderResponse { id }))
}

/// Get the caller's orders
pub async fn get_user_orders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let orders = state
        .order_repository
        .list_by_user(user.id)
        .await
        .map_err(ApiError::store("Failed to get orders!"))?;

    Ok(Envelope::ok(OrdersResponse { orders }))
}

/// Set the paid and delivered flags of one of the caller's orders
pub async fn update_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): JsonBody<UpdateOrderRequest>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_status_flags(payload.is_paid, payload.is_delivered)
        .map_err(ApiError::Validation)?;

    let result = state
        .order_repository
        .update_status(
            payload.order_id,
            user.id,
            payload.is_paid,
            payload.is_delivered,
        )
        .await
        .map_err(ApiError::store("Failed to update order!"))?;

    Ok(Envelope::ok(UpdateOrderResponse { result }))
}

/// Get all accounts (debug only)
pub async fn get_users(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let users = state
        .account_repository
        .list_all()
        .await
        .map_err(ApiError::store("Failed to get all user!"))?;

    Ok(Envelope::ok(AccountsResponse { users }))
}

/// Get all orders (debug only)
pub async fn get_orders(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let orders = state
        .order_repository
        .list_all()
        .await
        .map_err(ApiError::store("Failed to get orders!"))?;

    Ok(Envelope::ok(OrdersResponse { orders }))
}
