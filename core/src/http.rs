use crate::auth::{AccessContext, constants::BEARER_PREFIX};
use crate::error::{AuthError, ErrorKind, ServiceError};
use crate::service::CatalogService;
use axum::{
    Json, Router,
    extract::{
        Extension, FromRequest, FromRequestParts, Path, Query, Request, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::HeaderMap,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use http::{Method, StatusCode, header::AUTHORIZATION, request::Parts};
use rpc::{
    AirdropInfo, AuthNonceRequest, AuthNonceResponse, AuthVerifyRequest, AuthVerifyResponse,
    CreateAirdropRequest, ErrorBody, ListAirdropsQuery, PageQuery, UpdateAirdropStatusRequest,
    WatchlistEntryInfo,
};

pub fn router(service: CatalogService) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/auth/nonce", post(post_auth_nonce))
        .route("/auth/verify", post(post_auth_verify))
        .route("/airdrops", get(list_airdrops).post(create_airdrop))
        .route("/airdrops/{id}", get(get_airdrop))
        .route("/airdrops/{id}/status", patch(update_airdrop_status))
        .route("/airdrops/{id}/watchlist", post(add_to_watchlist))
        .route("/watchlist", get(list_watchlist))
        .route_layer(middleware::from_fn_with_state(
            service.clone(),
            auth_middleware,
        ))
        .with_state(service)
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            code: self.code.to_owned(),
        });
        (self.status, body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let code = err.code();
        let status = match err.kind() {
            ErrorKind::Input => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication | ErrorKind::Concurrency => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Infrastructure => {
                log::error!("internal error: {err:#}");
                return ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    "internal server error",
                );
            }
        };
        let message = match err {
            ServiceError::NotFound(msg)
            | ServiceError::Conflict(msg)
            | ServiceError::InvalidParams(msg) => msg,
            other => other.to_string(),
        };
        ApiError::new(status, code, message)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ServiceError::from(err).into()
    }
}

fn rejected(message: String) -> ApiError {
    ServiceError::InvalidParams(message).into()
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        rejected(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        rejected(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        rejected(rejection.body_text())
    }
}

/// `Json` body that reports malformed input as an `ApiError`.
struct ApiJson<T>(T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

struct ApiQuery<T>(T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

struct ApiPath<T>(T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

async fn auth_middleware(
    State(service): State<CatalogService>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if is_public_route(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let token = bearer_token(req.headers())?;
    let auth = service.authorize(token)?;
    req.extensions_mut().insert::<AccessContext>(auth);

    Ok(next.run(req).await)
}

fn is_public_route(method: &Method, path: &str) -> bool {
    if path == "/health" || path == "/auth" || path.starts_with("/auth/") {
        return true;
    }
    method == Method::GET && (path == "/airdrops" || path.starts_with("/airdrops/"))
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::Unauthenticated)?;

    let value = value.trim();
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .or_else(|| value.strip_prefix("bearer "))
        .ok_or(AuthError::Unauthenticated)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::Unauthenticated);
    }

    Ok(token)
}

async fn get_health(State(service): State<CatalogService>) -> Response {
    let report = service.run_health_checks().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report)).into_response()
}

async fn post_auth_nonce(
    State(service): State<CatalogService>,
    ApiJson(req): ApiJson<AuthNonceRequest>,
) -> Result<Json<AuthNonceResponse>, ApiError> {
    let res = service.create_auth_nonce(req).await?;
    Ok(Json(res))
}

async fn post_auth_verify(
    State(service): State<CatalogService>,
    ApiJson(req): ApiJson<AuthVerifyRequest>,
) -> Result<Json<AuthVerifyResponse>, ApiError> {
    let res = service.verify_auth(req).await?;
    Ok(Json(res))
}

async fn list_airdrops(
    State(service): State<CatalogService>,
    ApiQuery(query): ApiQuery<ListAirdropsQuery>,
) -> Result<Json<Vec<AirdropInfo>>, ApiError> {
    let items = service.list_airdrops(query).await?;
    Ok(Json(items))
}

async fn get_airdrop(
    State(service): State<CatalogService>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<AirdropInfo>, ApiError> {
    let item = service.get_airdrop(id).await?;
    Ok(Json(item))
}

async fn create_airdrop(
    State(service): State<CatalogService>,
    Extension(auth): Extension<AccessContext>,
    ApiJson(req): ApiJson<CreateAirdropRequest>,
) -> Result<(StatusCode, Json<AirdropInfo>), ApiError> {
    let item = service.create_airdrop(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_airdrop_status(
    State(service): State<CatalogService>,
    Extension(auth): Extension<AccessContext>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpdateAirdropStatusRequest>,
) -> Result<Json<AirdropInfo>, ApiError> {
    let item = service.update_airdrop_status(&auth, id, req).await?;
    Ok(Json(item))
}

async fn add_to_watchlist(
    State(service): State<CatalogService>,
    Extension(auth): Extension<AccessContext>,
    ApiPath(id): ApiPath<i32>,
) -> Result<(StatusCode, Json<WatchlistEntryInfo>), ApiError> {
    let entry = service.add_to_watchlist(&auth, id).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn list_watchlist(
    State(service): State<CatalogService>,
    Extension(auth): Extension<AccessContext>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<AirdropInfo>>, ApiError> {
    let items = service.list_watchlist(&auth, query).await?;
    Ok(Json(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes() {
        assert!(is_public_route(&Method::GET, "/health"));
        assert!(is_public_route(&Method::POST, "/auth/nonce"));
        assert!(is_public_route(&Method::GET, "/airdrops"));
        assert!(is_public_route(&Method::GET, "/airdrops/7"));
        assert!(!is_public_route(&Method::POST, "/airdrops"));
        assert!(!is_public_route(&Method::PATCH, "/airdrops/7/status"));
        assert!(!is_public_route(&Method::POST, "/airdrops/7/watchlist"));
        assert!(!is_public_route(&Method::GET, "/watchlist"));
    }

    #[test]
    fn bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), Err(AuthError::Unauthenticated));

        headers.insert(AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), Err(AuthError::Unauthenticated));

        headers.insert(AUTHORIZATION, "Bearer   ".parse().unwrap());
        assert_eq!(bearer_token(&headers), Err(AuthError::Unauthenticated));

        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers), Ok("abc.def.ghi"));
    }
}
