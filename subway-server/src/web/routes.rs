//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
};
use futures::future::join_all;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{InvalidId, LineId, Section, StationId};
use crate::favorites::{FavoriteError, FavoritePath};
use crate::network::CatalogError;
use crate::planner::{PathError, RouteError};

use super::auth::{AuthError, LoginMember};
use super::dto::*;
use super::state::AppState;
use super::templates::PathTemplate;

/// Age used to price paths for anonymous requests (adult fare).
const ANONYMOUS_AGE: i64 = 20;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations).post(create_station))
        .route("/lines", get(list_lines).post(create_line))
        .route("/lines/:id", delete(delete_line))
        .route("/lines/:id/sections", post(create_section))
        .route("/paths", get(find_path))
        .route("/favorites/stations", get(list_favorite_stations))
        .route(
            "/favorites/stations/:id",
            post(create_favorite_station).delete(delete_favorite_station),
        )
        .route(
            "/favorites/paths",
            get(list_favorite_paths).post(create_favorite_path),
        )
        .route("/favorites/paths/:id", delete(delete_favorite_path))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// `201 Created` with a `Location` header.
fn created<T: serde::Serialize>(location: String, body: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}

async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let stations = state.routes.store().stations().await;
    Json(StationsResponse { stations })
}

async fn create_station(
    State(state): State<AppState>,
    Json(req): Json<CreateStationRequest>,
) -> Result<Response, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "station name must not be empty".to_string(),
        });
    }
    let station = state.routes.add_station(req.name.trim()).await?;
    Ok(created(format!("/stations/{}", station.id), station))
}

async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let lines = state.routes.store().lines().await;
    Json(LinesResponse { lines })
}

async fn create_line(
    State(state): State<AppState>,
    Json(req): Json<CreateLineRequest>,
) -> Result<Response, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "line name must not be empty".to_string(),
        });
    }
    let line = state.routes.add_line(req.name.trim(), req.surcharge).await?;
    Ok(created(format!("/lines/{}", line.id), line))
}

async fn delete_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.routes.remove_line(LineId::new(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_section(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<CreateSectionRequest>,
) -> Result<Json<crate::domain::Line>, AppError> {
    let section = Section::new(
        StationId::new(req.up_station_id)?,
        StationId::new(req.down_station_id)?,
        req.distance,
    );
    let line = state.routes.add_section(LineId::new(id)?, section).await?;
    Ok(Json(line))
}

/// Find and price the shortest path between two stations.
async fn find_path(
    State(state): State<AppState>,
    member: Option<LoginMember>,
    headers: HeaderMap,
    Query(query): Query<PathQuery>,
) -> Result<Response, AppError> {
    let source = StationId::new(query.source)?;
    let target = StationId::new(query.target)?;
    let age = query
        .age
        .or(member.map(|m| m.age))
        .unwrap_or(ANONYMOUS_AGE);

    let plan = state.routes.find_route(source, target, age).await?;
    let stations = state
        .routes
        .store()
        .stations_by_id(plan.route.stations())
        .await?;
    let response = PathResponse::new(&plan, stations);

    if accepts_html(&headers) {
        let html = PathTemplate::from_response(&response)
            .render()
            .map_err(|e| AppError::Internal {
                message: format!("Template error: {}", e),
            })?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(response).into_response())
    }
}

async fn create_favorite_station(
    State(state): State<AppState>,
    member: LoginMember,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    let station_id = StationId::new(id)?;
    let favorite = state.favorites.save_station(member.id, station_id).await?;
    let station = state.routes.store().station(station_id).await?;

    Ok(created(
        format!("/favorites/{}", favorite.id),
        FavoriteStationView::new(&favorite, station),
    ))
}

async fn list_favorite_stations(
    State(state): State<AppState>,
    member: LoginMember,
) -> Result<Json<FavoriteStationsResponse>, AppError> {
    let favorites = state.favorites.stations_of(member.id).await;
    let ids: Vec<StationId> = favorites.iter().map(|f| f.station).collect();
    let stations = state.routes.store().stations_by_id(&ids).await?;

    let favorites = favorites
        .iter()
        .zip(stations)
        .map(|(f, s)| FavoriteStationView::new(f, s))
        .collect();
    Ok(Json(FavoriteStationsResponse { favorites }))
}

async fn delete_favorite_station(
    State(state): State<AppState>,
    member: LoginMember,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.favorites.delete_station(member.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_favorite_path(
    State(state): State<AppState>,
    member: LoginMember,
    Query(query): Query<FavoritePathQuery>,
) -> Result<Response, AppError> {
    let source = StationId::new(query.start_id)?;
    let target = StationId::new(query.end_id)?;
    let favorite = state.favorites.save_path(member.id, source, target).await?;
    let view = favorite_path_view(&state, &favorite).await?;

    Ok(created(format!("/favorites/{}", favorite.id), view))
}

async fn list_favorite_paths(
    State(state): State<AppState>,
    member: LoginMember,
) -> Result<Json<FavoritePathsResponse>, AppError> {
    let paths = state.favorites.paths_of(member.id).await;
    let favorites = join_all(paths.iter().map(|f| favorite_path_view(&state, f)))
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(FavoritePathsResponse { favorites }))
}

async fn delete_favorite_path(
    State(state): State<AppState>,
    member: LoginMember,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.favorites.delete_path(member.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve a favorite path against the current network.
///
/// A pair the network no longer connects is returned without stations
/// rather than failing the whole listing.
async fn favorite_path_view(
    state: &AppState,
    favorite: &FavoritePath,
) -> Result<FavoritePathView, AppError> {
    let store = state.routes.store();
    let source = store.station(favorite.source).await?;
    let target = store.station(favorite.target).await?;

    let stations = match state.routes.find_path(favorite.source, favorite.target).await {
        Ok(route) => Some(store.stations_by_id(route.stations()).await?),
        Err(RouteError::Path(e)) => {
            warn!(favorite = favorite.id, error = %e, "Favorite path not routable");
            None
        }
        Err(e) => return Err(e.into()),
    };

    Ok(FavoritePathView::new(favorite, source, target, stations))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unauthorized { message: String },
    Forbidden { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &str) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message),
            AppError::Forbidden { message } => (StatusCode::FORBIDDEN, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.status_and_message().0
    }
}

impl From<InvalidId> for AppError {
    fn from(e: InvalidId) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Unauthorized {
            message: e.to_string(),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let message = e.to_string();
        match e {
            RouteError::Path(PathError::StationNotFound(_) | PathError::NoPath { .. }) => {
                AppError::NotFound { message }
            }
            RouteError::Path(PathError::SameStation(_))
            | RouteError::Topology(_)
            | RouteError::InvalidAge(_) => AppError::BadRequest { message },
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        let message = e.to_string();
        match e {
            CatalogError::StationNotFound(_) | CatalogError::LineNotFound(_) => {
                AppError::NotFound { message }
            }
            CatalogError::InvalidSection(_) => AppError::BadRequest { message },
            CatalogError::IdsExhausted(_) => AppError::Internal { message },
            CatalogError::DuplicateStationName(_)
            | CatalogError::DuplicateLineName(_)
            | CatalogError::DuplicateStationId(_)
            | CatalogError::DuplicateLineId(_) => AppError::Conflict { message },
        }
    }
}

impl From<FavoriteError> for AppError {
    fn from(e: FavoriteError) -> Self {
        let message = e.to_string();
        match e {
            FavoriteError::StationNotFound(_) | FavoriteError::NotFound(_) => {
                AppError::NotFound { message }
            }
            FavoriteError::SameStation(_) => AppError::BadRequest { message },
            FavoriteError::AlreadySaved => AppError::Conflict { message },
            FavoriteError::NotOwner { .. } => AppError::Forbidden { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            error!(status = %status, "{message}");
        } else {
            warn!(status = %status, "{message}");
        }

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InvalidAge, TopologyError};

    fn sid(n: u64) -> StationId {
        StationId::new(n).unwrap()
    }

    #[test]
    fn path_errors_map_to_statuses() {
        let not_found: AppError = RouteError::Path(PathError::StationNotFound(sid(1))).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let no_path: AppError = RouteError::Path(PathError::NoPath {
            from: sid(1),
            to: sid(2),
        })
        .into();
        assert_eq!(no_path.status(), StatusCode::NOT_FOUND);

        let same: AppError = RouteError::Path(PathError::SameStation(sid(1))).into();
        assert_eq!(same.status(), StatusCode::BAD_REQUEST);

        let topology: AppError = RouteError::Topology(TopologyError::SelfLoop {
            line: LineId::new(1).unwrap(),
            station: sid(1),
        })
        .into();
        assert_eq!(topology.status(), StatusCode::BAD_REQUEST);

        let age: AppError = RouteError::InvalidAge(InvalidAge(-1)).into();
        assert_eq!(age.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn favorite_errors_map_to_statuses() {
        let owner: AppError = FavoriteError::NotOwner {
            favorite: 1,
            member: 2,
        }
        .into();
        assert_eq!(owner.status(), StatusCode::FORBIDDEN);

        let dup: AppError = FavoriteError::AlreadySaved.into();
        assert_eq!(dup.status(), StatusCode::CONFLICT);

        let missing: AppError = FavoriteError::NotFound(3).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    }

    #[test]
    fn catalog_errors_map_to_statuses() {
        let dup: AppError = CatalogError::DuplicateStationName("A".into()).into();
        assert_eq!(dup.status(), StatusCode::CONFLICT);

        let bad_section: AppError = CatalogError::InvalidSection(TopologyError::NonPositiveDistance {
            line: LineId::new(2).unwrap(),
            up: sid(2),
            down: sid(3),
        })
        .into();
        assert_eq!(bad_section.status(), StatusCode::BAD_REQUEST);

        let missing: AppError = CatalogError::LineNotFound(LineId::new(4).unwrap()).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_and_id_errors() {
        let auth: AppError = AuthError::Missing.into();
        assert_eq!(auth.status(), StatusCode::UNAUTHORIZED);

        let id: AppError = StationId::new(0).unwrap_err().into();
        assert_eq!(id.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn accepts_html_detection() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, "text/html,application/xhtml+xml".parse().unwrap());
        assert!(accepts_html(&headers));

        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        assert!(!accepts_html(&headers));
    }

    #[tokio::test]
    async fn error_response_has_json_body() {
        let response = AppError::NotFound {
            message: "station 9 not found".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
