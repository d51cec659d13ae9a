use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use crate::controllers::dispatch_controller::DispatchController;
use crate::dto::api_response::ApiResponse;
use crate::dto::dispatch_dto::{DispatchRequest, DispatchResponse};
use crate::dto::unit_dto::{RegisterUnitRequest, UnitListResponse};
use crate::models::unit::Unit;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_emergency_router() -> Router<AppState> {
    Router::new()
        .route("/ambulances", post(register_ambulance))
        .route("/ambulances", get(list_ambulances))
        .route("/dispatch", post(dispatch_emergency))
}

async fn register_ambulance(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUnitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Unit>>), AppError> {
    let Json(request) = payload?;
    let controller = DispatchController::new(state.dispatch.clone());
    let response = controller.register_unit(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_ambulances(
    State(state): State<AppState>,
) -> Result<Json<UnitListResponse>, AppError> {
    let controller = DispatchController::new(state.dispatch.clone());
    let response = controller.list_units().await?;
    Ok(Json(response))
}

async fn dispatch_emergency(
    State(state): State<AppState>,
    payload: Result<Json<DispatchRequest>, JsonRejection>,
) -> Result<Json<DispatchResponse>, AppError> {
    let Json(request) = payload?;
    let controller = DispatchController::new(state.dispatch.clone());
    let response = controller.dispatch_emergency(request).await?;
    Ok(Json(response))
}
