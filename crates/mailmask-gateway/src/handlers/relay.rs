use crate::error::{ApiError, Result};
use crate::model::{
    AssignRequest, AssignResponse, SweepResponse, UnassignRequest, UnassignResponse,
};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use jiff::Timestamp;
use mailmask_assign::Strategy;
use std::sync::Arc;

const DEFAULT_STRATEGY: &str = "default";

fn strategy_for(state: &AppState, name: Option<&str>) -> Result<Arc<dyn Strategy>> {
    let name = name.unwrap_or(DEFAULT_STRATEGY);
    state
        .strategy(name)
        .ok_or_else(|| ApiError::BadRequest(format!("no such strategy: {name}")))
}

pub async fn assign_handler(
    State(state): State<AppState>,
    Json(request): Json<AssignRequest>,
) -> Result<Json<AssignResponse>> {
    if request.url.is_empty() {
        return Err(ApiError::BadRequest("`url` is required".to_owned()));
    }

    let strategy = strategy_for(&state, request.strategy.as_deref())?;
    let address = strategy.assign(&request.url).await?;

    Ok(Json(AssignResponse {
        message: "ok",
        address,
    }))
}

pub async fn unassign_handler(
    State(state): State<AppState>,
    Json(request): Json<UnassignRequest>,
) -> Result<Json<UnassignResponse>> {
    let strategy = strategy_for(&state, request.strategy.as_deref())?;

    match (request.url.as_deref(), request.address.as_deref()) {
        (Some(url), _) if !url.is_empty() => strategy.unassign(url).await?,
        (_, Some(address)) if !address.is_empty() => strategy.unassign_by_addr(address).await?,
        _ => {
            return Err(ApiError::BadRequest(
                "either `url` or `address` is required".to_owned(),
            ))
        }
    }

    Ok(Json(UnassignResponse { message: "ok" }))
}

pub async fn sweep_handler(State(state): State<AppState>) -> Result<Json<SweepResponse>> {
    let count = state.sweeper().unassign_expired(Timestamp::now()).await?;

    Ok(Json(SweepResponse {
        message: "ok",
        count,
    }))
}
