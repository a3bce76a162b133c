use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{db, error::AppError, middleware::auth::AuthUser, routes::AppState};

/// `GET /exercises` — the read-only catalog, for routine builders and
/// exercise pickers.
pub async fn list_exercises(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Value>, AppError> {
    let exercises = db::list_exercises(&state.pool).await?;
    Ok(Json(json!({ "exercises": exercises })))
}
