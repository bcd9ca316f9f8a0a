//! Presence report endpoints.
//!
//! Every per-user report answers 404 with a `USER_NOT_FOUND` body when the
//! user has no rows in the attendance log.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use presence_core::{
    mean_time_by_weekday, start_end_by_weekday, total_time_by_weekday, users_list,
    weekly_mean_presence, PresenceTable, TotalTimeRow, UserId, UserPresence, UserSummary,
    WeekdayMean, WeekdayStartEnd, WeeklyPresenceRow,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// HANDLERS
// ============================================================================

/// List users with their avatars, sorted by name.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Presence",
    responses(
        (status = 200, description = "Users sorted by name", body = Vec<UserSummary>),
        (status = 500, description = "User directory unavailable", body = ApiError),
    ),
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserSummary>>> {
    let directory = state.user_directory().await?;
    Ok(Json(users_list(directory.value(), state.compare_names)))
}

/// Mean presence time grouped by weekday.
#[utoipa::path(
    get,
    path = "/api/v1/mean_time_weekday/{user_id}",
    tag = "Presence",
    params(("user_id" = u32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Rows of [weekday, mean seconds]", body = Vec<Vec<serde_json::Value>>),
        (status = 404, description = "User not found", body = ApiError),
        (status = 500, description = "Attendance log unavailable", body = ApiError),
    ),
)]
pub async fn mean_time_weekday(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<WeekdayMean>>> {
    user_report(&state, &user_id, mean_time_by_weekday).await
}

/// Total presence time grouped by weekday.
#[utoipa::path(
    get,
    path = "/api/v1/presence_weekday/{user_id}",
    tag = "Presence",
    params(("user_id" = u32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Header row, then rows of [weekday, total seconds]", body = Vec<Vec<serde_json::Value>>),
        (status = 404, description = "User not found", body = ApiError),
        (status = 500, description = "Attendance log unavailable", body = ApiError),
    ),
)]
pub async fn presence_weekday(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<TotalTimeRow>>> {
    user_report(&state, &user_id, total_time_by_weekday).await
}

/// Mean arrival and departure time grouped by weekday.
#[utoipa::path(
    get,
    path = "/api/v1/presence_start_end/{user_id}",
    tag = "Presence",
    params(("user_id" = u32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Rows of [weekday, mean start, mean end]", body = Vec<Vec<serde_json::Value>>),
        (status = 404, description = "User not found", body = ApiError),
        (status = 500, description = "Attendance log unavailable", body = ApiError),
    ),
)]
pub async fn presence_start_end(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<WeekdayStartEnd>>> {
    user_report(&state, &user_id, start_end_by_weekday).await
}

/// Worked and off hours of an average week.
#[utoipa::path(
    get,
    path = "/api/v1/weekly_mean_presence/{user_id}",
    tag = "Presence",
    params(("user_id" = u32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Header row, then worked and off hours", body = Vec<Vec<serde_json::Value>>),
        (status = 404, description = "User not found", body = ApiError),
        (status = 500, description = "Attendance log unavailable", body = ApiError),
    ),
)]
pub async fn weekly_mean_presence_report(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<WeeklyPresenceRow>>> {
    user_report(&state, &user_id, weekly_mean_presence).await
}

async fn user_report<T>(
    state: &AppState,
    raw_user_id: &str,
    build: fn(&UserPresence) -> T,
) -> ApiResult<Json<T>> {
    let data = state.presence_data().await?;
    let days = user_days(data.value(), raw_user_id)?;
    Ok(Json(build(days)))
}

/// Looks up one user's days. Ids that do not parse name no user either.
fn user_days<'a>(table: &'a PresenceTable, raw_user_id: &str) -> ApiResult<&'a UserPresence> {
    raw_user_id
        .parse::<UserId>()
        .ok()
        .and_then(|user_id| table.user(user_id))
        .ok_or_else(|| {
            tracing::debug!(user_id = raw_user_id, "User not found");
            ApiError::user_not_found(raw_user_id)
        })
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/mean_time_weekday/:user_id", get(mean_time_weekday))
        .route("/presence_weekday/:user_id", get(presence_weekday))
        .route("/presence_start_end/:user_id", get(presence_start_end))
        .route("/weekly_mean_presence/:user_id", get(weekly_mean_presence_report))
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, NaiveTime};
    use presence_core::PresenceRecord;

    use crate::error::ErrorCode;

    fn table() -> PresenceTable {
        [PresenceRecord {
            user_id: 10,
            date: NaiveDate::from_ymd_opt(2013, 9, 10).unwrap(),
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_user_days_found() {
        let table = table();
        assert_eq!(user_days(&table, "10").unwrap().len(), 1);
    }

    #[test]
    fn test_user_days_unknown_or_unparsable() {
        let table = table();
        for raw in ["11", "abc", "-1", ""] {
            let err = user_days(&table, raw).unwrap_err();
            assert_eq!(err.code, ErrorCode::UserNotFound);
            assert_eq!(err.message, format!("User {} not found!", raw));
        }
    }
}
