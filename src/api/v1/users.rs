//! User endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{CreateUserCommand, UserSnapshot};
use crate::infrastructure::user::AddDustUserInput;

/// Request to rename a user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDisplayNameRequest {
    pub display_name: String,
}

/// Request carrying a dust amount; a missing amount is reported by validation
#[derive(Debug, Clone, Deserialize)]
pub struct DustRequest {
    #[serde(default)]
    pub dust: Option<f64>,
}

/// List users response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserSnapshot>,
    pub total: usize,
}

/// Delete user response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub deleted: bool,
    pub id: String,
}

/// POST /v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserCommand>,
) -> Result<(StatusCode, Json<UserSnapshot>), ApiError> {
    debug!(display_name = %request.display_name, "Creating user");

    let user = state.user_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(user.to_representation())))
}

/// GET /v1/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    debug!("Listing users");

    let users: Vec<UserSnapshot> = state
        .user_service
        .list()
        .await?
        .iter()
        .map(|user| user.to_representation())
        .collect();
    let total = users.len();

    Ok(Json(ListUsersResponse { users, total }))
}

/// GET /v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserSnapshot>, ApiError> {
    debug!(id = %id, "Getting user");

    let user = state
        .user_service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", id)))?;

    Ok(Json(user.to_representation()))
}

/// PUT /v1/users/{id}/display-name
pub async fn change_display_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ChangeDisplayNameRequest>,
) -> Result<Json<UserSnapshot>, ApiError> {
    debug!(id = %id, "Renaming user");

    let user = state
        .user_service
        .change_display_name(&id, request.display_name)
        .await?;

    Ok(Json(user.to_representation()))
}

/// POST /v1/users/{id}/dust
pub async fn add_dust(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<DustRequest>,
) -> Result<Json<UserSnapshot>, ApiError> {
    debug!(id = %id, dust = ?request.dust, "Adding dust");

    let output = state
        .user_service
        .add_dust(AddDustUserInput {
            id: Some(id),
            dust: request.dust,
        })
        .await?;

    Ok(Json(output))
}

/// POST /v1/users/{id}/dust/subtract
pub async fn subtract_dust(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<DustRequest>,
) -> Result<Json<UserSnapshot>, ApiError> {
    debug!(id = %id, dust = ?request.dust, "Subtracting dust");

    let dust = request
        .dust
        .ok_or_else(|| ApiError::bad_request("dust should not be empty").with_param("dust"))?;
    let user = state.user_service.subtract_dust(&id, dust).await?;

    Ok(Json(user.to_representation()))
}

/// POST /v1/users/{id}/activate
pub async fn activate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserSnapshot>, ApiError> {
    debug!(id = %id, "Activating user");

    let user = state.user_service.activate(&id).await?;
    Ok(Json(user.to_representation()))
}

/// POST /v1/users/{id}/deactivate
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserSnapshot>, ApiError> {
    debug!(id = %id, "Deactivating user");

    let user = state.user_service.deactivate(&id).await?;
    Ok(Json(user.to_representation()))
}

/// DELETE /v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    debug!(id = %id, "Deleting user");

    let deleted = state.user_service.delete(&id).await?;

    if !deleted {
        return Err(ApiError::not_found(format!("User '{}' not found", id)));
    }

    Ok(Json(DeleteUserResponse { deleted, id }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::api::router::create_router;
    use crate::domain::user::fake::UserFakeBuilder;
    use crate::infrastructure::user::InMemoryUserRepository;

    fn app_with(users: Vec<crate::domain::User>) -> Router {
        let repository = Arc::new(InMemoryUserRepository::with_users(users));
        create_router(AppState::new(repository))
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    #[tokio::test]
    async fn test_create_user_defaults() {
        let (status, body) = send(
            app_with(vec![]),
            Method::POST,
            "/v1/users",
            Some(json!({ "displayName": "John Doe" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "John Doe");
        assert_eq!(body["balance"], 0.0);
        assert_eq!(body["isActive"], true);
        assert!(body["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_create_user_reports_every_violation() {
        let (status, body) = send(
            app_with(vec![]),
            Method::POST,
            "/v1/users",
            Some(json!({ "displayName": "", "balance": 10000.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "validation_error");

        let fields: Vec<&str> = body["error"]["errors"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["field"].as_str())
            .collect();
        assert!(fields.contains(&"displayName"));
        assert!(fields.contains(&"balance"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/v1/users")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app_with(vec![]).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_add_dust_persists() {
        let user = UserFakeBuilder::one().build();
        let id = user.id().to_string();
        let app = app_with(vec![user]);

        let (status, body) = send(
            app.clone(),
            Method::POST,
            &format!("/v1/users/{}/dust", id),
            Some(json!({ "dust": 50.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], 50.0);

        let (_, body) = send(app, Method::GET, &format!("/v1/users/{}", id), None).await;
        assert_eq!(body["balance"], 50.0);
    }

    #[tokio::test]
    async fn test_add_dust_overflow_is_rejected() {
        let user = UserFakeBuilder::one().with_balance(50.0).build();
        let id = user.id().to_string();

        let (status, body) = send(
            app_with(vec![user]),
            Method::POST,
            &format!("/v1/users/{}/dust", id),
            Some(json!({ "dust": 9999.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_entity");
    }

    #[tokio::test]
    async fn test_add_dust_malformed_input() {
        let (status, body) = send(
            app_with(vec![]),
            Method::POST,
            "/v1/users/not-a-uuid/dust",
            Some(json!({})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_input");
        assert_eq!(body["error"]["errors"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_add_dust_unknown_user() {
        let id = crate::domain::Identifier::generate();

        let (status, body) = send(
            app_with(vec![]),
            Method::POST,
            &format!("/v1/users/{}/dust", id),
            Some(json!({ "dust": 1.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"]["message"].as_str().unwrap().contains(id.as_str()));
    }

    #[tokio::test]
    async fn test_subtract_below_zero() {
        let user = UserFakeBuilder::one().with_balance(50.0).build();
        let id = user.id().to_string();

        let (status, _) = send(
            app_with(vec![user]),
            Method::POST,
            &format!("/v1/users/{}/dust/subtract", id),
            Some(json!({ "dust": 100.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rename_and_toggle_activity() {
        let user = UserFakeBuilder::one().build();
        let id = user.id().to_string();
        let app = app_with(vec![user]);

        let (status, body) = send(
            app.clone(),
            Method::PUT,
            &format!("/v1/users/{}/display-name", id),
            Some(json!({ "displayName": "Jane Doe" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Jane Doe");

        let (_, body) = send(
            app.clone(),
            Method::POST,
            &format!("/v1/users/{}/deactivate", id),
            None,
        )
        .await;
        assert_eq!(body["isActive"], false);

        let (_, body) = send(app, Method::POST, &format!("/v1/users/{}/activate", id), None).await;
        assert_eq!(body["isActive"], true);
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let users = UserFakeBuilder::many(2).build_many();
        let id = users[0].id().to_string();
        let app = app_with(users);

        let (_, body) = send(app.clone(), Method::GET, "/v1/users", None).await;
        assert_eq!(body["total"], 2);

        let (status, body) =
            send(app.clone(), Method::DELETE, &format!("/v1/users/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], true);

        let (status, _) = send(app, Method::DELETE, &format!("/v1/users/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_with_malformed_id() {
        let (status, body) = send(app_with(vec![]), Method::GET, "/v1/users/user-1", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["param"], "id");
    }
}
