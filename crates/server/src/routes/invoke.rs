use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::state::AppState;

/// One transaction submission: an entry point name and its positional arguments.
#[derive(Debug, Serialize, Deserialize)]
pub struct InvokeRequest {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub function: String,
    pub result: Option<String>,
}

/// Run the named entry point against the host's state store.
pub async fn invoke(
    State(state): State<AppState>,
    Json(req): Json<InvokeRequest>,
) -> Result<Json<InvokeResponse>, ApiError> {
    let result = state
        .contract
        .invoke(state.store.as_ref(), &req.function, &req.args)
        .await?;
    Ok(Json(InvokeResponse { function: req.function, result }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use models::RecordKind;
    use service::{state::MemoryStateStore, RegistryContract};
    use tower::ServiceExt;
    use tower_http::cors::CorsLayer;

    use super::*;
    use crate::routes::build_router;

    async fn call(app: axum::Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let req = Request::post("/invoke")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn app() -> axum::Router {
        let state = AppState::new(
            RegistryContract::new(RecordKind::Customer),
            Arc::new(MemoryStateStore::new()),
        );
        build_router(state, CorsLayer::very_permissive())
    }

    #[tokio::test]
    async fn maps_service_errors_to_statuses() {
        let app = app();

        let (status, body) = call(app.clone(), serde_json::json!({"function": "ReadCustomer", "args": ["1"]})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "The customer with ID = 1 does not exist");

        let (status, _) = call(app.clone(), serde_json::json!({"function": "Nope"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(app, serde_json::json!({"function": "TransferCustomer", "args": ["1", "x"]})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn seeds_and_lists_through_the_router() {
        let app = app();

        let (status, body) = call(app.clone(), serde_json::json!({"function": "InitLedger"})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["result"].is_null());

        let (status, body) = call(app, serde_json::json!({"function": "GetAllCustomers"})).await;
        assert_eq!(status, StatusCode::OK);
        let all: Vec<models::KeyedRecord> = serde_json::from_str(body["result"].as_str().unwrap()).unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|e| e.record["docType"] == "customer"));
    }
}
