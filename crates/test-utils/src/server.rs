//! A local HTTP relay for exercising the real client.
use alloy::primitives::Address;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, task::JoinHandle};
use url::Url;
use zkarnage_relay::{
    types::{JsonRpcRequest, JsonRpcResponse},
    RelaySigner, SIGNATURE_HEADER,
};

/// A request received by [`MockRelayServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// JSON-RPC method.
    pub method: String,
    /// The single params object.
    pub params: Value,
    /// The signature header, verbatim.
    pub signature: Option<String>,
    /// The address the signature recovered to, if it was valid.
    pub signer: Option<Address>,
}

#[derive(Debug)]
struct ServerState {
    responses: HashMap<String, Value>,
    tx_status: String,
    forced_status: Option<StatusCode>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<ServerState>>;

/// An axum server on an ephemeral local port that speaks the relay
/// protocol.
///
/// Requests with a missing or invalid signature header are rejected with
/// 403, like the real relay. Every well-formed request is recorded. Methods
/// without a configured response get a JSON-RPC "method not found" error.
/// The transaction status API is served from the same origin.
#[derive(Debug)]
pub struct MockRelayServer {
    addr: SocketAddr,
    state: Shared,
    handle: JoinHandle<()>,
}

impl MockRelayServer {
    /// Bind to an ephemeral port and start serving.
    pub async fn spawn() -> Self {
        let state = Arc::new(Mutex::new(ServerState {
            responses: HashMap::new(),
            tx_status: "UNKNOWN".to_string(),
            forced_status: None,
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/", post(rpc))
            .route("/tx/{hash}", get(tx_status))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state, handle }
    }

    /// The base URL, ending in a slash.
    pub fn url(&self) -> Url {
        format!("http://{}/", self.addr).parse().unwrap()
    }

    /// Answer `method` with `result`.
    pub fn respond_with(&self, method: &str, result: Value) {
        let body = serde_json::to_value(JsonRpcResponse::success(result)).unwrap();
        self.state.lock().unwrap().responses.insert(method.to_string(), body);
    }

    /// Answer `method` with a JSON-RPC error.
    pub fn respond_with_error(&self, method: &str, code: i64, message: &str) {
        let body = serde_json::to_value(JsonRpcResponse::<Value>::failure(code, message)).unwrap();
        self.state.lock().unwrap().responses.insert(method.to_string(), body);
    }

    /// Answer every JSON-RPC request with `status` and no body.
    pub fn force_status(&self, status: StatusCode) {
        self.state.lock().unwrap().forced_status = Some(status);
    }

    /// Report `status` (e.g. `"INCLUDED"`) from the status API.
    pub fn set_tx_status(&self, status: &str) {
        self.state.lock().unwrap().tx_status = status.to_string();
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl Drop for MockRelayServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn rpc(State(state): State<Shared>, headers: HeaderMap, body: Bytes) -> Response {
    let signature =
        headers.get(SIGNATURE_HEADER).and_then(|value| value.to_str().ok()).map(str::to_string);
    let signer = signature.as_deref().and_then(|token| RelaySigner::verify(&body, token));

    let Ok(request) = serde_json::from_slice::<JsonRpcRequest<Value>>(&body) else {
        return (StatusCode::BAD_REQUEST, "invalid json-rpc request").into_response();
    };

    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method: request.method.clone(),
        params: request.param().clone(),
        signature,
        signer,
    });

    if let Some(status) = state.forced_status {
        return status.into_response();
    }
    if signer.is_none() {
        return (StatusCode::FORBIDDEN, "invalid flashbots signature").into_response();
    }

    let response = state.responses.get(&request.method).cloned().unwrap_or_else(|| {
        json!({
            "jsonrpc": "2.0",
            "id": request.id,
            "error": { "code": -32601, "message": "method not found" }
        })
    });
    Json(response).into_response()
}

async fn tx_status(State(state): State<Shared>, Path(hash): Path<String>) -> Json<Value> {
    let status = state.lock().unwrap().tx_status.clone();
    Json(json!({ "hash": hash, "status": status }))
}
