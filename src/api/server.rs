//! API Server Module
//!
//! JSON-RPC transport in front of the shared ledger. It only (de)serializes
//! calls and results; every decision is made by the dispatch layer.
//!
//! # Methods
//! - `ledger_call`: params are a `Call` (`contract`, `method`, `sender`, `args`)
//! - `ledger_blockHeight`: current block height
//! - `ledger_advanceBlocks`: params `{"blocks": n}`, returns the new height

use crate::{
    config::Config,
    dispatch::Call,
    state::SharedLedger,
};
use axum::{Router, routing::post, Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn, error};

/// Standard JSON-RPC code for an unknown RPC method
const METHOD_NOT_FOUND: i32 = -32601;
/// Standard JSON-RPC code for malformed params
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;
/// Ledger-level dispatch failure (unknown contract/method, bad arguments)
const DISPATCH_ERROR: i32 = -32000;

/// The main API server struct
///
/// Encapsulates the server configuration and the shared ledger handle.
pub struct Server {
    config: Config,
    ledger: SharedLedger,
}

impl Server {
    /// Creates a new API server instance
    ///
    /// # Arguments
    /// * `config` - Server configuration (host, port, etc.)
    /// * `ledger` - Shared ledger all requests are dispatched to
    pub fn new(config: Config, ledger: SharedLedger) -> Self {
        Self { config, ledger }
    }

    /// Router with the single JSON-RPC endpoint at "/"
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", post(handle_rpc))
            .with_state(self.ledger.clone())
    }

    /// Starts the API server and begins listening for incoming requests
    ///
    /// # Returns
    /// `Ok(())` if the server shuts down cleanly, or an error if binding fails
    pub async fn start(self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);
        info!("API server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: JsonValue,
    pub id: JsonValue,
}

/// JSON-RPC 2.0 response structure
///
/// Either `result` or `error` will be populated, but not both.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: JsonValue,
}

/// JSON-RPC error object
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    fn success(id: JsonValue, result: JsonValue) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(id: JsonValue, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError { code, message }),
            id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AdvanceParams {
    blocks: u64,
}

async fn handle_rpc(
    State(ledger): State<SharedLedger>,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    Json(process(&ledger, request).await)
}

/// Route one JSON-RPC request to the ledger
pub async fn process(ledger: &SharedLedger, request: JsonRpcRequest) -> JsonRpcResponse {
    debug!("Received RPC request: {}", request.method);

    match request.method.as_str() {
        "ledger_call" => handle_call(ledger, request).await,
        "ledger_blockHeight" => {
            let height = ledger.block_height().await;
            JsonRpcResponse::success(request.id, JsonValue::from(height))
        }
        "ledger_advanceBlocks" => handle_advance(ledger, request).await,
        _ => JsonRpcResponse::failure(
            request.id,
            METHOD_NOT_FOUND,
            "Method not found".to_string(),
        ),
    }
}

async fn handle_call(ledger: &SharedLedger, request: JsonRpcRequest) -> JsonRpcResponse {
    let call: Call = match serde_json::from_value(request.params) {
        Ok(call) => call,
        Err(e) => {
            warn!("Failed to deserialize call: {}", e);
            return JsonRpcResponse::failure(
                request.id,
                INVALID_PARAMS,
                format!("Invalid params: {}", e),
            );
        }
    };

    match ledger.dispatch(&call).await {
        Ok(value) => match serde_json::to_value(&value) {
            Ok(result) => JsonRpcResponse::success(request.id, result),
            Err(e) => {
                error!("Failed to serialize result: {}", e);
                JsonRpcResponse::failure(request.id, INTERNAL_ERROR, e.to_string())
            }
        },
        Err(e) => {
            warn!("Dispatch of {}.{} failed: {}", call.contract, call.method, e);
            JsonRpcResponse::failure(request.id, DISPATCH_ERROR, e.to_string())
        }
    }
}

async fn handle_advance(ledger: &SharedLedger, request: JsonRpcRequest) -> JsonRpcResponse {
    let params: AdvanceParams = match serde_json::from_value(request.params) {
        Ok(params) => params,
        Err(e) => {
            return JsonRpcResponse::failure(
                request.id,
                INVALID_PARAMS,
                format!("Invalid params: {}", e),
            );
        }
    };

    match ledger.advance_blocks(params.blocks).await {
        Ok(height) => {
            info!("Block height advanced by {} to {}", params.blocks, height);
            JsonRpcResponse::success(request.id, JsonValue::from(height))
        }
        Err(e) => JsonRpcResponse::failure(request.id, INVALID_PARAMS, e.to_string()),
    }
}
