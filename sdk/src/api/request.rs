//! # Request Shaping
//!
//! Turns a [`RequestKind`] into a concrete [`PreparedRequest`]: method, URL,
//! headers and JSON body. Nothing here touches the network, which keeps the
//! routing rules testable without a node.
//!
//! | Kind                 | Route  | Method | Path                 | Headers        |
//! |----------------------|--------|--------|----------------------|----------------|
//! | `Query`              | any    | GET    | `/api/<path>?<q>`    | none           |
//! | `SubmitTransaction`  | peer   | POST   | `/peer/transactions` | nethash set    |
//! | `SubmitTransaction`  | public | PUT    | `/api/transactions`  | content type   |
//! | `SubmitSignature`    | any    | POST   | `/peer/signatures`   | nethash set    |
//! | `NoAction`           | -      | -      | never sent           | -              |

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use url::Url;

use crate::config::{ApiRoute, ClientOptions, CLIENT_MIN_VERSION, CLIENT_OS, CLIENT_VERSION};
use crate::transaction::Transaction;

use super::error::ApiError;

// ---------------------------------------------------------------------------
// Methods & Kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node-side operations that a light client cannot perform. They resolve
/// locally without dialing anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalAction {
    EnableForging,
    DisableForging,
    InstallDapp,
    UninstallDapp,
    LaunchDapp,
    StopDapp,
}

impl LocalAction {
    /// Maps an API path such as `delegates/forging/enable` to its action.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_matches('/') {
            "delegates/forging/enable" => Some(LocalAction::EnableForging),
            "delegates/forging/disable" => Some(LocalAction::DisableForging),
            "dapps/install" => Some(LocalAction::InstallDapp),
            "dapps/uninstall" => Some(LocalAction::UninstallDapp),
            "dapps/launch" => Some(LocalAction::LaunchDapp),
            "dapps/stop" => Some(LocalAction::StopDapp),
            _ => None,
        }
    }
}

/// What the caller wants from the node.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    /// Read-only lookup under `/api/`.
    Query {
        path: String,
        params: Vec<(String, String)>,
    },
    /// Broadcast a signed transaction.
    SubmitTransaction(Box<Transaction>),
    /// Broadcast a multisignature co-signature for a pending transaction.
    SubmitSignature {
        transaction_id: String,
        signature: String,
    },
    NoAction(LocalAction),
}

impl RequestKind {
    /// A query, or the matching [`RequestKind::NoAction`] when `path` names
    /// a node-side operation.
    pub fn query<I, K, V>(path: &str, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        if let Some(action) = LocalAction::from_path(path) {
            return RequestKind::NoAction(action);
        }
        RequestKind::Query {
            path: path.trim_matches('/').to_string(),
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction Shaping
// ---------------------------------------------------------------------------

/// Method, path and body for submitting one transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub request_method: HttpMethod,
    pub request_url: String,
    pub request_params: Value,
}

/// Shapes a signed transaction for the chosen submission route. The body
/// is always `{"transaction": <tx>}`.
pub fn shape_transaction_request(
    tx: &Transaction,
    route: ApiRoute,
) -> Result<TransactionRequest, ApiError> {
    let (request_method, request_url) = match route {
        ApiRoute::Peer => (HttpMethod::Post, "/peer/transactions"),
        ApiRoute::Public => (HttpMethod::Put, "/api/transactions"),
    };
    let mut body = serde_json::Map::new();
    body.insert("transaction".into(), serde_json::to_value(tx)?);
    Ok(TransactionRequest {
        request_method,
        request_url: request_url.to_string(),
        request_params: Value::Object(body),
    })
}

// ---------------------------------------------------------------------------
// Prepared Requests
// ---------------------------------------------------------------------------

/// A fully resolved HTTP request, ready for a [`Transport`](super::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl PreparedRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Headers peers require on `/peer/*` endpoints.
pub fn nethash_headers(options: &ClientOptions) -> Vec<(String, String)> {
    let nethash = options.effective_nethash().to_string();
    vec![
        ("Content-Type".into(), "application/json".into()),
        ("nethash".into(), nethash.clone()),
        ("broadhash".into(), nethash),
        ("os".into(), CLIENT_OS.into()),
        ("version".into(), CLIENT_VERSION.into()),
        ("minVersion".into(), CLIENT_MIN_VERSION.into()),
        ("port".into(), options.effective_port().to_string()),
    ]
}

/// `{scheme}://{peer}:{port}` for the given options.
pub fn base_url(peer: &str, options: &ClientOptions) -> Result<Url, ApiError> {
    Ok(Url::parse(&format!(
        "{}://{}:{}",
        options.scheme(),
        peer,
        options.effective_port()
    ))?)
}

/// Resolves `kind` against `base`. Returns `None` for [`RequestKind::NoAction`].
pub fn prepare(
    kind: &RequestKind,
    base: &Url,
    options: &ClientOptions,
) -> Result<Option<PreparedRequest>, ApiError> {
    let request = match kind {
        RequestKind::NoAction(_) => return Ok(None),
        RequestKind::Query { path, params } => {
            let mut url = base.join(&format!("/api/{path}"))?;
            let params: Vec<_> = params
                .iter()
                .map(|(k, v)| (k.trim(), v.trim()))
                .filter(|(_, v)| !v.is_empty())
                .collect();
            if !params.is_empty() {
                url.query_pairs_mut().extend_pairs(params);
            }
            PreparedRequest {
                method: HttpMethod::Get,
                url,
                headers: Vec::new(),
                body: None,
            }
        }
        RequestKind::SubmitTransaction(tx) => {
            let shaped = shape_transaction_request(tx, options.route)?;
            let headers = match options.route {
                ApiRoute::Peer => nethash_headers(options),
                ApiRoute::Public => {
                    vec![("Content-Type".into(), "application/json".into())]
                }
            };
            PreparedRequest {
                method: shaped.request_method,
                url: base.join(&shaped.request_url)?,
                headers,
                body: Some(shaped.request_params),
            }
        }
        RequestKind::SubmitSignature {
            transaction_id,
            signature,
        } => PreparedRequest {
            method: HttpMethod::Post,
            url: base.join("/peer/signatures")?,
            headers: nethash_headers(options),
            body: Some(json!({
                "signature": {
                    "transaction": transaction_id,
                    "signature": signature,
                }
            })),
        },
    };
    Ok(Some(request))
}
