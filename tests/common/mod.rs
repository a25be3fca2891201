//! In-process mock of the library API
//!
//! Serves `/api/books` and `/api/orders` on a random local port, records
//! every request it receives and answers with configurable replies.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

pub const GET_BOOKS: &str = "GET /books";
pub const POST_BOOKS: &str = "POST /books";
pub const GET_ORDERS: &str = "GET /orders";

/// Canned response for one route
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// A request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub route: &'static str,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[derive(Default)]
struct Inner {
    replies: Mutex<HashMap<&'static str, Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
    orders_delay: Mutex<Duration>,
}

/// Handle to a running mock API
#[derive(Clone)]
pub struct MockApi {
    /// API root to hand to the client, e.g. `http://127.0.0.1:41234/api`
    pub base_url: String,
    inner: Arc<Inner>,
}

impl MockApi {
    /// Starts the mock on a random port
    pub async fn start() -> Self {
        let inner = Arc::new(Inner::default());
        let app = Router::new()
            .route("/api/books", get(get_books).post(post_books))
            .route("/api/orders", get(get_orders))
            .with_state(Arc::clone(&inner));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("Mock API has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock API stopped");
        });

        Self {
            base_url: format!("http://{addr}/api"),
            inner,
        }
    }

    /// Sets the reply for a route; unset routes answer 200 with `[]`
    pub fn reply(&self, route: &'static str, reply: Reply) {
        self.inner.replies.lock().unwrap().insert(route, reply);
    }

    /// Delays every `/orders` response
    pub fn set_orders_delay(&self, delay: Duration) {
        *self.inner.orders_delay.lock().unwrap() = delay;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    /// Number of requests received on a route
    pub fn hits(&self, route: &str) -> usize {
        self.requests().iter().filter(|r| r.route == route).count()
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn respond(inner: &Inner, route: &'static str, headers: &HeaderMap, body: Bytes) -> Response {
    inner.requests.lock().unwrap().push(RecordedRequest {
        route,
        authorization: header_value(headers, header::AUTHORIZATION),
        content_type: header_value(headers, header::CONTENT_TYPE),
        body,
    });

    let reply = inner
        .replies
        .lock()
        .unwrap()
        .get(route)
        .cloned()
        .unwrap_or_else(|| Reply::json("[]"));

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}

async fn get_books(State(inner): State<Arc<Inner>>, headers: HeaderMap) -> Response {
    respond(&inner, GET_BOOKS, &headers, Bytes::new())
}

async fn post_books(State(inner): State<Arc<Inner>>, headers: HeaderMap, body: Bytes) -> Response {
    respond(&inner, POST_BOOKS, &headers, body)
}

async fn get_orders(State(inner): State<Arc<Inner>>, headers: HeaderMap) -> Response {
    let delay = *inner.orders_delay.lock().unwrap();
    let response = respond(&inner, GET_ORDERS, &headers, Bytes::new());
    tokio::time::sleep(delay).await;
    response
}

/// JSON array of `count` orders with ids `order-0`, `order-1`, ...
pub fn orders_json(count: usize) -> String {
    let orders: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "orderId": format!("order-{i}"),
                "orderLines": [{ "bookId": i, "quantity": 1 }]
            })
        })
        .collect();
    serde_json::Value::Array(orders).to_string()
}
