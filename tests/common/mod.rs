#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

pub const OWNER_EMAIL: &str = "owner@example.com";
pub const OWNER_PASSWORD: &str = "owner123";
pub const OWNER_NAME: &str = "John Property Owner";

struct Account {
    password: String,
    user: Value,
}

#[derive(Default)]
struct Backend {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    issued: u64,
}

impl Backend {
    fn issue(&mut self, email: &str) -> String {
        self.issued += 1;
        let token = format!("token-{}", self.issued);
        self.tokens.insert(token.clone(), email.to_owned());
        token
    }

    fn account_of(&mut self, headers: &HeaderMap) -> Option<&mut Account> {
        let token = headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        let email = self.tokens.get(token)?.clone();
        self.accounts.get_mut(&email)
    }
}

type Shared = Arc<Mutex<Backend>>;

type Reply = (StatusCode, Json<Value>);

fn failure(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "success": false, "error": message })))
}

fn not_authorized() -> Reply {
    failure(
        StatusCode::UNAUTHORIZED,
        "Not authorized to access this route",
    )
}

/// Identity backend speaking the `/api/auth/*` protocol, bound to loopback.
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let mut backend = Backend::default();
        backend.accounts.insert(
            OWNER_EMAIL.to_owned(),
            Account {
                password: OWNER_PASSWORD.to_owned(),
                user: json!({
                    "_id": "64f0c0ffee0001",
                    "name": OWNER_NAME,
                    "email": OWNER_EMAIL,
                    "role": "Owner",
                    "isActive": true,
                    "contactNumber": "9876543210",
                    "createdAt": "2024-01-10T08:00:00.000Z"
                }),
            },
        );
        let state: Shared = Arc::new(Mutex::new(backend));

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/auth/me", get(me))
            .route("/api/auth/updateprofile", put(update_profile))
            .route("/api/auth/updatepassword", put(update_password))
            .route("/api/auth/logout", get(logout))
            .with_state(state.clone());

        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Arc::new(Notify::new());
        let shutdown2 = shutdown.clone();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown2.notified().await })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Invalidate every issued token, as a server restart with a new secret would.
    pub fn revoke_all(&self) {
        self.state.lock().unwrap().tokens.clear();
    }

    pub fn live_tokens(&self) -> usize {
        self.state.lock().unwrap().tokens.len()
    }

    pub async fn stop(self) {
        self.shutdown.notify_one();
        self.handle.await.unwrap();
    }
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let email = body["email"].as_str().unwrap_or_default().to_owned();
    let password = body["password"].as_str().unwrap_or_default();

    let mut backend = state.lock().unwrap();
    let user = match backend.accounts.get(&email) {
        Some(account) if account.password == password => account.user.clone(),
        _ => return failure(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    };
    let token = backend.issue(&email);

    (
        StatusCode::OK,
        Json(json!({ "success": true, "token": token, "data": user })),
    )
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let email = body["email"].as_str().unwrap_or_default().to_owned();

    let mut backend = state.lock().unwrap();
    if backend.accounts.contains_key(&email) {
        return failure(StatusCode::BAD_REQUEST, "User already exists");
    }
    if body.get("confirmPassword").is_some() {
        return failure(StatusCode::BAD_REQUEST, "Unexpected field confirmPassword");
    }

    let id = format!("64f0c0ffee{:04}", backend.accounts.len() + 1);
    let user = json!({
        "_id": id,
        "name": body["name"],
        "email": email,
        "role": body["role"],
        "isActive": true,
    });
    backend.accounts.insert(
        email.clone(),
        Account {
            password: body["password"].as_str().unwrap_or_default().to_owned(),
            user: user.clone(),
        },
    );
    let token = backend.issue(&email);

    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "token": token, "data": user })),
    )
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let mut backend = state.lock().unwrap();
    match backend.account_of(&headers) {
        Some(account) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": account.user })),
        ),
        None => not_authorized(),
    }
}

async fn update_profile(State(state): State<Shared>, headers: HeaderMap, body: Bytes) -> Reply {
    let body = String::from_utf8_lossy(&body).into_owned();

    let mut backend = state.lock().unwrap();
    let account = match backend.account_of(&headers) {
        Some(account) => account,
        None => return not_authorized(),
    };

    for (field, value) in multipart_text_fields(&body) {
        let value = if field == "address" {
            serde_json::from_str(&value).unwrap_or(Value::Null)
        } else {
            Value::String(value)
        };
        // A profile update never changes the role.
        if field != "role" {
            account.user[field] = value;
        }
    }

    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": account.user })),
    )
}

async fn update_password(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut backend = state.lock().unwrap();
    let account = match backend.account_of(&headers) {
        Some(account) => account,
        None => return not_authorized(),
    };
    if body["currentPassword"].as_str() != Some(account.password.as_str()) {
        return failure(StatusCode::UNAUTHORIZED, "Password is incorrect");
    }
    account.password = body["newPassword"].as_str().unwrap_or_default().to_owned();

    (StatusCode::OK, Json(json!({ "success": true, "data": {} })))
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let mut backend = state.lock().unwrap();
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
    {
        backend.tokens.remove(token);
    }

    (StatusCode::OK, Json(json!({ "success": true, "data": {} })))
}

// Text parts of a multipart/form-data body as (name, value) pairs.
fn multipart_text_fields(body: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    for part in body.split("\r\n--") {
        let Some((head, value)) = part.split_once("\r\n\r\n") else {
            continue;
        };
        if head.contains("filename=") {
            continue;
        }
        let Some(name) = head
            .split("name=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
        else {
            continue;
        };
        fields.push((name.to_owned(), value.trim_end_matches("\r\n").to_owned()));
    }
    fields
}
