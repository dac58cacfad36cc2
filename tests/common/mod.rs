//! Utilitários comuns: uma API remota falsa numa porta efêmera e construtores
//! de requisição para exercitar o router do gateway.

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use backoffice_gateway::build_router;
use backoffice_gateway::config::{AppState, Settings};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// O que a API falsa recebeu, para as asserções.
#[derive(Clone, Default)]
pub struct Upstream {
    pub news_posts: Arc<AtomicUsize>,
    pub permission_calls: Arc<AtomicUsize>,
    pub last_news_body: Arc<Mutex<Option<Value>>>,
    pub last_phone: Arc<Mutex<Option<String>>>,
    pub last_store_query: Arc<Mutex<Option<String>>>,
}

impl Upstream {
    pub fn news_posts(&self) -> usize {
        self.news_posts.load(Ordering::SeqCst)
    }

    pub fn permission_calls(&self) -> usize {
        self.permission_calls.load(Ordering::SeqCst)
    }
}

pub struct TestApp {
    pub router: Router,
    pub upstream: Upstream,
}

/// Sobe a API falsa e monta o gateway apontando para ela.
pub async fn spawn_app() -> TestApp {
    let upstream = Upstream::default();
    let base_url = spawn_upstream(upstream.clone()).await;

    let settings = Settings {
        api_base_url: base_url,
        bind_addr: "127.0.0.1:0".to_string(),
        http_timeout: Duration::from_secs(5),
        permission_cache_ttl: Duration::from_secs(60),
        default_phone_country_code: "57".to_string(),
    };
    let state = AppState::from_settings(settings).expect("test settings are valid");

    TestApp { router: build_router(state), upstream }
}

/// URL de uma porta que acabou de ser liberada: conexões são recusadas.
pub async fn dead_upstream_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn spawn_upstream(upstream: Upstream) -> String {
    let app = Router::new()
        .route("/closing/validate/{id}", get(closing_validation))
        .route("/api/v1/permissions/me", get(permissions_me))
        .route("/api/v1/loans", get(list_loans))
        .route("/api/v1/news", get(list_news).post(create_news))
        .route("/api/v1/installments/{id}", delete(delete_installment))
        .route("/api/v1/receipt", post(render_receipt))
        .route("/api/v1/receipt/whatsapp", post(send_whatsapp))
        .route("/api/v1/audit-logs", get(list_audit_logs))
        .with_state(upstream);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// ---------------------------------------------------------------------------
// Handlers da API falsa
// ---------------------------------------------------------------------------

async fn closing_validation(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "cr-ok" => Json(json!({
            "isValid": false,
            "status": "INSTALLMENT_DELETED",
            "message": "Se eliminó una cuota después del cierre",
            "details": {
                "expectedTotal": 1234567.5,
                "actualTotal": 1184567.5,
                "difference": -50000,
                "missingInstallments": [{
                    "installmentId": 11, "clientName": "Juan Pérez", "vehiclePlate": "ABC123",
                    "contractNumber": "C-001", "amount": 40000, "gpsAmount": 10000, "totalAmount": 50000,
                    "reason": "REMOVED_FROM_CLOSING", "paymentDate": "2024-05-28"
                }],
                "deletedInstallments": [{
                    "installmentId": "12", "clientName": "maría", "vehiclePlate": "XYZ987",
                    "contractNumber": "C-002", "amount": 20000, "gpsAmount": 0, "totalAmount": 20000,
                    "reason": "DELETED", "paymentDate": "2024-05-27", "deletedAt": "2024-05-29T08:00:00Z",
                    "deletedBy": "ana"
                }]
            }
        }))
        .into_response(),
        "cr-correct" => Json(json!({
            "isValid": true,
            "status": "CORRECT",
            "message": "Cierre cuadrado",
            "details": {
                "expectedTotal": 100000, "actualTotal": 100000, "difference": 0,
                "missingInstallments": [], "deletedInstallments": []
            }
        }))
        .into_response(),
        "cr-weird" => Json(json!({
            "isValid": false,
            "status": "PARTIAL",
            "message": "?",
            "details": {
                "expectedTotal": 1, "actualTotal": 1, "difference": 0,
                "missingInstallments": [], "deletedInstallments": []
            }
        }))
        .into_response(),
        _ => (StatusCode::SERVICE_UNAVAILABLE, "upstream down").into_response(),
    }
}

async fn permissions_me(State(upstream): State<Upstream>, headers: HeaderMap) -> Response {
    upstream.permission_calls.fetch_add(1, Ordering::SeqCst);
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match token {
        "Bearer admin-token" => Json(json!([
            { "resource": "NEWS", "actions": ["VIEW", "CREATE", "EDIT", "DELETE"] },
            { "resource": "INSTALLMENT", "actions": ["VIEW", "DELETE"] },
            { "resource": "CONTRACT", "actions": ["VIEW", "EDIT", "DELETE"] },
            { "resource": "SPACESHIP", "actions": ["FLY"] }
        ]))
        .into_response(),
        "Bearer viewer-token" => Json(json!({
            "permissions": [
                { "resource": "NEWS", "actions": ["VIEW"] },
                { "resource": "CONTRACT", "actions": ["VIEW", "EDIT"] }
            ]
        }))
        .into_response(),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Token inválido" }))).into_response(),
    }
}

async fn list_loans(State(upstream): State<Upstream>, Query(query): Query<Vec<(String, String)>>) -> Json<Value> {
    let store = query.iter().find(|(k, _)| k == "storeId").map(|(_, v)| v.clone());
    *upstream.last_store_query.lock().unwrap() = store;

    Json(json!({
        "data": [{
            "id": 7, "contractNumber": "C-007", "clientName": "Juan Pérez", "vehiclePlate": "ABC123",
            "status": "ACTIVE", "loanAmount": 5000000, "paidInstallments": 3,
            "remainingInstallments": 9, "totalInstallments": 12
        }],
        "total": 1, "page": 1, "limit": 20, "totalPages": 1
    }))
}

async fn list_news(State(upstream): State<Upstream>, Query(query): Query<Vec<(String, String)>>) -> Json<Value> {
    let store = query.iter().find(|(k, _)| k == "storeId").map(|(_, v)| v.clone());
    *upstream.last_store_query.lock().unwrap() = store;

    Json(json!({
        "data": [{
            "id": 1, "title": "Moto en taller", "type": "LOAN_SPECIFIC", "category": "WORKSHOP",
            "loanId": 7, "isActive": true
        }],
        "total": 1, "page": 1, "limit": 10, "totalPages": 1
    }))
}

async fn create_news(State(upstream): State<Upstream>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    upstream.news_posts.fetch_add(1, Ordering::SeqCst);
    *upstream.last_news_body.lock().unwrap() = Some(body.clone());

    let mut created = body;
    created["id"] = json!("news-1");
    (StatusCode::CREATED, Json(created))
}

async fn delete_installment(Path(id): Path<String>) -> Response {
    if id == "paid" {
        return (StatusCode::CONFLICT, Json(json!({ "message": "La cuota ya fue pagada", "error": "Conflict" })))
            .into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn render_receipt(Json(body): Json<Value>) -> Response {
    if body["installmentId"] == "boom" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "renderer crashed").into_response();
    }
    ([(header::CONTENT_TYPE, "application/pdf")], Bytes::from_static(b"%PDF-1.4 fake")).into_response()
}

async fn send_whatsapp(State(upstream): State<Upstream>, Json(body): Json<Value>) -> Response {
    *upstream.last_phone.lock().unwrap() = body["phoneNumber"].as_str().map(str::to_string);
    // Simula o provedor de mensagens fora do ar
    if body["installmentId"] == "wa-down" {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "message": "provider timeout" }))).into_response();
    }
    StatusCode::OK.into_response()
}

async fn list_audit_logs(Query(query): Query<Vec<(String, String)>>) -> Json<Value> {
    // Devolve a query recebida em metadata para o teste inspecionar
    let echoed: serde_json::Map<String, Value> = query.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
    Json(json!({
        "data": [{
            "id": 1, "actorId": 3, "action": "PAYMENT", "entity": "Installment", "entityId": 11,
            "metadata": echoed, "createdAt": "2024-05-28T10:00:00Z"
        }],
        "total": 1, "page": 1, "limit": 10, "totalPages": 1
    }))
}

// ---------------------------------------------------------------------------
// Construtores de requisição
// ---------------------------------------------------------------------------

pub fn get_request(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (k, v) in headers {
        builder = builder.header(*k, *v);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, headers: &[(&str, &str)], body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    for (k, v) in headers {
        builder = builder.header(*k, *v);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
