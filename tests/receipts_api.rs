//! Impressão e envio de recibos, e remoção de cuotas.

mod common;

use axum::http::{header, StatusCode};
use common::{body_bytes, body_json, json_request, spawn_app};
use serde_json::{json, Value};
use tower::ServiceExt;

const MAC_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15";
const WINDOWS_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

fn installment(id: &str) -> Value {
    json!({
        "id": id,
        "amount": 40000,
        "gps": 10000,
        "paymentDate": "2024-05-28",
        "loan": {
            "id": "loan-9",
            "paidInstallments": 3,
            "remainingInstallments": 9,
            "totalInstallments": 12,
            "user": { "name": "Juan Pérez", "phone": "300 123 4567" }
        }
    })
}

#[tokio::test]
async fn mac_clients_print_through_hidden_frame() {
    let app = spawn_app().await;
    let request = json_request("POST", "/api/receipts/print", &[("user-agent", MAC_UA)], installment("101"));
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-print-mode"], "hidden-frame");
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(&body_bytes(response).await[..], b"%PDF-1.4 fake");
}

#[tokio::test]
async fn blocked_popup_falls_back_to_download() {
    let app = spawn_app().await;
    let request = json_request(
        "POST",
        "/api/receipts/print?popupBlocked=true",
        &[("user-agent", WINDOWS_UA)],
        installment("101"),
    );
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-print-mode"], "download");
    assert_eq!(response.headers()[header::CONTENT_DISPOSITION], "attachment; filename=\"recibo_101.pdf\"");
}

#[tokio::test]
async fn renderer_failure_is_an_error_notification() {
    let app = spawn_app().await;
    let request = json_request("POST", "/api/receipts/print", &[], installment("boom"));
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["notification"]["kind"], "error");
    assert_eq!(json["error"], "No fue posible generar el recibo para imprimir.");
}

#[tokio::test]
async fn message_receipt_uses_client_phone_with_country_code() {
    let app = spawn_app().await;
    let request = json_request("POST", "/api/receipts/send", &[], json!({ "installment": installment("101") }));
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["notification"]["kind"], "success");
    assert_eq!(app.upstream.last_phone.lock().unwrap().as_deref(), Some("573001234567"));
}

#[tokio::test]
async fn message_provider_failure_is_a_bad_gateway_notification() {
    let app = spawn_app().await;
    let request = json_request("POST", "/api/receipts/send", &[], json!({ "installment": installment("wa-down") }));
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["notification"]["kind"], "error");
    assert_eq!(json["notification"]["message"], "No fue posible enviar el recibo.");
    assert!(json.get("error").is_none());
    assert_eq!(app.upstream.last_phone.lock().unwrap().as_deref(), Some("573001234567"));
}

#[tokio::test]
async fn message_provider_failure_follows_request_language() {
    let app = spawn_app().await;
    let request = json_request(
        "POST",
        "/api/receipts/send",
        &[("accept-language", "en-US,en;q=0.9")],
        json!({ "installment": installment("wa-down") }),
    );
    let json = body_json(app.router.clone().oneshot(request).await.unwrap()).await;
    assert_eq!(json["notification"]["message"], "Could not send the receipt.");
}

#[tokio::test]
async fn malformed_print_body_is_a_localized_validation_error() {
    let app = spawn_app().await;
    let mut inst = installment("101");
    inst["paymentDate"] = json!("2024-13-45");
    let response = app.router.clone().oneshot(json_request("POST", "/api/receipts/print", &[], inst)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["notification"]["kind"], "error");
    assert_eq!(json["error"], "La solicitud tiene un formato inválido.");
}

#[tokio::test]
async fn message_receipt_without_any_phone_is_rejected() {
    let app = spawn_app().await;
    let mut inst = installment("101");
    inst["loan"]["user"]["phone"] = Value::Null;
    let request = json_request("POST", "/api/receipts/send", &[], json!({ "installment": inst, "phoneNumber": "" }));
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["details"]["phoneNumber"].is_array());
    assert!(app.upstream.last_phone.lock().unwrap().is_none());
}

#[tokio::test]
async fn installment_delete_requires_permission() {
    let app = spawn_app().await;
    let request = json_request("DELETE", "/api/installments/55", &[("cookie", "authToken=viewer-token")], json!({}));
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let anonymous = json_request("DELETE", "/api/installments/55", &[], json!({}));
    let response = app.router.clone().oneshot(anonymous).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn business_rejection_keeps_upstream_status_and_message() {
    let app = spawn_app().await;
    let auth = [("authorization", "Bearer admin-token")];

    let ok = app.router.clone().oneshot(json_request("DELETE", "/api/installments/55", &auth, json!({}))).await.unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["notification"]["message"], "Cuota eliminada correctamente.");

    let rejected = app
        .router
        .clone()
        .oneshot(json_request("DELETE", "/api/installments/paid", &auth, json!({})))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::CONFLICT);
    let json = body_json(rejected).await;
    assert_eq!(json["code"], "UPSTREAM_REJECTED");
    assert_eq!(json["error"], "La cuota ya fue pagada");
}
