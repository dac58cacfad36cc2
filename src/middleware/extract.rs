// src/middleware/extract.rs
//
// Json e Query com a rejeição no mesmo corpo de erro do resto do gateway.

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
};

pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let locale = Locale::from_parts(&parts);

        match Json::<T>::from_request(Request::from_parts(parts, body), state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::MalformedRequest(rejection.body_text()).to_api_error(&locale)),
        }
    }
}

pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_parts(parts);

        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(AppQuery(value)),
            Err(rejection) => Err(AppError::MalformedRequest(rejection.body_text()).to_api_error(&locale)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use chrono::NaiveDate;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct DueDate {
        payment_date: NaiveDate,
    }

    #[tokio::test]
    async fn invalid_json_body_becomes_localized_api_error() {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .header("accept-language", "en-US")
            .body(Body::from(r#"{"paymentDate":"2024-13-45"}"#))
            .unwrap();

        let Err(api) = AppJson::<DueDate>::from_request(req, &()).await else {
            panic!("corpo inválido foi aceito");
        };
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.code, "VALIDATION_ERROR");
        assert_eq!(api.error, "The request is malformed.");
    }

    #[tokio::test]
    async fn valid_json_body_is_extracted() {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"paymentDate":"2024-05-28"}"#))
            .unwrap();

        let Ok(AppJson(due)) = AppJson::<DueDate>::from_request(req, &()).await else {
            panic!("corpo válido foi rejeitado");
        };
        assert_eq!(due.payment_date, NaiveDate::from_ymd_opt(2024, 5, 28).unwrap());
    }

    #[tokio::test]
    async fn invalid_query_becomes_api_error() {
        let req = axum::http::Request::builder().uri("/?paymentDate=amanha").body(()).unwrap();
        let (mut parts, _) = req.into_parts();

        let Err(api) = AppQuery::<DueDate>::from_request_parts(&mut parts, &()).await else {
            panic!("query inválida foi aceita");
        };
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.error, "La solicitud tiene un formato inválido.");
    }
}
