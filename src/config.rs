// src/config.rs

use crate::{
    remote::{
        AuditLogApi, ClosingApi, InstallmentApi, LoanApi, NewsApi, PermissionApi, ReceiptApi, RemoteClient,
    },
    services::{
        audit_service::AuditService, closing_service::ClosingService, installment_service::InstallmentService,
        loan_service::LoanService, news_service::NewsService, permission_service::PermissionService,
        receipt_service::ReceiptService,
    },
};
use anyhow::Context;
use std::{env, str::FromStr, time::Duration};

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub bind_addr: String,
    pub http_timeout: Duration,
    pub permission_cache_ttl: Duration,
    pub default_phone_country_code: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL").context("API_BASE_URL deve ser definida")?;

        Ok(Self {
            api_base_url,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            http_timeout: Duration::from_secs(parse_var("HTTP_TIMEOUT_SECS", 15)?),
            permission_cache_ttl: Duration::from_secs(parse_var("PERMISSION_CACHE_TTL_SECS", 300)?),
            default_phone_country_code: env::var("DEFAULT_PHONE_COUNTRY_CODE").unwrap_or_else(|_| "57".to_string()),
        })
    }
}

// Variável opcional; presente mas malformada é erro de arranque
fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválida: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub closing_service: ClosingService,
    pub receipt_service: ReceiptService,
    pub installment_service: InstallmentService,
    pub news_service: NewsService,
    pub audit_service: AuditService,
    pub loan_service: LoanService,
    pub permission_service: PermissionService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let settings = Settings::from_env()?;
        Self::from_settings(settings)
    }

    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let client = RemoteClient::new(&settings.api_base_url, settings.http_timeout)?;
        tracing::info!("✅ API remota configurada em {}", client.base_url());

        // --- Monta o gráfico de dependências ---
        let closing_service = ClosingService::new(ClosingApi::new(client.clone()));
        let receipt_service = ReceiptService::new(
            ReceiptApi::new(client.clone()),
            settings.default_phone_country_code.clone(),
        );
        let installment_service = InstallmentService::new(InstallmentApi::new(client.clone()));
        let news_service = NewsService::new(NewsApi::new(client.clone()));
        let audit_service = AuditService::new(AuditLogApi::new(client.clone()));
        let loan_service = LoanService::new(LoanApi::new(client.clone()));
        let permission_service = PermissionService::new(PermissionApi::new(client), settings.permission_cache_ttl);

        Ok(Self {
            settings,
            closing_service,
            receipt_service,
            installment_service,
            news_service,
            audit_service,
            loan_service,
            permission_service,
        })
    }
}
