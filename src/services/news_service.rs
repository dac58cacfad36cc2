// src/services/news_service.rs

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use validator::Validate;

use crate::{
    common::{context::RequestContext, error::AppError, i18n::FieldMessage},
    models::{
        news::{
            CreateNewsPayload, DateSelection, LoanNewsSummaryRequest, News, NewsListQuery, NewsType,
            NewsTypeConfig, NewsWriteRequest, SkipPreview, UpdateNewsPayload, NEWS_FORM_CONFIG,
        },
        view::Paginated,
    },
    remote::NewsApi,
};

#[derive(Clone)]
pub struct NewsService {
    api: NewsApi,
}

impl NewsService {
    pub fn new(api: NewsApi) -> Self {
        Self { api }
    }

    pub fn form_config(&self) -> Vec<NewsTypeConfig> {
        NEWS_FORM_CONFIG
            .iter()
            .map(|(news_type, categories)| NewsTypeConfig {
                news_type: *news_type,
                categories: categories.to_vec(),
                requires_loan: *news_type == NewsType::LoanSpecific,
            })
            .collect()
    }

    pub async fn list(&self, ctx: &RequestContext, query: &NewsListQuery) -> Result<Paginated<News>, AppError> {
        Ok(self.api.list(ctx, query).await?)
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> Result<News, AppError> {
        Ok(self.api.get(ctx, id).await?)
    }

    /// Valida a forma do formulário e só então envia. Regras de negócio ficam com o servidor.
    pub async fn create(&self, ctx: &RequestContext, payload: CreateNewsPayload) -> Result<News, AppError> {
        let request = build_create_request(ctx, payload)?;
        let news = self.api.create(ctx, &request).await?;
        tracing::info!(news_id = %news.id, "Novedad criada");
        Ok(news)
    }

    pub async fn update(&self, ctx: &RequestContext, id: &str, payload: UpdateNewsPayload) -> Result<News, AppError> {
        let request = build_update_request(payload)?;
        let news = self.api.update(ctx, id, &request).await?;
        tracing::info!(news_id = %news.id, "Novedad atualizada");
        Ok(news)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), AppError> {
        self.api.delete(ctx, id).await?;
        tracing::info!(news_id = %id, "Novedad removida");
        Ok(())
    }

    pub async fn active_for_loan(&self, ctx: &RequestContext, loan_id: &str) -> Result<Vec<News>, AppError> {
        Ok(self.api.active_for_loan(ctx, loan_id).await?)
    }

    pub async fn all_for_loan(&self, ctx: &RequestContext, loan_id: &str) -> Result<Vec<News>, AppError> {
        Ok(self.api.all_for_loan(ctx, loan_id).await?)
    }

    pub async fn skipped_dates(&self, ctx: &RequestContext, loan_id: &str) -> Result<Value, AppError> {
        Ok(self.api.skipped_dates(ctx, loan_id).await?)
    }

    pub async fn loans_summary(&self, ctx: &RequestContext, request: &LoanNewsSummaryRequest) -> Result<Value, AppError> {
        if request.loan_ids.is_empty() {
            return Err(AppError::invalid_field("loanIds", FieldMessage::LoanIdsRequired));
        }
        Ok(self.api.loans_summary(ctx, request).await?)
    }
}

/// Maior intervalo de dias que uma seleção pode cobrir.
pub const MAX_SELECTION_DAYS: i64 = 366;

/// Prévia para o formulário: recusa seleções maiores que `MAX_SELECTION_DAYS`.
pub fn checked_preview(selection: &DateSelection) -> Result<SkipPreview, AppError> {
    check_span(selection)?;
    Ok(preview_skips(selection))
}

/// Prévia das datas que a novedad vai pular. Supõe uma seleção já limitada por `check_span`.
pub fn preview_skips(selection: &DateSelection) -> SkipPreview {
    let (skipped_dates, range_days) = match selection {
        DateSelection::Single { date } => (vec![*date], 1),
        DateSelection::Range { start_date, end_date } => {
            let days = inclusive_days(*start_date, *end_date);
            let dates = start_date.iter_days().take(days as usize).collect();
            (dates, days)
        }
        DateSelection::Multiple { dates } => {
            let distinct: BTreeSet<NaiveDate> = dates.iter().copied().collect();
            let span = match (distinct.first(), distinct.last()) {
                (Some(first), Some(last)) => inclusive_days(*first, *last),
                _ => 0,
            };
            (distinct.into_iter().collect(), span)
        }
        DateSelection::Recurring { start_date, end_date, weekdays } => {
            let days = inclusive_days(*start_date, *end_date);
            let dates = start_date
                .iter_days()
                .take(days as usize)
                .filter(|d| weekdays.contains(&d.weekday()))
                .collect();
            (dates, days)
        }
    };

    SkipPreview {
        mode: selection.mode(),
        count: skipped_dates.len(),
        skipped_dates,
        range_days,
    }
}

// end − start + 1, ou 0 quando o fim vem antes do início
fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        0
    } else {
        (end - start).num_days() + 1
    }
}

fn check_span(selection: &DateSelection) -> Result<(), AppError> {
    let too_long = match selection {
        DateSelection::Single { .. } => false,
        DateSelection::Range { start_date, end_date } | DateSelection::Recurring { start_date, end_date, .. } => {
            inclusive_days(*start_date, *end_date) > MAX_SELECTION_DAYS
        }
        DateSelection::Multiple { dates } => dates.len() as i64 > MAX_SELECTION_DAYS,
    };
    if too_long {
        return Err(AppError::invalid_field("dateSelection", FieldMessage::DateRangeTooLong));
    }
    Ok(())
}

fn validate_selection(selection: &DateSelection) -> Result<(), AppError> {
    check_span(selection)?;
    match selection {
        DateSelection::Range { start_date, end_date } | DateSelection::Recurring { start_date, end_date, .. }
            if end_date < start_date =>
        {
            Err(AppError::invalid_field("dateSelection", FieldMessage::DateRangeInverted))
        }
        DateSelection::Multiple { dates } if dates.is_empty() => {
            Err(AppError::invalid_field("dateSelection", FieldMessage::DatesRequired))
        }
        DateSelection::Recurring { weekdays, .. } if weekdays.is_empty() => {
            Err(AppError::invalid_field("dateSelection", FieldMessage::WeekdaysRequired))
        }
        _ => Ok(()),
    }
}

fn apply_selection(request: &mut NewsWriteRequest, selection: &DateSelection) {
    request.date_mode = Some(selection.mode());
    match selection {
        DateSelection::Single { date } => {
            request.start_date = Some(*date);
            request.end_date = Some(*date);
        }
        DateSelection::Range { start_date, end_date } => {
            request.start_date = Some(*start_date);
            request.end_date = Some(*end_date);
        }
        DateSelection::Multiple { dates } => {
            request.dates = Some(preview_skips(selection).skipped_dates);
            request.start_date = dates.iter().min().copied();
            request.end_date = dates.iter().max().copied();
        }
        DateSelection::Recurring { start_date, end_date, weekdays } => {
            request.start_date = Some(*start_date);
            request.end_date = Some(*end_date);
            request.recurring_weekdays = Some(weekdays.clone());
        }
    }
}

// Com cálculo automático, a quantidade de cuotas a descontar é a contagem da prévia
fn installments_to_subtract(auto: bool, selection: &DateSelection, manual: Option<u32>) -> Option<u32> {
    if auto {
        Some(preview_skips(selection).count as u32)
    } else {
        manual
    }
}

pub fn build_create_request(ctx: &RequestContext, payload: CreateNewsPayload) -> Result<NewsWriteRequest, AppError> {
    payload.validate()?;

    if !payload.news_type.accepts(payload.category) {
        return Err(AppError::invalid_field("category", FieldMessage::CategoryTypeMismatch));
    }
    validate_selection(&payload.date_selection)?;

    let (loan_id, store_id) = match payload.news_type {
        NewsType::LoanSpecific => {
            let loan_id = payload
                .loan_id
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| AppError::invalid_field("loanId", FieldMessage::LoanRequired))?;
            (Some(loan_id), None)
        }
        NewsType::StoreWide => {
            let store_id = payload
                .store_id
                .filter(|id| !id.trim().is_empty())
                .or_else(|| ctx.store.store_id().map(str::to_string))
                .ok_or_else(|| AppError::invalid_field("storeId", FieldMessage::StoreRequired))?;
            (None, Some(store_id))
        }
    };

    let mut request = NewsWriteRequest {
        title: Some(payload.title.trim().to_string()),
        description: payload.description,
        news_type: Some(payload.news_type),
        category: Some(payload.category),
        loan_id,
        store_id,
        auto_calculate_installments: Some(payload.auto_calculate_installments),
        installments_to_subtract: installments_to_subtract(
            payload.auto_calculate_installments,
            &payload.date_selection,
            payload.installments_to_subtract,
        ),
        is_active: Some(payload.is_active),
        ..Default::default()
    };
    apply_selection(&mut request, &payload.date_selection);
    Ok(request)
}

pub fn build_update_request(payload: UpdateNewsPayload) -> Result<NewsWriteRequest, AppError> {
    payload.validate()?;

    if let (Some(news_type), Some(category)) = (payload.news_type, payload.category) {
        if !news_type.accepts(category) {
            return Err(AppError::invalid_field("category", FieldMessage::CategoryTypeMismatch));
        }
    }

    let mut request = NewsWriteRequest {
        title: payload.title.map(|t| t.trim().to_string()),
        description: payload.description,
        news_type: payload.news_type,
        category: payload.category,
        auto_calculate_installments: payload.auto_calculate_installments,
        installments_to_subtract: payload.installments_to_subtract,
        is_active: payload.is_active,
        ..Default::default()
    };

    if let Some(selection) = &payload.date_selection {
        validate_selection(selection)?;
        apply_selection(&mut request, selection);
        if payload.auto_calculate_installments == Some(true) {
            request.installments_to_subtract = installments_to_subtract(true, selection, payload.installments_to_subtract);
        }
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::store::StoreContext;
    use crate::models::news::NewsCategory;
    use chrono::Weekday;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ctx(store: StoreContext) -> RequestContext {
        RequestContext::new(None, store)
    }

    fn payload(value: serde_json::Value) -> CreateNewsPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn range_preview_is_inclusive() {
        let preview = preview_skips(&DateSelection::Range { start_date: date("2024-01-01"), end_date: date("2024-01-05") });
        assert_eq!(preview.range_days, 5);
        assert_eq!(preview.count, 5);
        assert_eq!(preview.skipped_dates.last(), Some(&date("2024-01-05")));
    }

    #[test]
    fn inverted_range_has_zero_days() {
        let preview = preview_skips(&DateSelection::Range { start_date: date("2024-01-05"), end_date: date("2024-01-01") });
        assert_eq!(preview.range_days, 0);
        assert!(preview.skipped_dates.is_empty());
    }

    #[test]
    fn multiple_dates_are_deduplicated_and_sorted() {
        let preview = preview_skips(&DateSelection::Multiple {
            dates: vec![date("2024-03-10"), date("2024-03-01"), date("2024-03-10")],
        });
        assert_eq!(preview.skipped_dates, vec![date("2024-03-01"), date("2024-03-10")]);
        assert_eq!(preview.range_days, 10);
    }

    #[test]
    fn recurring_keeps_only_selected_weekdays() {
        // Janeiro de 2024 começa numa segunda-feira: domingos são 7, 14, 21, 28
        let preview = preview_skips(&DateSelection::Recurring {
            start_date: date("2024-01-01"),
            end_date: date("2024-01-31"),
            weekdays: vec![Weekday::Sun],
        });
        assert_eq!(preview.count, 4);
        assert_eq!(preview.skipped_dates[0], date("2024-01-07"));
        assert_eq!(preview.range_days, 31);
    }

    #[test]
    fn date_selection_is_tagged_by_mode() {
        let selection: DateSelection =
            serde_json::from_value(json!({ "mode": "recurring", "startDate": "2024-01-01", "endDate": "2024-01-31", "weekdays": ["Sun", "Sat"] }))
                .unwrap();
        assert_eq!(preview_skips(&selection).count, 8);
    }

    #[test]
    fn category_must_belong_to_type() {
        let p = payload(json!({
            "title": "Festivo nacional", "type": "STORE_WIDE", "category": "WORKSHOP",
            "dateSelection": { "mode": "single", "date": "2024-07-20" }
        }));
        let err = build_create_request(&ctx(StoreContext::from_id("s1")), p).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn loan_specific_news_requires_a_loan() {
        let p = payload(json!({
            "title": "Moto en taller", "type": "LOAN_SPECIFIC", "category": "WORKSHOP",
            "dateSelection": { "mode": "single", "date": "2024-07-20" }
        }));
        assert!(build_create_request(&ctx(StoreContext::Admin), p).is_err());
    }

    #[test]
    fn short_title_is_rejected_before_sending() {
        let p = payload(json!({
            "title": "ab", "type": "LOAN_SPECIFIC", "category": "THEFT", "loanId": "l1",
            "dateSelection": { "mode": "single", "date": "2024-07-20" }
        }));
        let err = build_create_request(&ctx(StoreContext::Admin), p).unwrap_err();
        let api = err.to_api_error(&Default::default());
        assert!(api.details.unwrap().get("title").is_some());
    }

    #[test]
    fn store_wide_news_takes_the_active_store_and_auto_counts() {
        let p = payload(json!({
            "title": "Semana santa", "type": "STORE_WIDE", "category": "HOLIDAY",
            "dateSelection": { "mode": "range", "startDate": "2024-03-28", "endDate": "2024-03-29" },
            "autoCalculateInstallments": true, "installmentsToSubtract": 9
        }));
        let request = build_create_request(&ctx(StoreContext::from_id("store-3")), p).unwrap();
        assert_eq!(request.store_id.as_deref(), Some("store-3"));
        assert_eq!(request.loan_id, None);
        assert_eq!(request.installments_to_subtract, Some(2));
        assert_eq!(request.date_mode, Some("range"));
        assert_eq!(request.category, Some(NewsCategory::Holiday));
    }

    #[test]
    fn store_wide_news_in_admin_view_needs_explicit_store() {
        let p = payload(json!({
            "title": "Semana santa", "type": "STORE_WIDE", "category": "HOLIDAY",
            "dateSelection": { "mode": "single", "date": "2024-03-28" }
        }));
        assert!(build_create_request(&ctx(StoreContext::Admin), p).is_err());
    }

    #[test]
    fn preview_refuses_spans_longer_than_a_year() {
        let huge = DateSelection::Range { start_date: date("0001-01-01"), end_date: date("9999-12-31") };
        let err = checked_preview(&huge).unwrap_err();
        let api = err.to_api_error(&Default::default());
        assert_eq!(api.details.unwrap()["dateSelection"][0], "La selección no puede superar 366 días.");

        let leap_year = DateSelection::Range { start_date: date("2024-01-01"), end_date: date("2024-12-31") };
        assert_eq!(checked_preview(&leap_year).unwrap().count, 366);
    }

    #[test]
    fn long_recurring_selection_is_rejected_on_create() {
        let p = payload(json!({
            "title": "Domingos", "type": "STORE_WIDE", "category": "HOLIDAY", "storeId": "s1",
            "dateSelection": { "mode": "recurring", "startDate": "2024-01-01", "endDate": "2026-01-01", "weekdays": ["Sun"] },
            "autoCalculateInstallments": true
        }));
        assert!(matches!(build_create_request(&ctx(StoreContext::Admin), p), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn update_rejects_inverted_range() {
        let p = UpdateNewsPayload {
            date_selection: Some(DateSelection::Range { start_date: date("2024-02-10"), end_date: date("2024-02-01") }),
            ..Default::default()
        };
        assert!(build_update_request(p).is_err());
    }
}
