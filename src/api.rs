// 🌐 JSON API - thin HTTP adapter over the ledger core (feature "server")
//
// The store sits behind one mutex, so concurrent POSTs are applied one at a time.

use crate::aggregation::total_sum;
use crate::db::LedgerStore;
use crate::entities::{Category, ExpenseEntry, IncomeEntry, Owner, OwnerFilter};
use crate::error::LedgerError;
use crate::filter::filter_by_owner;
use crate::month::MonthKey;
use crate::summary::{summarize_period, PeriodSummary};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use log::error;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<LedgerStore>>,
}

impl AppState {
    pub fn new(store: LedgerStore) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, LedgerStore>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::Internal("ledger store lock poisoned".to_string()))
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Internal(String),
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(msg) => ApiError::Validation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(msg) => {
                error!("API internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseList {
    pub total: Decimal,
    pub entries: Vec<ExpenseEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IncomeList {
    pub total: Decimal,
    pub entries: Vec<IncomeEntry>,
}

// ============================================================================
// REQUESTS
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NewExpense {
    pub description: String,
    pub category: Category,
    pub owner: Owner,
    pub amount: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct NewIncome {
    pub amount: Decimal,
    pub owner: Owner,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub owner: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub year: i32,
    pub month: u32,
    pub owner: Option<String>,
}

fn parse_owner_filter(owner: Option<&str>) -> Result<OwnerFilter, ApiError> {
    match owner {
        None => Ok(OwnerFilter::All),
        Some(label) => Ok(label.parse::<OwnerFilter>()?),
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /api/health
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/expenses?owner=
async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<ApiResponse<ExpenseList>>, ApiError> {
    let owner = parse_owner_filter(query.owner.as_deref())?;
    let entries = filter_by_owner(&state.store()?.list_expenses()?, &owner);

    Ok(Json(ApiResponse::ok(ExpenseList {
        total: total_sum(&entries),
        entries,
    })))
}

/// POST /api/expenses
async fn create_expense(
    State(state): State<AppState>,
    Json(req): Json<NewExpense>,
) -> Result<(StatusCode, Json<ApiResponse<Created>>), ApiError> {
    let id = state
        .store()?
        .add_expense(&req.description, req.category, req.owner, req.amount, req.date)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(Created { id }))))
}

/// GET /api/incomes?owner=
async fn list_incomes(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<ApiResponse<IncomeList>>, ApiError> {
    let owner = parse_owner_filter(query.owner.as_deref())?;
    let entries = filter_by_owner(&state.store()?.list_incomes()?, &owner);

    Ok(Json(ApiResponse::ok(IncomeList {
        total: total_sum(&entries),
        entries,
    })))
}

/// POST /api/incomes
async fn create_income(
    State(state): State<AppState>,
    Json(req): Json<NewIncome>,
) -> Result<(StatusCode, Json<ApiResponse<Created>>), ApiError> {
    let id = state.store()?.add_income(req.amount, req.owner, req.date)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(Created { id }))))
}

/// GET /api/summary?year=&month=&owner=
async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ApiResponse<PeriodSummary>>, ApiError> {
    let period = MonthKey::new(query.year, query.month)?;
    let owner = parse_owner_filter(query.owner.as_deref())?;

    let (expenses, incomes) = {
        let store = state.store()?;
        (store.list_expenses()?, store.list_incomes()?)
    };

    Ok(Json(ApiResponse::ok(summarize_period(&expenses, &incomes, period, owner))))
}

/// Routes under `/api`
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/incomes", get(list_incomes).post(create_income))
        .route("/summary", get(get_summary));

    Router::new().nest("/api", api_routes).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt; // for `oneshot`

    fn setup_test_app() -> Router {
        let store = LedgerStore::open_in_memory().unwrap();
        router(AppState::new(store))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = setup_test_app();
        let (status, body) = send(&app, Method::GET, "/api/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_create_and_list_expenses() {
        let app = setup_test_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(json!({
                "description": "Mercado",
                "category": "Alimentação",
                "owner": "Amanda",
                "amount": "150.25",
                "date": "2024-02-10"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["data"]["id"].as_i64().is_some());

        send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(json!({
                "description": "Aluguel",
                "category": "Moradia",
                "owner": "Juntos",
                "amount": "1200",
                "date": "2024-02-01"
            })),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/api/expenses", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["entries"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["entries"][0]["description"], "Mercado");

        let (_, body) = send(&app, Method::GET, "/api/expenses?owner=Juntos", None).await;
        let entries = body["data"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["owner"], "Juntos");
    }

    #[tokio::test]
    async fn test_invalid_expense_rejected() {
        let app = setup_test_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(json!({
                "description": "",
                "category": "Lazer",
                "owner": "Geovani",
                "amount": "10",
                "date": "2024-02-10"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);

        let (_, body) = send(&app, Method::GET, "/api/expenses", None).await;
        assert!(body["data"]["entries"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_owner_filter_rejected() {
        let app = setup_test_app();
        let (status, _) = send(&app, Method::GET, "/api/incomes?owner=Ninguem", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_summary_endpoint() {
        let app = setup_test_app();

        send(
            &app,
            Method::POST,
            "/api/incomes",
            Some(json!({ "amount": "200", "owner": "Geovani", "date": "2024-01-05" })),
        )
        .await;
        send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(json!({
                "description": "Escola",
                "category": "Educação",
                "owner": "Juntos",
                "amount": "100",
                "date": "2024-01-20"
            })),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/api/summary?year=2024&month=1", None).await;
        assert_eq!(status, StatusCode::OK);

        let data = &body["data"];
        assert_eq!(data["period"], "2024-01");
        assert_eq!(data["comparison"][0]["month"], "2024-01");

        let pct: Decimal = data["comparison"][0]["savings_pct"].as_str().unwrap().parse().unwrap();
        assert_eq!(pct, Decimal::from(50));

        let (status, _) = send(&app, Method::GET, "/api/summary?year=2024&month=13", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
