//! Pizzeria HTTP API
//!
//! JSON endpoints used by the storefront: menu, orders, contact, shipping,
//! map configuration and CEP lookup.

use crate::application::{AddressResolver, ShippingRequest, ShippingService};
use crate::domain::entities::{Customer, OrderLine};
use crate::domain::errors::LookupError;
use crate::domain::ports::{ContactMessage, MailSender, MenuRepository, OrderRepository};
use crate::domain::value_objects::strip_non_digits;
use crate::infrastructure::ShutdownController;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Maximum number of CEPs accepted by one batch request.
pub const MAX_BATCH: usize = 50;

/// Google Maps loader settings handed to the browser.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsConfig {
    pub api_key: Option<String>,
    pub libraries: Vec<String>,
    pub language: String,
    pub region: String,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            libraries: vec!["places".to_string()],
            language: "pt-BR".to_string(),
            region: "BR".to_string(),
        }
    }
}

/// API Server state.
#[derive(Clone)]
pub struct ApiState {
    pub resolver: Arc<AddressResolver>,
    pub shipping: Arc<ShippingService>,
    pub menu: Arc<dyn MenuRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub mail: Arc<dyn MailSender>,
    pub maps: MapsConfig,
    /// Shop number used when a WhatsApp request names no recipient
    pub whatsapp_phone: Option<String>,
}

/// Order creation request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub cliente: Customer,
    pub itens: Vec<OrderLine>,
    pub total: f64,
}

/// WhatsApp deep-link request.
#[derive(Debug, Clone, Deserialize)]
pub struct WhatsAppRequest {
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Batch CEP lookup request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub ceps: Vec<String>,
    #[serde(default)]
    pub spacing_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CepQuery {
    #[serde(default)]
    pub cache: Option<bool>,
}

/// Health response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cep_cache_size: usize,
}

/// `{"success": true, ...body}` envelope.
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(body: T) -> Json<Self> {
        Json(Self {
            success: true,
            body,
        })
    }
}

fn failure(status: StatusCode, error: impl ToString) -> (StatusCode, Json<serde_json::Value>) {
    (
        status,
        Json(serde_json::json!({
            "success": false,
            "error": error.to_string()
        })),
    )
}

fn lookup_status(e: &LookupError) -> StatusCode {
    match e {
        LookupError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::NOT_FOUND,
    }
}

/// Build the application router.
pub fn router(state: ApiState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health_handler))
        .route("/api/healthCheck", get(health_handler))
        // Menu and orders
        .route("/api/getPizzas", get(get_pizzas_handler))
        .route("/api/createOrder", post(create_order_handler))
        // Contact
        .route("/api/sendEmail", post(send_email_handler))
        .route("/api/sendWhatsAppMessage", post(whatsapp_handler))
        // Delivery
        .route("/api/calculateShipping", post(shipping_handler))
        .route("/api/getMapConfig", get(map_config_handler))
        // CEP lookup
        .route("/api/cep/stats", get(cep_stats_handler))
        .route("/api/cep/cache", delete(cep_clear_handler))
        .route("/api/cep/batch", post(cep_batch_handler))
        .route("/api/cep/:cep", get(cep_handler))
        .with_state(state)
}

/// API Server for the storefront.
pub struct ApiServer {
    listen_addr: String,
    state: ApiState,
}

impl ApiServer {
    pub fn new(listen_addr: String, state: ApiState) -> Self {
        Self { listen_addr, state }
    }

    /// Get shared state for use by other components.
    pub fn state(&self) -> ApiState {
        self.state.clone()
    }

    /// Run the API server until `shutdown` fires.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self, shutdown: ShutdownController) -> anyhow::Result<()> {
        let app = router(self.state.clone()).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        );

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("pizzeria API listening on {}", self.listen_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("pizzeria API stopped");
        Ok(())
    }
}

// Handler functions

async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cep_cache_size: state.resolver.stats().cache_size,
    })
}

async fn get_pizzas_handler(State(state): State<ApiState>) -> impl IntoResponse {
    match state.menu.list().await {
        Ok(items) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "data": items })),
        ),
        Err(e) => {
            tracing::error!("failed to list menu: {}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}

async fn create_order_handler(
    State(state): State<ApiState>,
    Json(req): Json<CreateOrderRequest>,
) -> impl IntoResponse {
    if req.itens.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "pedido sem itens");
    }
    if req.itens.iter().any(|line| line.quantity == 0) {
        return failure(StatusCode::BAD_REQUEST, "quantidade inválida");
    }
    if !req.total.is_finite() || req.total < 0.0 {
        return failure(StatusCode::BAD_REQUEST, "total inválido");
    }

    match state.orders.create(req.cliente, req.itens, req.total).await {
        Ok(order) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "orderId": order.id })),
        ),
        Err(e) => {
            tracing::error!("failed to create order: {}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}

async fn send_email_handler(
    State(state): State<ApiState>,
    Json(msg): Json<ContactMessage>,
) -> impl IntoResponse {
    match state.mail.send(&msg).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "success": true }))),
        Err(e) => failure(StatusCode::BAD_REQUEST, e),
    }
}

/// Build a `wa.me` deep link.
pub fn whatsapp_link(phone: &str, message: &str, name: Option<&str>) -> Option<String> {
    let digits = strip_non_digits(phone);
    if digits.is_empty() {
        return None;
    }
    let text = match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("{} - {}", message, name),
        None => message.to_string(),
    };
    reqwest::Url::parse_with_params(&format!("https://wa.me/{}", digits), &[("text", text)])
        .ok()
        .map(String::from)
}

async fn whatsapp_handler(
    State(state): State<ApiState>,
    Json(req): Json<WhatsAppRequest>,
) -> impl IntoResponse {
    let phone = req
        .phone
        .as_deref()
        .filter(|p| !strip_non_digits(p).is_empty())
        .or(state.whatsapp_phone.as_deref());

    let Some(phone) = phone else {
        return failure(StatusCode::BAD_REQUEST, "telefone não informado");
    };

    match whatsapp_link(phone, &req.message, req.name.as_deref()) {
        Some(url) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "url": url })),
        ),
        None => failure(StatusCode::BAD_REQUEST, "telefone inválido"),
    }
}

async fn shipping_handler(
    State(state): State<ApiState>,
    Json(req): Json<ShippingRequest>,
) -> axum::response::Response {
    match state.shipping.quote(&req).await {
        Ok(quote) => Success::new(quote).into_response(),
        Err(e) => failure(lookup_status(&e), e).into_response(),
    }
}

async fn map_config_handler(State(state): State<ApiState>) -> impl IntoResponse {
    if state.maps.api_key.is_none() {
        return failure(StatusCode::SERVICE_UNAVAILABLE, "maps not configured");
    }
    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "config": state.maps })),
    )
}

async fn cep_handler(
    State(state): State<ApiState>,
    Path(cep): Path<String>,
    Query(query): Query<CepQuery>,
) -> impl IntoResponse {
    let use_cache = query.cache.unwrap_or(true);
    match state.resolver.resolve(&cep, use_cache).await {
        Ok(address) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "data": address })),
        ),
        Err(e) => failure(lookup_status(&e), e),
    }
}

async fn cep_batch_handler(
    State(state): State<ApiState>,
    Json(req): Json<BatchRequest>,
) -> impl IntoResponse {
    if req.ceps.len() > MAX_BATCH {
        return failure(
            StatusCode::BAD_REQUEST,
            format!("no máximo {} CEPs por lote", MAX_BATCH),
        );
    }

    let spacing = req.spacing_ms.map(Duration::from_millis);
    let results = state.resolver.resolve_many(&req.ceps, spacing).await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "results": results })),
    )
}

async fn cep_stats_handler(State(state): State<ApiState>) -> impl IntoResponse {
    Success::new(state.resolver.stats())
}

async fn cep_clear_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let cleared = state.resolver.stats().cache_size;
    state.resolver.clear_cache();
    Json(serde_json::json!({ "success": true, "cleared": cleared }))
}
