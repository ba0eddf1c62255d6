//! Pizzeria API - storefront backend with CEP address resolution
//!
//! This is the composition root that wires together all the components.

use pizzeria_api::adapters::inbound::{ApiServer, ApiState};
use pizzeria_api::adapters::outbound::{
    DashMapMenuRepository, DashMapOrderRepository, LogMailSender,
};
use pizzeria_api::application::{AddressResolver, ShippingService};
use pizzeria_api::infrastructure::{shutdown_signal, ShutdownController};
use pizzeria_api::load_config;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting pizzeria-api listen={} viacep={} brasilapi={}",
        cfg.listen_addr,
        cfg.viacep_base_url,
        cfg.brasilapi_base_url
    );

    // ===== COMPOSITION ROOT =====

    // 1. Outbound adapters
    let client = reqwest::Client::builder()
        .user_agent(concat!("pizzeria-api/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let resolver = Arc::new(AddressResolver::http(
        client,
        &cfg.viacep_base_url,
        &cfg.brasilapi_base_url,
        cfg.resolver(),
    ));

    let menu = match &cfg.menu_path {
        Some(path) => {
            let repo = DashMapMenuRepository::from_file(path)?;
            tracing::info!("menu loaded from {} ({} items)", path, repo.len());
            repo
        }
        None => {
            tracing::warn!("PIZZERIA_MENU_PATH not set, menu starts empty");
            DashMapMenuRepository::new()
        }
    };

    // 2. Application services
    let shipping = Arc::new(ShippingService::new(resolver.clone(), cfg.shipping()));

    // 3. Inbound adapter
    let state = ApiState {
        resolver: resolver.clone(),
        shipping,
        menu: Arc::new(menu),
        orders: Arc::new(DashMapOrderRepository::new()),
        mail: Arc::new(LogMailSender::new()),
        maps: cfg.maps(),
        whatsapp_phone: cfg.whatsapp_phone.clone(),
    };

    let shutdown = ShutdownController::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let server = ApiServer::new(cfg.listen_addr.clone(), state);
    let result = server.run(shutdown).await;

    resolver.shutdown();
    tracing::info!("pizzeria-api stopped");
    result
}
