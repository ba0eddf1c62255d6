use crate::adapters::inbound::MapsConfig;
use crate::adapters::outbound::{BRASILAPI_BASE_URL, VIACEP_BASE_URL};
use crate::application::{ResolverConfig, ShippingConfig};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Server settings
    pub listen_addr: String,
    pub debug: bool,

    // CEP providers
    pub viacep_base_url: String,
    pub brasilapi_base_url: String,
    pub provider_timeout_ms: u64,
    pub retry_attempts: u32,
    pub backoff_step_ms: u64,
    pub cache_ttl_secs: u64,
    pub batch_spacing_ms: u64,

    // Storefront
    pub menu_path: Option<String>,
    pub maps_api_key: Option<String>,
    pub maps_language: String,
    pub maps_region: String,
    pub maps_libraries: Vec<String>,
    pub whatsapp_phone: Option<String>,

    // Shipping
    pub shipping_origin_city: String,
    pub shipping_origin_state: String,
    pub shipping_local_fee_cents: u32,
    pub shipping_state_fee_cents: u32,
    pub shipping_national_fee_cents: u32,
    pub shipping_cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            debug: false,
            viacep_base_url: VIACEP_BASE_URL.to_string(),
            brasilapi_base_url: BRASILAPI_BASE_URL.to_string(),
            provider_timeout_ms: 5000,
            retry_attempts: 2,
            backoff_step_ms: 500,
            cache_ttl_secs: 3600,
            batch_spacing_ms: 100,
            menu_path: None,
            maps_api_key: None,
            maps_language: "pt-BR".to_string(),
            maps_region: "BR".to_string(),
            maps_libraries: vec!["places".to_string()],
            whatsapp_phone: None,
            shipping_origin_city: "São Paulo".to_string(),
            shipping_origin_state: "SP".to_string(),
            shipping_local_fee_cents: 800,
            shipping_state_fee_cents: 1500,
            shipping_national_fee_cents: 3000,
            shipping_cache_ttl_secs: 300,
        }
    }
}

impl Config {
    pub fn resolver(&self) -> ResolverConfig {
        ResolverConfig {
            provider_timeout: Duration::from_millis(self.provider_timeout_ms),
            retry_attempts: self.retry_attempts,
            backoff_step: Duration::from_millis(self.backoff_step_ms),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            batch_spacing: Duration::from_millis(self.batch_spacing_ms),
        }
    }

    pub fn shipping(&self) -> ShippingConfig {
        ShippingConfig {
            origin_city: self.shipping_origin_city.clone(),
            origin_state: self.shipping_origin_state.clone(),
            local_fee_cents: self.shipping_local_fee_cents,
            state_fee_cents: self.shipping_state_fee_cents,
            national_fee_cents: self.shipping_national_fee_cents,
            cache_ttl: Duration::from_secs(self.shipping_cache_ttl_secs),
        }
    }

    pub fn maps(&self) -> MapsConfig {
        MapsConfig {
            api_key: self.maps_api_key.clone(),
            libraries: self.maps_libraries.clone(),
            language: self.maps_language.clone(),
            region: self.maps_region.clone(),
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn load_config() -> anyhow::Result<Config> {
    let defaults = Config::default();

    let listen_addr = var_or("PIZZERIA_LISTEN_ADDR", &defaults.listen_addr);
    let debug = std::env::var("DEBUG").is_ok();

    // CEP providers
    let viacep_base_url = var_or("PIZZERIA_VIACEP_URL", &defaults.viacep_base_url);
    let brasilapi_base_url = var_or("PIZZERIA_BRASILAPI_URL", &defaults.brasilapi_base_url);
    let provider_timeout_ms =
        parsed_or("PIZZERIA_PROVIDER_TIMEOUT_MS", defaults.provider_timeout_ms);
    let retry_attempts = parsed_or("PIZZERIA_RETRY_ATTEMPTS", defaults.retry_attempts);
    let backoff_step_ms = parsed_or("PIZZERIA_BACKOFF_STEP_MS", defaults.backoff_step_ms);
    let cache_ttl_secs = parsed_or("PIZZERIA_CEP_CACHE_TTL_SECS", defaults.cache_ttl_secs);
    let batch_spacing_ms = parsed_or("PIZZERIA_BATCH_SPACING_MS", defaults.batch_spacing_ms);

    // Storefront
    let menu_path = non_empty("PIZZERIA_MENU_PATH");
    let maps_api_key = non_empty("PIZZERIA_MAPS_API_KEY");
    let maps_language = var_or("PIZZERIA_MAPS_LANGUAGE", &defaults.maps_language);
    let maps_region = var_or("PIZZERIA_MAPS_REGION", &defaults.maps_region);
    let maps_libraries = std::env::var("PIZZERIA_MAPS_LIBRARIES")
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or(defaults.maps_libraries);
    let whatsapp_phone = non_empty("PIZZERIA_WHATSAPP_PHONE");

    // Shipping
    let shipping_origin_city =
        var_or("PIZZERIA_SHIPPING_ORIGIN_CITY", &defaults.shipping_origin_city);
    let shipping_origin_state =
        var_or("PIZZERIA_SHIPPING_ORIGIN_STATE", &defaults.shipping_origin_state);
    let shipping_local_fee_cents =
        parsed_or("PIZZERIA_SHIPPING_LOCAL_FEE_CENTS", defaults.shipping_local_fee_cents);
    let shipping_state_fee_cents =
        parsed_or("PIZZERIA_SHIPPING_STATE_FEE_CENTS", defaults.shipping_state_fee_cents);
    let shipping_national_fee_cents = parsed_or(
        "PIZZERIA_SHIPPING_NATIONAL_FEE_CENTS",
        defaults.shipping_national_fee_cents,
    );
    let shipping_cache_ttl_secs =
        parsed_or("PIZZERIA_SHIPPING_CACHE_TTL_SECS", defaults.shipping_cache_ttl_secs);

    Ok(Config {
        listen_addr,
        debug,
        viacep_base_url,
        brasilapi_base_url,
        provider_timeout_ms,
        retry_attempts,
        backoff_step_ms,
        cache_ttl_secs,
        batch_spacing_ms,
        menu_path,
        maps_api_key,
        maps_language,
        maps_region,
        maps_libraries,
        whatsapp_phone,
        shipping_origin_city,
        shipping_origin_state,
        shipping_local_fee_cents,
        shipping_state_fee_cents,
        shipping_national_fee_cents,
        shipping_cache_ttl_secs,
    })
}
