mod api_server;

pub use api_server::{router, ApiServer, ApiState, MapsConfig};

// Re-export for external use (e.g., integration tests)
#[allow(unused_imports)]
pub use api_server::{
    whatsapp_link, BatchRequest, CreateOrderRequest, HealthResponse, WhatsAppRequest, MAX_BATCH,
};
