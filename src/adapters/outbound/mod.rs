mod brasilapi_provider;
mod dashmap_address_cache;
mod dashmap_menu_repo;
mod dashmap_order_repo;
mod http_lookup;
mod log_mail_sender;
mod viacep_provider;

pub use brasilapi_provider::{BrasilApiProvider, BRASILAPI_BASE_URL};
pub use dashmap_address_cache::{DashMapAddressCache, DEFAULT_CEP_TTL};
pub use dashmap_menu_repo::DashMapMenuRepository;
pub use dashmap_order_repo::DashMapOrderRepository;
pub use log_mail_sender::LogMailSender;
pub use viacep_provider::{ViaCepProvider, VIACEP_BASE_URL};
