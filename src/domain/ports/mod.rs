mod address_cache;
mod address_form;
mod address_provider;
mod mail_sender;
mod menu_repository;
mod order_repository;

pub use address_cache::AddressCache;
pub use address_form::{AddressForm, FormEvent};
pub use address_provider::AddressProvider;
pub use mail_sender::{ContactMessage, MailSender};
pub use menu_repository::MenuRepository;
pub use order_repository::OrderRepository;
