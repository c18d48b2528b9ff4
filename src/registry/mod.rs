pub mod endpoint_registry;
pub mod webhook_url;
