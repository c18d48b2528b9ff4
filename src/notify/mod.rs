pub mod message;
pub mod notification_builder;
pub mod section_catalog;
