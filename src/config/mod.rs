pub mod monitor_config;
