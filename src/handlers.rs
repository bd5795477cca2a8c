// src/handlers.rs

pub mod certificates;
pub mod fiscal_config;
pub mod products;
pub mod tax_rules;
