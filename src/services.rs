pub mod auth;
pub mod fiscal_service;
pub mod onboarding;
pub mod tax_rules;
