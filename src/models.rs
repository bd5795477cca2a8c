pub mod audit;
pub mod auth;
pub mod fiscal;
pub mod product;
