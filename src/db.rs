pub mod audit_repo;
pub use audit_repo::AuditRepository;
pub mod fiscal_repo;
pub use fiscal_repo::FiscalRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod tenancy_repo;
pub use tenancy_repo::TenantRepository;
