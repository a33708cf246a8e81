//! HTTP API handlers for a11y-audit

pub mod admission;
pub mod audit;
pub mod health;

pub use admission::admission_middleware;
pub use audit::audit_routes;
pub use health::health_routes;
