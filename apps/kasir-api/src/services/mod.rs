//! Service layer.
//!
//! Handlers stay thin: they extract, call one service or repository
//! method, and serialize. Anything that needs the clock, validation, or
//! more than one store call lives here.

pub mod health_service;
pub mod report_service;
pub mod transaction_service;

pub use health_service::{HealthReport, HealthService, ServingStatus};
pub use report_service::ReportService;
pub use transaction_service::TransactionService;
