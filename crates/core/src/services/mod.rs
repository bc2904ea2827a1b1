pub mod analytics_service;
pub mod chart_service;
pub mod export_service;
pub mod ledger_service;
pub mod receipt_service;
pub mod search_debouncer;
pub mod settings_service;
