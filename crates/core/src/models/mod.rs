pub mod analytics;
pub mod bill;
pub mod category;
pub mod chart;
pub mod ledger;
pub mod query;
pub mod settings;
