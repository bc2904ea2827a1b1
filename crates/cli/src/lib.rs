pub mod cli;
pub mod commands;
pub mod error;
pub mod item_spec;
pub mod output;
pub mod shell;
