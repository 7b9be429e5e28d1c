pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod fs;
pub mod parser;
pub mod templates;
pub mod utils;
