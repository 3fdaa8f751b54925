pub mod config;
pub mod db;
pub mod donations;
pub mod errors;
pub mod schema;
pub mod stats;
