pub mod config;
pub mod db;
pub mod error_convert;
pub mod export;
pub mod import;
pub mod repo;
pub mod storage;
pub mod telemetry;
