pub mod cli;
pub mod codec;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod presenter;
pub mod storage;
pub mod store;
pub mod view;
