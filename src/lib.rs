pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod listing;
pub mod models;
pub mod ot;
pub mod qr;
pub mod schedule;
pub mod services;
pub mod session;
pub mod state;
