pub mod catalog;
pub mod config;
pub mod output;
pub mod predictor;
pub mod ranker;
pub mod routes;
pub mod server;
pub mod types;
