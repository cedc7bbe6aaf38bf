pub mod api;
pub mod attendance;
pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;
pub mod utils;
