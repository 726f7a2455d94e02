pub mod analysis;
pub mod config;
pub mod documentation;
pub mod routes;
