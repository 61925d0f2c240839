pub mod endpoints;
pub mod main_api;
pub mod model;
