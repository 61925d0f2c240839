pub mod addon_api;
