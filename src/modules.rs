#[macro_export]
macro_rules! include_modules {
    () => {
        pub mod api;
        pub mod error;
        pub mod model;
        pub mod processing;
        pub mod utils;
    }
}
