pub mod m3u;
pub mod request;
