pub mod http;

pub use http::HttpCatalogClient;
