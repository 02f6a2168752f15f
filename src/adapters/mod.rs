// Adapters layer: concrete implementations of the domain ports.

pub mod pdf_client;
pub mod storage;

pub use pdf_client::HttpPdfService;
pub use storage::LocalStorage;
