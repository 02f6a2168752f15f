pub mod finance;
pub mod sitemap;

pub use crate::domain::ports::{ConfigProvider, PdfService, Storage};
pub use crate::utils::error::Result;
