use crate::domain::model::{
    AdvancedEditRequest, Annotation, BackgroundOptions, Currency, PageInfo, PdfUpload,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn site_base_url(&self) -> &str;
    fn api_base_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn currency(&self) -> Currency;
    fn request_timeout_seconds(&self) -> Option<u64>;
}

/// Backend routes that do the actual PDF work. Implementations return the
/// processed document bytes on success.
#[async_trait]
pub trait PdfService: Send + Sync {
    async fn unlock(&self, file: &PdfUpload, password: &str) -> Result<Vec<u8>>;
    async fn change_background(
        &self,
        file: &PdfUpload,
        options: &BackgroundOptions,
    ) -> Result<Vec<u8>>;
    async fn edit(&self, file: &PdfUpload, annotations: &[Annotation]) -> Result<Vec<u8>>;
    async fn advanced_edit(
        &self,
        file: &PdfUpload,
        request: &AdvancedEditRequest,
    ) -> Result<Vec<u8>>;
    async fn page_info(&self, file: &PdfUpload) -> Result<PageInfo>;
}
