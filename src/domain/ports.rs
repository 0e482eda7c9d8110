use crate::domain::model::{GeneratedWeek, PlanInputs};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// Appends `data` to the end of `path`, creating the file when missing.
    fn append_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_path(&self) -> &str;
    fn history_path(&self) -> &str;
    fn difficulty(&self) -> &str;
    fn dry_run(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<PlanInputs>;
    async fn transform(&self, inputs: PlanInputs) -> Result<GeneratedWeek>;
    /// Persists the week. `Ok(None)` means nothing was written.
    async fn load(&self, week: &GeneratedWeek) -> Result<Option<String>>;
}
