use async_trait::async_trait;

use crate::domain::error::Result;

/// A file picked by the user: a name plus bytes that arrive asynchronously.
/// Reading is the only point where an upload waits.
#[async_trait(?Send)]
pub trait UploadSource {
    fn file_name(&self) -> &str;

    async fn read_bytes(&mut self) -> Result<Vec<u8>>;
}

/// Upload whose bytes are already in memory
pub struct BufferedUpload {
    file_name: String,
    bytes: Option<Vec<u8>>,
}

impl BufferedUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: Some(bytes.into()),
        }
    }
}

#[async_trait(?Send)]
impl UploadSource for BufferedUpload {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    async fn read_bytes(&mut self) -> Result<Vec<u8>> {
        Ok(self.bytes.take().unwrap_or_default())
    }
}

/// Upload read from the local filesystem
pub struct LocalFileUpload {
    path: std::path::PathBuf,
    file_name: String,
}

impl LocalFileUpload {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { path, file_name }
    }
}

#[async_trait(?Send)]
impl UploadSource for LocalFileUpload {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    async fn read_bytes(&mut self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}
