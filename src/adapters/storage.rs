use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// Reads input files relative to a base directory. Absolute paths bypass it.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    fn resolve(&self, path: &str) -> String {
        Path::new(&self.base_path).join(path).display().to_string()
    }
}
