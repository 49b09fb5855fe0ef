use std::path::PathBuf;

use async_trait::async_trait;

use crate::core::{AppError, Result};

/// Rendering collaborator for receipt documents: HTML in, artifact path out.
///
/// The PNG/PDF rasterizer is an external concern; this trait is the seam it
/// plugs into. The default implementation just persists the HTML document.
#[async_trait]
pub trait ArtifactRenderer: Send + Sync {
    async fn render(&self, html: &str, name: &str) -> Result<String>;
}

/// Writes the receipt HTML into the configured artifact directory
pub struct HtmlFileRenderer {
    dir: PathBuf,
}

impl HtmlFileRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ArtifactRenderer for HtmlFileRenderer {
    async fn render(&self, html: &str, name: &str) -> Result<String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create artifact dir: {}", e)))?;

        let path = self.dir.join(format!("{}.html", name));
        tokio::fs::write(&path, html)
            .await
            .map_err(|e| AppError::internal(format!("Failed to write receipt: {}", e)))?;

        Ok(path.to_string_lossy().into_owned())
    }
}
