use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::Svc;

/// Opaque object name: random stem, upload timestamp, original extension.
/// No collision detection; a clash surfaces as an ordinary write error.
pub fn object_name(original: &str) -> String {
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    format!(
        "{}_{}.{}",
        Uuid::now_v7().simple(),
        Utc::now().timestamp_millis(),
        ext
    )
}

#[async_trait]
pub trait BlobStore: Svc {
    /// Store the bytes and return the public URL they will be served from.
    async fn store(&self, original_name: &str, bytes: &[u8]) -> anyhow::Result<String>;

    /// Same, but under the `inline/` prefix used for images embedded in
    /// post bodies.
    async fn store_inline(&self, original_name: &str, bytes: &[u8]) -> anyhow::Result<String>;
}

#[derive(Clone)]
pub struct DiskBlobStore {
    root: PathBuf,
    public_base: String,
}

impl Svc for DiskBlobStore {}

#[async_trait]
impl BlobStore for DiskBlobStore {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> anyhow::Result<String> {
        self.write_object(None, original_name, bytes).await
    }

    async fn store_inline(&self, original_name: &str, bytes: &[u8]) -> anyhow::Result<String> {
        self.write_object(Some("inline"), original_name, bytes).await
    }
}

impl DiskBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    pub async fn ensure_root(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(self.root.join("inline"))
            .await
            .with_context(|| format!("creating uploads dir {}", self.root.display()))?;
        Ok(())
    }

    async fn write_object(
        &self,
        subdir: Option<&str>,
        original_name: &str,
        bytes: &[u8],
    ) -> anyhow::Result<String> {
        let name = object_name(original_name);
        let (path, url) = match subdir {
            Some(dir) => (
                self.root.join(dir).join(&name),
                format!("{}/{}/{}", self.public_base, dir, name),
            ),
            None => (
                self.root.join(&name),
                format!("{}/{}", self.public_base, name),
            ),
        };
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("writing upload to {}", path.display()))?;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_name_keeps_extension() {
        assert!(object_name("photo.png").ends_with(".png"));
        assert!(object_name("archive.tar.gz").ends_with(".gz"));
        assert!(object_name("no-extension").ends_with(".bin"));
    }

    #[test]
    fn object_names_differ() {
        assert_ne!(object_name("a.jpg"), object_name("a.jpg"));
    }

    #[tokio::test]
    async fn disk_store_round_trip() {
        let root = std::env::temp_dir().join(format!("inkpress-test-{}", Uuid::now_v7().simple()));
        let store = DiskBlobStore::new(&root, "/uploads");
        store.ensure_root().await.unwrap();

        let url = store.store("cover.png", b"fakepng").await.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let name = url.rsplit('/').next().unwrap();
        let written = tokio::fs::read(root.join(name)).await.unwrap();
        assert_eq!(written, b"fakepng");

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn inline_store_lands_under_its_prefix() {
        let root = std::env::temp_dir().join(format!("inkpress-test-{}", Uuid::now_v7().simple()));
        let store = DiskBlobStore::new(&root, "/uploads");
        store.ensure_root().await.unwrap();

        let url = store.store_inline("figure.png", b"fakepng").await.unwrap();
        assert!(url.starts_with("/uploads/inline/"));

        let name = url.rsplit('/').next().unwrap();
        let written = tokio::fs::read(root.join("inline").join(name)).await.unwrap();
        assert_eq!(written, b"fakepng");

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
