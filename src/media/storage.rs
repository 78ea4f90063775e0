use crate::config::Config;
use crate::error::GenerationError;
use crate::providers::GeneratedImage;
use crate::utils::fs::atomic_write;
use reqwest::Client;
use std::path::PathBuf;

/// URL prefix the site serves blog images under.
pub const WEB_IMAGE_PREFIX: &str = "/images/blog";

const MAX_IMAGE_BYTES: usize = 20 * 1_024 * 1_024;

/// A saved image and everywhere it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub file_name: String,
    /// Site-relative URL for frontmatter, `/images/blog/<file>`.
    pub web_path: String,
    pub paths: Vec<PathBuf>,
}

/// Writes generated images into the configured images directory and, when
/// the site has a `public/` directory, mirrors them into
/// `public/images/blog/` so the site can serve them.
pub struct ImageStore {
    images_dir: PathBuf,
    public_dir: Option<PathBuf>,
    client: Client,
}

impl ImageStore {
    pub fn new(images_dir: PathBuf, public_dir: Option<PathBuf>, client: Client) -> Self {
        Self {
            images_dir,
            public_dir,
            client,
        }
    }

    pub fn from_config(config: &Config, client: Client) -> Self {
        let public_dir = config
            .site_root()
            .map(|root| root.join("public"))
            .filter(|public| public.is_dir())
            .map(|public| public.join("images").join("blog"));
        Self::new(config.images_dir(), public_dir, client)
    }

    /// Save `image` as `<millis>.png`. URLs are downloaded first.
    pub async fn save(
        &self,
        image: GeneratedImage,
        millis: i64,
    ) -> Result<StoredImage, GenerationError> {
        let bytes = match image {
            GeneratedImage::Bytes(bytes) => bytes,
            GeneratedImage::Url(url) => self.download(&url).await?,
        };
        if bytes.is_empty() {
            return Err(GenerationError::ImageDownload("image is empty".into()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(GenerationError::ImageDownload(format!(
                "image size {} exceeds maximum {MAX_IMAGE_BYTES} bytes",
                bytes.len()
            )));
        }

        let file_name = format!("{millis}.png");
        let mut paths = Vec::with_capacity(2);
        for dir in std::iter::once(&self.images_dir).chain(self.public_dir.as_ref()) {
            // Both directories may resolve to the same place.
            let path = dir.join(&file_name);
            if paths.contains(&path) {
                continue;
            }
            atomic_write(&path, &bytes).map_err(|e| {
                GenerationError::ImageDownload(format!("cannot write {}: {e}", path.display()))
            })?;
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "image saved");
            paths.push(path);
        }

        Ok(StoredImage {
            web_path: format!("{WEB_IMAGE_PREFIX}/{file_name}"),
            file_name,
            paths,
        })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, GenerationError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GenerationError::ImageDownload(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::ImageDownload(format!("HTTP {status}")));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerationError::ImageDownload(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
