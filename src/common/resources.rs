//! # Resource locations for model weights, vocabularies and configuration files
//!
//! The models are loaded through `rust-bert` resources. This module provides a serializable
//! description of where a resource lives so that it can be declared in the configuration file:
//! - `Local`: points to a file on disk (e.g. weights converted locally to the `.ot` format)
//! - `Remote`: points to a URL, downloaded once and cached under `RUSTBERT_CACHE`
//!
//! ```json
//! { "local_path": "/models/mt5-xlsum/rust_model.ot" }
//! { "url": "https://huggingface.co/facebook/m2m100_418M/resolve/main/config.json", "cache_subdir": "m2m100-418m/config" }
//! ```

use rust_bert::resources::{LocalResource, RemoteResource, ResourceProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// # Location of a single model file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceLocation {
    /// File available on the local filesystem
    Local { local_path: PathBuf },
    /// File downloaded on demand and cached in the given cache subdirectory
    Remote { url: String, cache_subdir: String },
}

impl ResourceLocation {
    /// Declares a remote location from a `(cache_subdir, url)` pair, as used by the pretrained
    /// resource constants of this crate and of `rust-bert`.
    ///
    /// # Example
    ///
    /// ```
    /// use summatrans::common::resources::ResourceLocation;
    /// let location = ResourceLocation::from_pretrained((
    ///     "m2m100-418m/config",
    ///     "https://huggingface.co/facebook/m2m100_418M/resolve/main/config.json",
    /// ));
    /// assert!(location.is_remote());
    /// ```
    pub fn from_pretrained(name_url_tuple: (&str, &str)) -> ResourceLocation {
        ResourceLocation::Remote {
            cache_subdir: name_url_tuple.0.to_string(),
            url: name_url_tuple.1.to_string(),
        }
    }

    pub fn local(local_path: impl Into<PathBuf>) -> ResourceLocation {
        ResourceLocation::Local {
            local_path: local_path.into(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ResourceLocation::Remote { .. })
    }

    /// Converts the location into a `rust-bert` resource provider. Remote resources are not
    /// downloaded until the pipeline requests their local path.
    pub fn to_provider(&self) -> Box<dyn ResourceProvider + Send> {
        match self {
            ResourceLocation::Local { local_path } => Box::new(LocalResource {
                local_path: local_path.clone(),
            }),
            ResourceLocation::Remote { url, cache_subdir } => {
                Box::new(RemoteResource::new(url, cache_subdir))
            }
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResourceLocation::Local { local_path } => write!(f, "{}", local_path.display()),
            ResourceLocation::Remote { url, .. } => write!(f, "{}", url),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserializes_local_and_remote_locations() -> anyhow::Result<()> {
        let local: ResourceLocation =
            serde_json::from_str(r#"{"local_path": "/models/rust_model.ot"}"#)?;
        assert_eq!(local, ResourceLocation::local("/models/rust_model.ot"));

        let remote: ResourceLocation = serde_json::from_str(
            r#"{"url": "https://example.org/config.json", "cache_subdir": "example/config"}"#,
        )?;
        assert_eq!(
            remote,
            ResourceLocation::from_pretrained(("example/config", "https://example.org/config.json"))
        );
        assert!(remote.is_remote());
        Ok(())
    }

    #[test]
    fn local_provider_returns_path_without_io() -> anyhow::Result<()> {
        let location = ResourceLocation::local("does/not/exist.ot");
        let path = location.to_provider().get_local_path()?;
        assert_eq!(path, PathBuf::from("does/not/exist.ot"));
        Ok(())
    }
}
