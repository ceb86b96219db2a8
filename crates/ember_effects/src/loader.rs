//! WGSL asset loading.
//!
//! The loader is built with an explicit asset root and a [`Fetcher`]; there is
//! no process-wide base location. Every source passes through an HTML sniff
//! before it is returned, since a misconfigured static server answers shader
//! requests with its index page and a 200 status.

use std::future::Future;
use std::path::PathBuf;

use crate::catalog::{EffectCatalog, EffectSpec};
use crate::error::{AssetError, AssetResult};

/// How many leading characters are inspected for markup.
const SNIFF_LEN: usize = 200;

/// Markers that identify an HTML document.
const HTML_MARKERS: [&str; 3] = ["<!doctype", "<html", "<meta"];

/// A fetched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// Numeric status; 2xx is success.
    pub status: u16,
    /// Status text, possibly empty.
    pub status_text: String,
    /// Body text.
    pub body: String,
}

impl FetchResponse {
    /// A 200 response carrying `body`.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, status_text: "OK".to_owned(), body: body.into() }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves documents by root-relative path.
pub trait Fetcher {
    /// Fetches `path`.
    fn fetch(&self, path: &str) -> impl Future<Output = AssetResult<FetchResponse>>;

    /// Identifier used in error messages for `path`.
    fn describe(&self, path: &str) -> String {
        path.to_owned()
    }
}

/// Reads assets from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    /// Serves files below `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl Fetcher for FileFetcher {
    async fn fetch(&self, path: &str) -> AssetResult<FetchResponse> {
        let resolved = self.resolve(path);
        let body = tokio::fs::read_to_string(&resolved)
            .await
            .map_err(|source| AssetError::Io {
                path: resolved.display().to_string(),
                source,
            })?;
        Ok(FetchResponse::ok(body))
    }

    fn describe(&self, path: &str) -> String {
        self.resolve(path).display().to_string()
    }
}

/// Rejects markup where WGSL was expected.
///
/// # Errors
///
/// [`AssetError::MalformedAsset`] naming `source_id`.
pub fn ensure_not_html(source: &str, source_id: &str) -> AssetResult<()> {
    let sample: String = source.chars().take(SNIFF_LEN).collect::<String>().to_lowercase();
    if HTML_MARKERS.iter().any(|marker| sample.contains(marker)) {
        return Err(AssetError::MalformedAsset { source_id: source_id.to_owned() });
    }
    Ok(())
}

/// A loaded kernel job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedJob {
    /// `particles.<effect>.<key>`.
    pub label: String,
    /// Source name reported by shader diagnostics.
    pub source_name: String,
    /// WGSL source.
    pub wgsl: String,
}

/// An effect's prelude plus every job it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectBundle {
    /// Shared structs and helpers.
    pub prelude_wgsl: String,
    /// Jobs in declaration order.
    pub jobs: Vec<LoadedJob>,
}

/// Loads effect kernels through a [`Fetcher`].
#[derive(Debug, Clone)]
pub struct AssetLoader<F> {
    fetcher: F,
}

impl AssetLoader<FileFetcher> {
    /// Loader over a directory on disk.
    #[must_use]
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(FileFetcher::new(root))
    }
}

impl<F: Fetcher> AssetLoader<F> {
    /// Creates a loader.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// The underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetches any root-relative WGSL document (queue and worker kernels).
    ///
    /// # Errors
    ///
    /// Transport, I/O or malformed-content errors.
    pub async fn load_source(&self, path: &str) -> AssetResult<String> {
        let response = self.fetcher.fetch(path).await?;
        if !response.is_success() {
            tracing::warn!(path, status = response.status, "asset fetch failed");
            return Err(AssetError::Transport {
                status: response.status,
                status_text: response.status_text,
            });
        }
        ensure_not_html(&response.body, &self.fetcher.describe(path))?;
        tracing::debug!(path, bytes = response.body.len(), "loaded WGSL");
        Ok(response.body)
    }

    /// Validates inline WGSL the same way fetched sources are validated.
    ///
    /// # Errors
    ///
    /// [`AssetError::MalformedAsset`] if the text is HTML.
    pub fn load_inline(&self, wgsl: &str) -> AssetResult<String> {
        ensure_not_html(wgsl, "inline WGSL")?;
        Ok(wgsl.to_owned())
    }

    /// Loads the named effect's prelude.
    ///
    /// # Errors
    ///
    /// Unknown effect, or any load error.
    pub async fn load_prelude(&self, effect: &str) -> AssetResult<String> {
        let spec = EffectCatalog::get(effect)?;
        self.load_source(&spec.prelude_path()).await
    }

    /// Loads one job of the named effect.
    ///
    /// # Errors
    ///
    /// Unknown effect or job key, or any load error.
    pub async fn load_job(&self, effect: &str, key: &str) -> AssetResult<LoadedJob> {
        let spec = EffectCatalog::get(effect)?;
        let entry = spec.job(key)?;
        let wgsl = self.load_source(&entry.path).await?;
        Ok(LoadedJob { source_name: entry.label.clone(), label: entry.label, wgsl })
    }

    /// Loads the named effect's prelude and every job it declares.
    ///
    /// # Errors
    ///
    /// Unknown effect, or the first load error.
    pub async fn load_effect_jobs(&self, effect: &str) -> AssetResult<EffectBundle> {
        let spec = EffectCatalog::get(effect)?;
        self.load_bundle(spec).await
    }

    /// Loads the default effect's bundle.
    ///
    /// # Errors
    ///
    /// The first load error.
    pub async fn load_default_jobs(&self) -> AssetResult<EffectBundle> {
        self.load_bundle(EffectCatalog::default_spec()).await
    }

    async fn load_bundle(&self, spec: &EffectSpec) -> AssetResult<EffectBundle> {
        let prelude_wgsl = self.load_source(&spec.prelude_path()).await?;
        let mut jobs = Vec::with_capacity(spec.jobs.len());
        for entry in spec.job_entries() {
            let wgsl = self.load_source(&entry.path).await?;
            jobs.push(LoadedJob { source_name: entry.label.clone(), label: entry.label, wgsl });
        }
        Ok(EffectBundle { prelude_wgsl, jobs })
    }
}
