//! Page navigation and zoom for the document being read. Rendering itself
//! happens in the frontend; this side decides what to render and remembers
//! page and zoom between runs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tapword_config::viewer::ViewerConfig;
use tapword_types::{BackendEvent, ViewerView};

const PAGE_KEY: &str = "page";
const SCALE_KEY: &str = "scale";

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Corrupt viewer state: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Renderer collaborator. Results come back through `Viewer::on_loaded` and
/// `Viewer::on_load_error`.
pub trait DocumentRenderer: Send {
    fn load(&mut self, source: &str);

    fn render_page(&mut self, page: u32, scale: f32);
}

/// Renderer living in the frontend. Commands are queued until the event loop
/// forwards them over the bridge.
#[derive(Debug, Default)]
pub struct BridgeRenderer {
    queued: Vec<BackendEvent>,
}

impl BridgeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued since the last call, oldest first
    pub fn take_commands(&mut self) -> Vec<BackendEvent> {
        std::mem::take(&mut self.queued)
    }
}

impl DocumentRenderer for BridgeRenderer {
    fn load(&mut self, source: &str) {
        self.queued.push(BackendEvent::LoadDocument {
            source: source.to_string(),
        });
    }

    fn render_page(&mut self, page: u32, scale: f32) {
        self.queued.push(BackendEvent::RenderPage { page, scale });
    }
}

/// Key-value file store for viewer settings
#[derive(Debug, Default)]
pub struct ViewerStore {
    values: HashMap<String, serde_json::Value>,
    path: Option<PathBuf>,
}

impl ViewerStore {
    /// In-memory only
    pub fn ephemeral() -> Self {
        Self::default()
    }

    pub fn default_path() -> Result<PathBuf, ViewerError> {
        let dir = dirs::data_dir().ok_or(ViewerError::NoDataDir)?;
        Ok(dir.join("tapword").join("viewer.json"))
    }

    pub fn open(path: &Path) -> Result<Self, ViewerError> {
        let values = if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| ViewerError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            values,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open, falling back to an empty store bound to the same file
    pub fn open_or_empty(path: &Path) -> Self {
        Self::open(path).unwrap_or_else(|e| {
            tracing::error!("Failed to load viewer state from {}: {e}", path.display());
            Self {
                values: HashMap::new(),
                path: Some(path.to_path_buf()),
            }
        })
    }

    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn set(&mut self, key: &str, value: impl serde::Serialize) -> Result<(), ViewerError> {
        self.values
            .insert(key.to_string(), serde_json::to_value(value)?);
        self.save()
    }

    fn save(&self) -> Result<(), ViewerError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let io_err = |source: std::io::Error| ViewerError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(path, content).map_err(io_err)
    }
}

pub struct Viewer<R: DocumentRenderer> {
    renderer: R,
    store: ViewerStore,
    config: ViewerConfig,
    source: Option<String>,
    page: u32,
    scale: f32,
    page_count: Option<u32>,
    error: Option<String>,
}

impl<R: DocumentRenderer> Viewer<R> {
    /// Restores the persisted page and zoom
    pub fn new(renderer: R, config: ViewerConfig, store: ViewerStore) -> Self {
        let page = store.get::<u32>(PAGE_KEY).unwrap_or(1).max(1);
        let scale = store
            .get::<f32>(SCALE_KEY)
            .unwrap_or(1.0)
            .clamp(config.min_scale, config.max_scale);

        Self {
            renderer,
            store,
            config,
            source: None,
            page,
            scale,
            page_count: None,
            error: None,
        }
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn open(&mut self, source: String) {
        tracing::info!("Opening document {source}");
        self.page_count = None;
        self.error = None;
        self.renderer.load(&source);
        self.source = Some(source);
    }

    pub fn on_loaded(&mut self, page_count: u32) {
        tracing::info!("Document loaded with {page_count} pages");
        self.page_count = Some(page_count);
        self.error = None;
        let page = self.page;
        self.go_to(page);
    }

    /// Static inline message; translation state is untouched
    pub fn on_load_error(&mut self, message: String) {
        tracing::error!("Document failed to load: {message}");
        self.page_count = None;
        self.error = Some(message);
    }

    pub fn go_to(&mut self, page: u32) {
        let last = self.page_count.unwrap_or(u32::MAX).max(1);
        self.page = page.clamp(1, last);
        self.persist(PAGE_KEY, self.page);
        self.render();
    }

    pub fn next_page(&mut self) {
        self.go_to(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale + self.config.scale_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale - self.config.scale_step);
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.clamp(self.config.min_scale, self.config.max_scale);
        self.persist(SCALE_KEY, self.scale);
        self.render();
    }

    pub fn view(&self) -> ViewerView {
        ViewerView {
            source: self.source.clone(),
            page: self.page,
            page_count: self.page_count,
            scale: self.scale,
            error: self.error.clone(),
        }
    }

    fn render(&mut self) {
        if self.page_count.is_some() {
            self.renderer.render_page(self.page, self.scale);
        }
    }

    fn persist(&mut self, key: &str, value: impl serde::Serialize) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!("Failed to persist viewer {key}: {e}");
        }
    }
}
