use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Word-limited phrase taken from a stable text selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPhrase {
    pub text: String,
    /// Horizontal centre and top edge of the selection
    pub anchor: Point,
    /// Bounding box of the first selection range
    pub bounds: Rect,
}

impl SelectedPhrase {
    pub fn new(text: impl Into<String>, bounds: Rect) -> Self {
        Self {
            text: text.into(),
            anchor: Point::new(bounds.center_x(), bounds.top),
            bounds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub background: String,
    pub text: String,
    pub accent: String,
    pub hint: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#000000".to_string(),
            accent: "#2481cc".to_string(),
            hint: "#999999".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HapticKind {
    Selection,
    Dismiss,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementSide {
    Above,
    Below,
}

/// Realised popup box after viewport adjustment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Adjusted anchor the popup is centred on
    pub anchor: Point,
    pub side: PlacementSide,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardBadge {
    pub added: bool,
    pub note_id: Option<u64>,
    pub message: Option<String>,
}

/// Exactly one body is rendered at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopupBody {
    Placeholder,
    Loading,
    Error {
        message: String,
    },
    Translation {
        text: String,
        flashcard: Option<FlashcardBadge>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupView {
    pub visible: bool,
    pub phrase: Option<String>,
    pub body: PopupBody,
    pub placement: Option<Placement>,
    pub theme: Option<ThemeColors>,
}

impl PopupView {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            phrase: None,
            body: PopupBody::Placeholder,
            placement: None,
            theme: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerView {
    pub source: Option<String>,
    pub page: u32,
    pub page_count: Option<u32>,
    pub scale: f32,
    pub error: Option<String>,
}

/// Messages coming from the rendering frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrontendEvent {
    /// Current native selection, pushed whenever it changes
    Selection { text: String, ranges: Vec<Rect> },
    /// Pointer-up or touch-end on the document
    PointerRelease,
    PointerDown { x: f64, y: f64 },
    Close,
    Retry,
    Viewport { width: f64, height: f64 },
    PopupSize { width: f64, height: f64 },
    OpenDocument { source: String },
    DocumentLoaded { page_count: u32 },
    DocumentError { message: String },
    GoToPage { page: u32 },
    NextPage,
    PrevPage,
    ZoomIn,
    ZoomOut,
    Shutdown,
}

/// Messages sent back to the rendering frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendEvent {
    Ready,
    Popup(PopupView),
    Viewer(ViewerView),
    Haptic { kind: HapticKind },
    /// Ask the frontend renderer to load a document
    LoadDocument { source: String },
    RenderPage { page: u32, scale: f32 },
}
