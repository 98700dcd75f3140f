pub mod host;
pub mod placement;
pub mod popup;
pub mod selection;
pub mod session;
pub mod viewer;

pub use host::{BridgeHost, HostPlatform, NoopHost};
pub use placement::place;
pub use popup::PopupPresenter;
pub use selection::{SelectionSignal, SelectionSnapshot, SelectionSource, SelectionTracker};
pub use session::{Dispatch, Outcome, RequestState, RequestTag, TranslationSession};
pub use viewer::{DocumentRenderer, Viewer, ViewerError, ViewerStore};
