use std::sync::Arc;

use kanal::AsyncSender;
use tapword_config::host::HostConfig;
use tapword_types::{BackendEvent, HapticKind, ThemeColors};

/// Capabilities offered by a chat-app mini-app host
pub trait HostPlatform: Send + Sync {
    fn is_host_environment(&self) -> bool;

    /// Colours the popup should use, if the host provides any
    fn theme(&self) -> Option<ThemeColors>;

    fn haptic(&self, kind: HapticKind);
}

/// Used outside a host: no theme, no haptics
pub struct NoopHost;

impl HostPlatform for NoopHost {
    fn is_host_environment(&self) -> bool {
        false
    }

    fn theme(&self) -> Option<ThemeColors> {
        None
    }

    fn haptic(&self, _kind: HapticKind) {}
}

/// Host reached through the frontend bridge; haptics become outbound events
pub struct BridgeHost {
    theme: ThemeColors,
    haptics: bool,
    outbound: AsyncSender<BackendEvent>,
}

impl BridgeHost {
    pub fn new(config: &HostConfig, outbound: AsyncSender<BackendEvent>) -> Self {
        Self {
            theme: config.theme.clone().unwrap_or_default(),
            haptics: config.haptics,
            outbound,
        }
    }
}

impl HostPlatform for BridgeHost {
    fn is_host_environment(&self) -> bool {
        true
    }

    fn theme(&self) -> Option<ThemeColors> {
        Some(self.theme.clone())
    }

    fn haptic(&self, kind: HapticKind) {
        if !self.haptics {
            return;
        }

        match self.outbound.try_send(BackendEvent::Haptic { kind }) {
            Ok(true) => {}
            Ok(false) => tracing::debug!("Haptic {kind:?} dropped, outbound queue full"),
            Err(e) => tracing::debug!("Haptic {kind:?} dropped: {e}"),
        }
    }
}

/// Pick the host implementation once at startup
pub fn select_host(
    config: &HostConfig,
    outbound: AsyncSender<BackendEvent>,
) -> Arc<dyn HostPlatform> {
    if config.enabled {
        tracing::info!("Running inside mini-app host");
        Arc::new(BridgeHost::new(config, outbound))
    } else {
        Arc::new(NoopHost)
    }
}
