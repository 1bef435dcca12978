//! Client preferences
//!
//! Read from LocalStorage on the web; natively the defaults are used.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Triangles per circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 16,
            QualityPreset::Medium => 32,
            QualityPreset::High => 64,
        }
    }
}

/// Client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tessellation quality
    pub quality: QualityPreset,
    /// Server path the websocket connects to
    pub socket_path: String,
    /// One of off, error, warn, info, debug, trace
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            socket_path: "/gol/".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn circle_segments(&self) -> u32 {
        self.quality.circle_segments()
    }

    /// Parsed log level, `Info` when unrecognised
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Websocket URL for the page's host
    pub fn socket_url(&self, host: &str, secure: bool) -> String {
        let scheme = if secure { "wss" } else { "ws" };
        let path = if self.socket_path.starts_with('/') {
            self.socket_path.clone()
        } else {
            format!("/{}", self.socket_path)
        };
        format!("{}://{}{}", scheme, host, path)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "pitchside_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
