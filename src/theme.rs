//! Presentation configuration
//!
//! Earlier deployments shipped three near-duplicate app builds differing
//! only in palette, sound timbre, sizing, and document layout. Here that is
//! one core plus a theme record, persisted separately from draw snapshots.

use serde::{Deserialize, Serialize};

use crate::consts::TEAM_COUNT;

/// Named presentation presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemePreset {
    #[default]
    Classic,
    Midnight,
    Daylight,
}

/// Spin-sound sweep parameters (sine oscillator, Hz)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTone {
    pub start_hz: f32,
    pub peak_hz: f32,
    /// Seconds the frequency takes to sweep from start to peak
    pub sweep_secs: f64,
}

impl ThemePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreset::Classic => "Classic",
            ThemePreset::Midnight => "Midnight",
            ThemePreset::Daylight => "Daylight",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(ThemePreset::Classic),
            "midnight" => Some(ThemePreset::Midnight),
            "daylight" => Some(ThemePreset::Daylight),
            _ => None,
        }
    }

    /// Segment fill colors, indexed by segment position modulo the palette.
    pub fn palette(&self) -> [&'static str; TEAM_COUNT] {
        match self {
            ThemePreset::Classic => [
                "#ef4444", "#f97316", "#f59e0b", "#84cc16", "#22c55e", "#14b8a6", "#0ea5e9",
                "#6366f1", "#a855f7",
            ],
            ThemePreset::Midnight => [
                "#7f1d1d", "#7c2d12", "#78350f", "#365314", "#14532d", "#134e4a", "#0c4a6e",
                "#312e81", "#581c87",
            ],
            ThemePreset::Daylight => [
                "#fca5a5", "#fdba74", "#fcd34d", "#bef264", "#86efac", "#5eead4", "#7dd3fc",
                "#a5b4fc", "#d8b4fe",
            ],
        }
    }

    /// Segment rim / divider color
    pub fn rim_color(&self) -> &'static str {
        match self {
            ThemePreset::Classic => "#0b2a55",
            ThemePreset::Midnight => "#020617",
            ThemePreset::Daylight => "#475569",
        }
    }

    /// Segment label color
    pub fn label_color(&self) -> &'static str {
        match self {
            ThemePreset::Midnight => "#e2e8f0",
            _ => "#ffffff",
        }
    }

    /// Wheel canvas size in CSS pixels
    pub fn wheel_px(&self) -> u32 {
        match self {
            ThemePreset::Daylight => 360,
            _ => 480,
        }
    }

    /// Spin whoosh timbre
    pub fn spin_tone(&self) -> SpinTone {
        match self {
            ThemePreset::Classic => SpinTone {
                start_hz: 220.0,
                peak_hz: 600.0,
                sweep_secs: 2.3,
            },
            ThemePreset::Midnight => SpinTone {
                start_hz: 110.0,
                peak_hz: 330.0,
                sweep_secs: 2.8,
            },
            ThemePreset::Daylight => SpinTone {
                start_hz: 330.0,
                peak_hz: 880.0,
                sweep_secs: 2.0,
            },
        }
    }

    /// Fixture table rows per exported page
    pub fn rows_per_page(&self) -> usize {
        match self {
            ThemePreset::Daylight => 9,
            _ => 12,
        }
    }
}

/// Presentation preferences, persisted separately from draw snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub preset: ThemePreset,
    /// Spin sound on/off
    pub sound: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            preset: ThemePreset::Classic,
            sound: true,
        }
    }
}

impl Theme {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "draw_wheel_theme";

    pub fn spin_tone(&self) -> Option<SpinTone> {
        self.sound.then(|| self.preset.spin_tone())
    }

    /// Load from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(theme) = serde_json::from_str(&json) {
                    log::info!("Loaded theme from LocalStorage");
                    return theme;
                }
            }
        }

        log::info!("Using default theme");
        Self::default()
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
