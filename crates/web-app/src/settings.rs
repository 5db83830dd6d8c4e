use fitme_domain::{UnitSystem, UserProfile};
use log::error;
use serde::{Deserialize, Serialize};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

/// User preferences that affect the presentation.
///
/// Passed to every view that formats weights or heights instead of keeping
/// the unit system in a global.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    #[serde(with = "UnitSystemDef")]
    pub unit_system: UnitSystem,
    pub beep_volume: u8,
    pub theme: Theme,
    /// Show a notification before scheduled workouts.
    pub reminders: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "UnitSystem")]
enum UnitSystemDef {
    Metric,
    Imperial,
}

impl Settings {
    /// Take over the unit system stored in the user's profile.
    #[must_use]
    pub fn for_profile(self, profile: &UserProfile) -> Self {
        Self {
            unit_system: profile.unit_system,
            ..self
        }
    }

    #[must_use]
    pub fn format_weight(&self, kg: f32) -> String {
        self.unit_system.format_weight(kg)
    }

    #[must_use]
    pub fn format_height(&self, cm: f32) -> String {
        self.unit_system.format_height(cm)
    }

    #[must_use]
    pub fn current_theme(&self) -> Theme {
        match self.theme {
            Theme::System => {
                let Some(window) = web_sys::window() else {
                    error!("failed to access window to determine preferred color scheme");
                    return Theme::Light;
                };
                match window.match_media("(prefers-color-scheme: dark)") {
                    Ok(Some(media_query_list)) if media_query_list.matches() => Theme::Dark,
                    Ok(Some(_)) => Theme::Light,
                    Ok(None) => {
                        error!("failed to determine preferred color scheme");
                        Theme::Light
                    }
                    Err(_) => {
                        error!("failed to match media to determine preferred color scheme");
                        Theme::Light
                    }
                }
            }
            Theme::Light | Theme::Dark => self.theme,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            beep_volume: 80,
            theme: Theme::System,
            reminders: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    System,
    Light,
    Dark,
}
