use std::path::PathBuf;

use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Alignment, Element, Length};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::media::{ACCENT_ORANGE, ACCENT_PINK, BACKGROUND_NAVY, TEXT_GRAY, TEXT_WHITE};

pub const API_KEY_ENV: &str = "TMDB_API_KEY";
const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine the config directory")]
    NoConfigDir,
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config format error: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub api_key: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    String::from(DEFAULT_LANGUAGE)
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_language(),
        }
    }
}

impl AppSettings {
    pub fn config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("cinescope")
                .join("config.json")
        })
    }

    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoConfigDir)?;
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Stored settings with the environment key applied on top. A missing or
    /// unreadable file falls back to defaults.
    pub fn resolve() -> Self {
        let stored = match Self::load() {
            Ok(settings) => settings,
            Err(SettingsError::Io(error)) if error.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(error) => {
                warn!(%error, "ignoring stored settings");
                Self::default()
            }
        };
        stored.with_env_key(std::env::var(API_KEY_ENV).ok())
    }

    pub fn with_env_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            info!("using API key from {API_KEY_ENV}");
            self.api_key = key.trim().to_string();
        }
        self
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum SetupMessage {
    ApiKeyChanged(String),
    LanguageChanged(String),
    Submit,
}

pub struct SetupPage {
    pub api_key: String,
    pub language: String,
    pub error: Option<String>,
}

impl Default for SetupPage {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_language(),
            error: None,
        }
    }
}

impl SetupPage {
    /// Validates the form. Returns the settings to persist once it is complete.
    pub fn submit(&mut self) -> Option<AppSettings> {
        if self.api_key.trim().is_empty() {
            self.error = Some(String::from("API key is required"));
            return None;
        }
        let language = match self.language.trim() {
            "" => default_language(),
            lang => lang.to_string(),
        };
        Some(AppSettings {
            api_key: self.api_key.trim().to_string(),
            language,
        })
    }

    pub fn update(&mut self, message: SetupMessage) -> Option<AppSettings> {
        match message {
            SetupMessage::ApiKeyChanged(key) => {
                self.api_key = key;
                self.error = None;
                None
            }
            SetupMessage::LanguageChanged(lang) => {
                self.language = lang;
                None
            }
            SetupMessage::Submit => {
                let settings = self.submit()?;
                if let Err(e) = settings.save() {
                    warn!(error = %e, "failed to save settings");
                    self.error = Some(format!("Failed to save: {}", e));
                    return None;
                }
                Some(settings)
            }
        }
    }

    pub fn view(&self) -> Element<'_, SetupMessage> {
        let logo = text("CINESCOPE").size(44).color(ACCENT_PINK).font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        });

        let title = text("Welcome to Cinescope").size(28).color(TEXT_WHITE);
        let subtitle = text("Add your TMDB API key to start browsing")
            .size(14)
            .color(TEXT_GRAY);

        let api_label = text("TMDB API Key").size(14).color(TEXT_WHITE);
        let api_hint = text(format!(
            "Get a free key at themoviedb.org/settings/api, or set {API_KEY_ENV}"
        ))
        .size(12)
        .color(TEXT_GRAY);
        let api_input = text_input("Enter your TMDB API key...", &self.api_key)
            .on_input(SetupMessage::ApiKeyChanged)
            .on_submit(SetupMessage::Submit)
            .padding(12)
            .size(14)
            .width(Length::Fill);

        let lang_label = text("Language").size(14).color(TEXT_WHITE);
        let lang_hint = text("Examples: en-US, de-DE, fr-FR, es-ES")
            .size(12)
            .color(TEXT_GRAY);
        let lang_input = text_input(DEFAULT_LANGUAGE, &self.language)
            .on_input(SetupMessage::LanguageChanged)
            .on_submit(SetupMessage::Submit)
            .padding(12)
            .size(14)
            .width(Length::Fill);

        let submit_button = button(text("Get Started").size(16).color(TEXT_WHITE))
            .padding([12, 32])
            .style(|_theme, status| {
                let bg = match status {
                    button::Status::Hovered => ACCENT_ORANGE,
                    _ => ACCENT_PINK,
                };
                button::Style {
                    background: Some(iced::Background::Color(bg)),
                    text_color: TEXT_WHITE,
                    border: iced::Border::default().rounded(20),
                    ..Default::default()
                }
            })
            .on_press(SetupMessage::Submit);

        let error_text = match self.error {
            Some(ref err) => text(err).size(14).color(ACCENT_PINK),
            None => text("").size(14),
        };

        let spacer = || Space::new().height(16);
        let small_spacer = || Space::new().height(4);

        let form = column![
            logo,
            spacer(),
            title,
            small_spacer(),
            subtitle,
            spacer(),
            spacer(),
            api_label,
            small_spacer(),
            api_hint,
            small_spacer(),
            api_input,
            spacer(),
            lang_label,
            small_spacer(),
            lang_hint,
            small_spacer(),
            lang_input,
            spacer(),
            error_text,
            small_spacer(),
            row![submit_button].width(Length::Fill),
        ]
        .width(Length::Fixed(420.0))
        .align_x(Alignment::Start);

        container(form)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_NAVY)),
                ..Default::default()
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_key_overrides_stored_key() {
        let stored = AppSettings {
            api_key: String::from("stored"),
            language: String::from("de-DE"),
        };
        let resolved = stored.clone().with_env_key(Some(String::from(" fromenv ")));
        assert_eq!(resolved.api_key, "fromenv");
        assert_eq!(resolved.language, "de-DE");

        let untouched = stored.clone().with_env_key(Some(String::from("  ")));
        assert_eq!(untouched, stored);
    }

    #[test]
    fn language_defaults_when_missing_from_file() {
        let settings: AppSettings = serde_json::from_str(r#"{"api_key": "abc"}"#).unwrap();
        assert_eq!(settings.language, "en-US");
        assert!(settings.is_valid());
    }

    #[test]
    fn submit_requires_a_key_and_fills_language() {
        let mut page = SetupPage::default();
        assert!(page.submit().is_none());
        assert_eq!(page.error.as_deref(), Some("API key is required"));

        page.api_key = String::from(" key ");
        page.language = String::new();
        let settings = page.submit().unwrap();
        assert_eq!(settings.api_key, "key");
        assert_eq!(settings.language, "en-US");
    }
}
