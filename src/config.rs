//! Configuration constants and loading for fontkeys
//!
//! Keyboard settings live in an INI file with a `[keyboard]` section for
//! layout parameters and a `[button]` section for per-key visual defaults.
//! Every key is optional; missing keys fall back to [`Design::default`].

use std::path::Path;

use anyhow::{bail, Context, Result};
use ini::{Ini, Properties};
use serde::{Deserialize, Serialize};

use crate::keyboard::{Design, EdgeInsets, Language};

/// Default keyboard config file path
pub const DEFAULT_CONFIG_PATH: &str = "~/.fontkeys/keyboard";

/// Environment variable name for overriding the config path
pub const CONFIG_PATH_ENV_VAR: &str = "FONTKEYS_CONFIG_PATH";

pub const KEYBOARD_SECTION: &str = "keyboard";
pub const BUTTON_SECTION: &str = "button";

/// Get the config file path, checking environment variable first, then falling back to default
pub fn get_config_path() -> String {
    std::env::var_os(CONFIG_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Everything needed to construct a keyboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardConfig {
    pub language: Language,
    pub design: Design,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            language: Language::Latin,
            design: Design::default(),
        }
    }
}

impl KeyboardConfig {
    /// Load from `path` after `~` expansion. A missing file yields the
    /// default config.
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).into_owned();
        if !Path::new(&expanded).exists() {
            tracing::debug!("Config '{}' not found, using defaults", expanded);
            return Ok(Self::default());
        }

        tracing::debug!("Loading keyboard config from '{}'", expanded);
        let ini = Ini::load_from_file(&expanded)
            .with_context(|| format!("Failed to read keyboard config '{expanded}'"))?;
        Self::from_ini(&ini).with_context(|| format!("Invalid keyboard config '{expanded}'"))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let ini = Ini::load_from_str(content).context("Failed to parse keyboard config")?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some(KEYBOARD_SECTION)) {
            let design = &mut config.design;
            if let Some(language) = section.get("language") {
                config.language = language.parse()?;
            }
            design.letter_spacing = read_length(section, "letter_spacing", design.letter_spacing)?;
            design.row_spacing = read_length(section, "row_spacing", design.row_spacing)?;
            design.key_height = read_length(section, "key_height", design.key_height)?;
            design.special_key_width =
                read_length(section, "special_key_width", design.special_key_width)?;
            design.space_key_width =
                read_length(section, "space_key_width", design.space_key_width)?;
            design.key_padding = read_length(section, "key_padding", design.key_padding)?;
            if let Some(insets) = section.get("edge_insets") {
                design.edge_insets = parse_edge_insets(insets)?;
            }
        }

        if let Some(section) = ini.section(Some(BUTTON_SECTION)) {
            let button = &mut config.design.button;
            button.corner_radius = read_length(section, "corner_radius", button.corner_radius)?;
            button.font_size = read_length(section, "font_size", button.font_size)?;
            if let Some(color) = section.get("key_color") {
                button.key_color = color.trim().to_string();
            }
            if let Some(color) = section.get("text_color") {
                button.text_color = color.trim().to_string();
            }
        }

        Ok(config)
    }
}

/// Read a non-negative length, or `default` when the key is absent
fn read_length(section: &Properties, key: &str, default: f64) -> Result<f64> {
    match section.get(key) {
        Some(value) => parse_length(value).with_context(|| format!("Invalid value for '{key}'")),
        None => Ok(default),
    }
}

fn parse_length(value: &str) -> Result<f64> {
    let length: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a number", value.trim()))?;
    if !length.is_finite() || length < 0.0 {
        bail!("'{}' must be a non-negative length", value.trim());
    }
    Ok(length)
}

/// `top,left,bottom,right`, or a single value for all four edges
pub fn parse_edge_insets(value: &str) -> Result<EdgeInsets> {
    let parts = value
        .split(',')
        .map(parse_length)
        .collect::<Result<Vec<f64>>>()
        .context("Invalid value for 'edge_insets'")?;

    match parts.as_slice() {
        [inset] => Ok(EdgeInsets::uniform(*inset)),
        [top, left, bottom, right] => Ok(EdgeInsets::new(*top, *left, *bottom, *right)),
        _ => bail!(
            "'edge_insets' expects 1 or 4 values, got {}",
            parts.len()
        ),
    }
}
