use serde::{Deserialize, Serialize};
use std::path::Path;

/// Footprints and spacing for the layout passes, in layout units (pixels for
/// the usual canvas consumers). `viewport_width` is the available width the
/// top-level entry row is centered in; callers override it instead of the
/// engine reading any display environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub person_width: f32,
    pub couple_width: f32,
    pub node_height: f32,
    pub lateral_margin: f32,
    pub vertical_step: f32,
    pub top_margin: f32,
    pub viewport_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            person_width: 180.0,
            couple_width: 360.0,
            node_height: 96.0,
            lateral_margin: 50.0,
            vertical_step: 180.0,
            top_margin: 100.0,
            viewport_width: 1200.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    person_width: Option<f32>,
    couple_width: Option<f32>,
    node_height: Option<f32>,
    lateral_margin: Option<f32>,
    vertical_step: Option<f32>,
    top_margin: Option<f32>,
    viewport_width: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    layout: Option<LayoutConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.person_width {
            config.layout.person_width = v;
        }
        if let Some(v) = layout.couple_width {
            config.layout.couple_width = v;
        }
        if let Some(v) = layout.node_height {
            config.layout.node_height = v;
        }
        if let Some(v) = layout.lateral_margin {
            config.layout.lateral_margin = v;
        }
        if let Some(v) = layout.vertical_step {
            config.layout.vertical_step = v;
        }
        if let Some(v) = layout.top_margin {
            config.layout.top_margin = v;
        }
        if let Some(v) = layout.viewport_width {
            config.layout.viewport_width = v;
        }
    }

    Ok(config)
}
