//! Configuration for the `twothree` command with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/twothree/twothree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `TWOTHREE_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How the command prints a tree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Box-drawing tree, one node per line
    #[default]
    Tree,
    /// One line per level
    Levels,
    /// Flat breadth-first value list
    Bfs,
}

/// How command-line values are interpreted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    Int,
    Str,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RenderSettings {
    /// Append `h=<height>` to every node
    pub show_height: bool,
    pub style: RenderStyle,
}

/// Unified configuration for twothree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub value_kind: ValueKind,
    pub render: RenderSettings,
}

/// Get the XDG config directory for twothree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "twothree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("twothree.toml"))
}

fn style_name(style: RenderStyle) -> &'static str {
    match style {
        RenderStyle::Tree => "tree",
        RenderStyle::Levels => "levels",
        RenderStyle::Bfs => "bfs",
    }
}

fn kind_name(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Int => "int",
        ValueKind::Str => "str",
    }
}

impl Settings {
    /// Load settings from all layers.
    ///
    /// `explicit` must exist when given; the global file is optional.
    #[instrument(level = "debug")]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("render.show_height", defaults.render.show_height)?
            .set_default("render.style", style_name(defaults.render.style))?
            .set_default("value_kind", kind_name(defaults.value_kind))?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = explicit {
            debug!("explicit config: {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("TWOTHREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Commented template for a new config file.
    pub fn template() -> String {
        r#"# twothree configuration
# Location: ~/.config/twothree/twothree.toml (or pass --config <file>)
# Every key can be overridden with TWOTHREE_* environment variables,
# e.g. TWOTHREE_RENDER__STYLE=levels

# How command-line values are parsed: "int" or "str"
# value_kind = "int"

[render]
# Output style: "tree", "levels" or "bfs"
# style = "tree"

# Append h=<height> to every node
# show_height = false
"#
        .to_string()
    }
}
