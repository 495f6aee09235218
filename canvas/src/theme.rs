//! Named color palettes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Palette selector. `Minimal` is the `null` theme: white shapes on white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Forest,
    Dark,
    Neutral,
    Base,
    #[serde(rename = "null")]
    Minimal,
}

/// Color tokens a palette provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub node_fill: &'static str,
    pub node_stroke: &'static str,
    pub node_text: &'static str,
    pub edge_stroke: &'static str,
    pub background: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 6] = [Theme::Default, Theme::Forest, Theme::Dark, Theme::Neutral, Theme::Base, Theme::Minimal];

    #[must_use]
    pub fn colors(self) -> ThemeColors {
        let (node_fill, node_stroke, node_text, edge_stroke, background) = match self {
            Theme::Default => ("#E0F7FA", "#0ea5e9", "#0f172a", "#64748b", "#ffffff"),
            Theme::Forest => ("#e8f5e9", "#2e7d32", "#1b5e20", "#4caf50", "#f1f8e9"),
            Theme::Dark => ("#1f2937", "#38bdf8", "#e5e7eb", "#94a3b8", "#111827"),
            Theme::Neutral => ("#f1f5f9", "#64748b", "#0f172a", "#475569", "#f8fafc"),
            Theme::Base => ("#f5f5f5", "#4b5563", "#111827", "#6b7280", "#ffffff"),
            Theme::Minimal => ("#ffffff", "#4b5563", "#111827", "#6b7280", "#ffffff"),
        };
        ThemeColors { node_fill, node_stroke, node_text, edge_stroke, background }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Forest => "forest",
            Theme::Dark => "dark",
            Theme::Neutral => "neutral",
            Theme::Base => "base",
            Theme::Minimal => "null",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Theme::Default),
            "forest" => Ok(Theme::Forest),
            "dark" => Ok(Theme::Dark),
            "neutral" => Ok(Theme::Neutral),
            "base" => Ok(Theme::Base),
            "null" | "none" | "minimal" => Ok(Theme::Minimal),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}
