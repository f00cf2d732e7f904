//! Built-in size presets, palettes and watermark glyphs.

use serde::{Deserialize, Serialize};

use crate::render::{Palette, RenderSpecError, Rgb};

pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 630;
pub const DEFAULT_TARGET_KB: f64 = 500.0;
pub const DEFAULT_QUALITY_PERCENT: u8 = 90;
pub const DEFAULT_COMPLEXITY: u8 = 3;
pub const DEFAULT_GLYPH_DENSITY: u8 = 3;

/// Which side of a preset goes in the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Longer side horizontal.
    #[default]
    Landscape,
    /// Longer side vertical.
    Portrait,
}

impl Orientation {
    /// Arrange two side lengths for this orientation.
    pub fn arrange(self, a: u32, b: u32) -> (u32, u32) {
        let (short, long) = (a.min(b), a.max(b));
        match self {
            Orientation::Landscape => (long, short),
            Orientation::Portrait => (short, long),
        }
    }

    /// Switch to `target`, swapping the current dimensions when the
    /// orientation actually changes.
    pub fn toggle(self, target: Orientation, width: u32, height: u32) -> (u32, u32) {
        if self == target {
            (width, height)
        } else {
            (height, width)
        }
    }
}

/// A named output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

impl Preset {
    /// Dimensions for the given orientation.
    pub fn dimensions(&self, orientation: Orientation) -> (u32, u32) {
        orientation.arrange(self.width, self.height)
    }
}

pub const PRESETS: &[Preset] = &[
    Preset { id: "custom", name: "Custom", width: 1200, height: 630 },
    Preset { id: "hd", name: "HD (16:9)", width: 1920, height: 1080 },
    Preset { id: "fb", name: "FB Link (1.91:1)", width: 1200, height: 630 },
    Preset { id: "ig", name: "IG Story (9:16)", width: 1080, height: 1920 },
    Preset { id: "square", name: "Square (1:1)", width: 1080, height: 1080 },
    Preset { id: "banner", name: "Twitch/Twitter Banner", width: 1500, height: 500 },
];

/// Look up a preset by id.
pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// A named three-colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedPalette {
    pub name: &'static str,
    pub colors: [&'static str; 3],
}

impl NamedPalette {
    pub fn palette(&self) -> Result<Palette, RenderSpecError> {
        Palette::from_hex(&self.colors)
    }
}

pub const PALETTES: &[NamedPalette] = &[
    NamedPalette { name: "Cyberpunk", colors: ["#0b1220", "#0ea5e9", "#a855f7"] },
    NamedPalette { name: "Ocean", colors: ["#0f172a", "#38bdf8", "#22c55e"] },
    NamedPalette { name: "Sunset", colors: ["#1e1b4b", "#f97316", "#fbbf24"] },
    NamedPalette { name: "Midnight", colors: ["#020617", "#1e293b", "#6366f1"] },
    NamedPalette { name: "Emerald", colors: ["#064e3b", "#10b981", "#a7f3d0"] },
    NamedPalette { name: "Rose", colors: ["#4c0519", "#e11d48", "#fda4af"] },
];

/// Look up a palette by name, ignoring case.
pub fn find_palette(name: &str) -> Option<&'static NamedPalette> {
    PALETTES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// The default palette (Cyberpunk).
pub fn default_palette() -> Palette {
    Palette::from([
        Rgb::new(0x0b, 0x12, 0x20),
        Rgb::new(0x0e, 0xa5, 0xe9),
        Rgb::new(0xa8, 0x55, 0xf7),
    ])
}

/// Glyphs offered for watermark mode.
pub const GLYPHS: &[&str] = &[
    "🚀", "🔥", "⚡", "💎", "🌈", "🎨", "💻", "📱", "🎮", "❤️", "🌟", "🦄", "🐱", "🍕", "☕", "🌍",
];
