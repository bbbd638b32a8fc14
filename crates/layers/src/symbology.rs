use std::fmt;

use records::Category;
use serde::{Serialize, Serializer};

/// Opaque color, rendered as `#rrggbb`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    /// Builds a color from floating channels, rounding and saturating each.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self::new(channel(r), channel(g), channel(b))
    }
}

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Translucent stroke color, rendered as `rgba(r, g, b, a)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            rgb: Rgb::new(r, g, b),
            alpha,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.rgb;
        write!(f, "rgba({r}, {g}, {b}, {})", self.alpha)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Rgb,
}

const fn entry(label: &'static str, rgb: u32) -> LegendEntry {
    LegendEntry {
        label,
        color: Rgb::hex(rgb),
    }
}

/// Everything category-dependent about how records are drawn. The legend is
/// ordered by bucket index, so `legend[bucket]` is a record's color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStyle {
    pub category: Category,
    pub title: &'static str,
    pub legend: &'static [LegendEntry],
    /// Swatch next to the legend title.
    pub default_color: Rgb,
    pub connection: Rgba,
}

const TEMPERATURE_LEGEND: [LegendEntry; 5] = [
    entry("Very Cold", 0x3b82f6),
    entry("Cold", 0x06b6d4),
    entry("Mild", 0x10b981),
    entry("Warm", 0xf59e0b),
    entry("Hot", 0xef4444),
];

const DISASTER_LEGEND: [LegendEntry; 3] = [
    entry("Low", 0xfbbf24),
    entry("Medium", 0xf59e0b),
    entry("High", 0xdc2626),
];

const ENVIRONMENTAL_LEGEND: [LegendEntry; 5] = [
    entry("Good", 0x10b981),
    entry("Moderate", 0xf59e0b),
    entry("Unhealthy for Sensitive Groups", 0xf97316),
    entry("Unhealthy", 0xef4444),
    entry("Hazardous", 0x7c2d12),
];

static STYLES: [CategoryStyle; 3] = [
    CategoryStyle {
        category: Category::Temperature,
        title: "Temperature",
        legend: &TEMPERATURE_LEGEND,
        default_color: Rgb::hex(0xef4444),
        connection: Rgba::new(99, 102, 241, 0.6),
    },
    CategoryStyle {
        category: Category::Disasters,
        title: "Disasters",
        legend: &DISASTER_LEGEND,
        default_color: Rgb::hex(0xf59e0b),
        connection: Rgba::new(239, 68, 68, 0.7),
    },
    CategoryStyle {
        category: Category::Environmental,
        title: "Environmental",
        legend: &ENVIRONMENTAL_LEGEND,
        default_color: Rgb::hex(0x10b981),
        connection: Rgba::new(34, 197, 94, 0.6),
    },
];

pub fn style(category: Category) -> &'static CategoryStyle {
    match category {
        Category::Temperature => &STYLES[0],
        Category::Disasters => &STYLES[1],
        Category::Environmental => &STYLES[2],
    }
}
