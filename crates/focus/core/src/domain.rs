//! Elemental domain tags and display colors.
//!
//! Domains are rendering/metadata only: the engine never branches on them.
//! The default per-domain color table is content data (see the content
//! crate); this module only defines the closed set of domains and the color
//! value type.

/// Elemental association of a node, used for color and UI grouping.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Domain {
    Fire,
    Water,
    Earth,
    Air,
    Order,
    Entropy,
    Light,
    Shadow,
    Life,
    Death,
    Metal,
    Crystal,
    Storm,
    Frost,
    Nature,
    Arcane,
    Blood,
    Void,
}

/// Opaque RGB display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Fallback for nodes with no explicit color and no domain.
    pub const NEUTRAL: Self = Self::rgb(0xb0, 0xb0, 0xb0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
