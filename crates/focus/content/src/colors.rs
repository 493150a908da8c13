//! Default domain color table.
//!
//! Loaded from the embedded RON data file. The registry consults this when
//! a node has no explicit color override.

use std::collections::HashMap;

use anyhow::{Context, bail};
use focus_core::{Color, Domain};
use strum::IntoEnumIterator;

/// The per-domain default colors.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: HashMap<Domain, Color>,
}

impl Palette {
    /// Loads the built-in table from `data/colors.ron`.
    ///
    /// Fails (at startup, where it belongs) if the file is unparsable or
    /// leaves any domain uncolored.
    pub fn embedded() -> anyhow::Result<Self> {
        let raw = include_str!("../data/colors.ron");
        let colors: HashMap<Domain, Color> =
            ron::from_str(raw).context("failed to parse colors.ron")?;
        for domain in Domain::iter() {
            if !colors.contains_key(&domain) {
                bail!("colors.ron is missing a color for domain `{domain}`");
            }
        }
        Ok(Self { colors })
    }

    /// Default color for a domain.
    pub fn color_of(&self, domain: Domain) -> Color {
        self.colors.get(&domain).copied().unwrap_or(Color::NEUTRAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_covers_every_domain() {
        let palette = Palette::embedded().unwrap();
        for domain in Domain::iter() {
            assert_ne!(palette.color_of(domain), Color::NEUTRAL, "{domain} uncolored");
        }
    }

    #[test]
    fn entropy_is_distinct_from_fire() {
        let palette = Palette::embedded().unwrap();
        assert_ne!(palette.color_of(Domain::Entropy), palette.color_of(Domain::Fire));
    }
}
