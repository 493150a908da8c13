//! Per-node adjustable parameters.
//!
//! A setting is an integer counter plus a mapping to the value the player
//! actually sees. Mutation happens only through increment/decrement (which
//! re-clamp) or by scanning for a target display value, so a setting can
//! never leave its domain.

/// How a setting's raw counter maps to its display value.
#[derive(Clone, Debug, PartialEq)]
pub enum SettingKind {
    /// Fixed list of allowed values; `raw` indexes into it.
    Choice {
        values: Vec<i32>,
        labels: Vec<String>,
    },
    /// Clamped integer range; `raw` is itself the value.
    Range { min: i32, max: i32 },
}

/// One adjustable parameter on a node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSetting {
    raw: i32,
    kind: SettingKind,
}

impl NodeSetting {
    /// Discrete-choice setting. `labels` must parallel `values`; missing
    /// labels fall back to the value's own string.
    pub fn choice(values: Vec<i32>, labels: Vec<String>, default_index: usize) -> Self {
        let mut setting = Self {
            raw: default_index as i32,
            kind: SettingKind::Choice { values, labels },
        };
        setting.clamp();
        setting
    }

    /// Clamped numeric range setting.
    pub fn range(min: i32, max: i32, default: i32) -> Self {
        let mut setting = Self { raw: default, kind: SettingKind::Range { min, max } };
        setting.clamp();
        setting
    }

    pub fn kind(&self) -> &SettingKind {
        &self.kind
    }

    /// Internal counter. UI code should use [`display_value`](Self::display_value).
    pub fn raw_value(&self) -> i32 {
        self.raw
    }

    /// The value the player sees and behaviors consume.
    pub fn display_value(&self) -> i32 {
        match &self.kind {
            SettingKind::Choice { values, .. } => {
                if values.is_empty() {
                    0
                } else {
                    values[self.raw.clamp(0, values.len() as i32 - 1) as usize]
                }
            }
            SettingKind::Range { min, max } => self.raw.clamp(*min, *max),
        }
    }

    /// Label for the current choice, if this is a choice setting with one.
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            SettingKind::Choice { labels, .. } => {
                labels.get(self.raw.max(0) as usize).map(String::as_str)
            }
            SettingKind::Range { .. } => None,
        }
    }

    pub fn increment(&mut self) {
        self.raw += 1;
        self.clamp();
    }

    pub fn decrement(&mut self) {
        self.raw -= 1;
        self.clamp();
    }

    /// Scans upward from the lower bound for `target` as a display value.
    ///
    /// O(n) in the setting's domain size. Returns false (leaving the
    /// setting at its lower bound's nearest stuck point) if the value is
    /// not reachable.
    pub fn set_display_value(&mut self, target: i32) -> bool {
        self.raw = match &self.kind {
            SettingKind::Choice { .. } => 0,
            SettingKind::Range { min, .. } => *min,
        };
        self.clamp();
        loop {
            if self.display_value() == target {
                return true;
            }
            let before = self.raw;
            self.increment();
            if self.raw == before {
                return false;
            }
        }
    }

    fn clamp(&mut self) {
        self.raw = match &self.kind {
            SettingKind::Choice { values, .. } => {
                self.raw.clamp(0, (values.len() as i32 - 1).max(0))
            }
            SettingKind::Range { min, max } => self.raw.clamp(*min, *max),
        };
    }
}

/// Named settings on one node, insertion order preserved for UI listing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings {
    entries: Vec<(String, NodeSetting)>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a setting. Replacement keeps the original slot
    /// so UI ordering stays stable.
    pub fn insert(&mut self, name: impl Into<String>, setting: NodeSetting) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = setting,
            None => self.entries.push((name, setting)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&NodeSetting> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut NodeSetting> {
        self.entries.iter_mut().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Display value shortcut with a fallback for absent settings.
    pub fn value_or(&self, name: &str, fallback: i32) -> i32 {
        self.get(name).map_or(fallback, NodeSetting::display_value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeSetting)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_increment_clamps_at_upper_bound() {
        let mut setting = NodeSetting::range(1, 4, 2);
        for _ in 0..10 {
            setting.increment();
        }
        assert_eq!(setting.display_value(), 4);
    }

    #[test]
    fn range_decrement_clamps_at_lower_bound() {
        let mut setting = NodeSetting::range(1, 4, 2);
        for _ in 0..10 {
            setting.decrement();
        }
        assert_eq!(setting.display_value(), 1);
    }

    #[test]
    fn choice_indexes_value_list() {
        let mut setting = NodeSetting::choice(
            vec![10, 25, 50],
            vec!["low".into(), "mid".into(), "high".into()],
            1,
        );
        assert_eq!(setting.display_value(), 25);
        assert_eq!(setting.label(), Some("mid"));
        setting.increment();
        setting.increment();
        assert_eq!(setting.display_value(), 50);
    }

    #[test]
    fn set_display_value_scans_until_found() {
        let mut setting = NodeSetting::range(0, 20, 0);
        assert!(setting.set_display_value(13));
        assert_eq!(setting.display_value(), 13);
    }

    #[test]
    fn set_display_value_reports_unreachable() {
        let mut setting = NodeSetting::choice(vec![2, 4, 8], vec![], 0);
        assert!(!setting.set_display_value(5));
        assert!(setting.set_display_value(8));
        assert_eq!(setting.display_value(), 8);
    }

    #[test]
    fn settings_preserve_insertion_order() {
        let mut settings = Settings::new();
        settings.insert("count", NodeSetting::range(2, 6, 3));
        settings.insert("angle", NodeSetting::range(5, 45, 15));
        settings.insert("count", NodeSetting::range(2, 6, 4));
        let names: Vec<_> = settings.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["count", "angle"]);
        assert_eq!(settings.value_or("count", 0), 4);
    }
}
