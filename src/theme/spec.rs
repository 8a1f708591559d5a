//! Theme color specs, the default palette, and the built-in preset registry.
//!
//! A theme is authored as a *partial* spec: only `base1` carries real
//! weight, status colors are optional, and every tonal/foreground slot can
//! be omitted and derived. The registry is defined once at startup and
//! immutable afterwards; selecting a theme is a pure lookup.

use serde::{Deserialize, Serialize};

/// The 14 semantic color slots of a theme, in fixed declaration order.
/// This order is also the property order of every generated ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Base1,
    Base2,
    Base3,
    BaseContent,
    Primary,
    PrimaryContent,
    Info,
    InfoContent,
    Success,
    SuccessContent,
    Warning,
    WarningContent,
    Error,
    ErrorContent,
}

impl Slot {
    pub const ALL: [Slot; 14] = [
        Slot::Base1,
        Slot::Base2,
        Slot::Base3,
        Slot::BaseContent,
        Slot::Primary,
        Slot::PrimaryContent,
        Slot::Info,
        Slot::InfoContent,
        Slot::Success,
        Slot::SuccessContent,
        Slot::Warning,
        Slot::WarningContent,
        Slot::Error,
        Slot::ErrorContent,
    ];

    /// The slot's spec key, as presets spell it.
    pub const fn key(self) -> &'static str {
        match self {
            Slot::Base1 => "base1",
            Slot::Base2 => "base2",
            Slot::Base3 => "base3",
            Slot::BaseContent => "baseContent",
            Slot::Primary => "primary",
            Slot::PrimaryContent => "primaryContent",
            Slot::Info => "info",
            Slot::InfoContent => "infoContent",
            Slot::Success => "success",
            Slot::SuccessContent => "successContent",
            Slot::Warning => "warning",
            Slot::WarningContent => "warningContent",
            Slot::Error => "error",
            Slot::ErrorContent => "errorContent",
        }
    }

    /// The CSS custom-property name this slot compiles to. The mapping is
    /// bijective: no two slots share a name.
    pub const fn css_var(self) -> &'static str {
        match self {
            Slot::Base1 => "--b1",
            Slot::Base2 => "--b2",
            Slot::Base3 => "--b3",
            Slot::BaseContent => "--bc",
            Slot::Primary => "--p",
            Slot::PrimaryContent => "--pc",
            Slot::Info => "--i",
            Slot::InfoContent => "--ic",
            Slot::Success => "--s",
            Slot::SuccessContent => "--sc",
            Slot::Warning => "--w",
            Slot::WarningContent => "--wc",
            Slot::Error => "--e",
            Slot::ErrorContent => "--ec",
        }
    }
}

/// A partial theme spec: any slot may be omitted. Omitted base/status
/// slots fall back to [`DEFAULT_PALETTE`]; omitted derived slots are
/// computed by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_content: Option<String>,
}

impl ThemeSpec {
    /// The declared value for a slot, if any.
    pub fn get(&self, slot: Slot) -> Option<&str> {
        let value = match slot {
            Slot::Base1 => &self.base1,
            Slot::Base2 => &self.base2,
            Slot::Base3 => &self.base3,
            Slot::BaseContent => &self.base_content,
            Slot::Primary => &self.primary,
            Slot::PrimaryContent => &self.primary_content,
            Slot::Info => &self.info,
            Slot::InfoContent => &self.info_content,
            Slot::Success => &self.success,
            Slot::SuccessContent => &self.success_content,
            Slot::Warning => &self.warning,
            Slot::WarningContent => &self.warning_content,
            Slot::Error => &self.error,
            Slot::ErrorContent => &self.error_content,
        };
        value.as_deref()
    }

    /// Iterate the declared `(slot, value)` pairs in slot order.
    pub fn declared(&self) -> impl Iterator<Item = (Slot, &str)> {
        Slot::ALL
            .iter()
            .filter_map(|slot| self.get(*slot).map(|value| (*slot, value)))
    }
}

/// Baseline values used whenever a preset omits a base or status slot,
/// both as the literal output value and as the interpolation seed for that
/// slot's derived `*Content` variant.
#[derive(Debug, Clone, Copy)]
pub struct DefaultPalette {
    pub base1: &'static str,
    pub primary: &'static str,
    pub info: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
}

impl DefaultPalette {
    /// The fallback for a base/status slot, `None` for derived slots.
    pub const fn value(&self, slot: Slot) -> Option<&'static str> {
        match slot {
            Slot::Base1 => Some(self.base1),
            Slot::Primary => Some(self.primary),
            Slot::Info => Some(self.info),
            Slot::Success => Some(self.success),
            Slot::Warning => Some(self.warning),
            Slot::Error => Some(self.error),
            _ => None,
        }
    }
}

pub const DEFAULT_PALETTE: DefaultPalette = DefaultPalette {
    base1: "#FFFFFF",
    primary: "#0066FF",
    info: "#00B5FF",
    success: "#00A96E",
    warning: "#FFBE00",
    error: "#FF5861",
};

/// An ordered theme registry: `(name, partial spec)` entries. Compilation
/// iterates in declared order.
pub type PresetRegistry = Vec<(String, ThemeSpec)>;

/// The built-in presets, in stylesheet order.
pub fn preset_registry() -> PresetRegistry {
    vec![
        (
            "light".to_string(),
            ThemeSpec {
                base1: Some("#FFFFFF".into()),
                base_content: Some("#1F2937".into()),
                primary: Some("#0066FF".into()),
                info: Some("#00B5FF".into()),
                success: Some("#00A96E".into()),
                warning: Some("#FFBE00".into()),
                error: Some("#FF5861".into()),
                ..ThemeSpec::default()
            },
        ),
        (
            "dark".to_string(),
            ThemeSpec {
                base1: Some("#1d232a".into()),
                base_content: Some("#A6ADBB".into()),
                primary: Some("#4a9d9c".into()),
                ..ThemeSpec::default()
            },
        ),
        (
            "business".to_string(),
            ThemeSpec {
                base1: Some("#202020".into()),
                base_content: Some("#CDCDCD".into()),
                primary: Some("#FF9900".into()),
                info: Some("#0091D5".into()),
                success: Some("#6BB187".into()),
                warning: Some("#DBAE59".into()),
                error: Some("#AC3E31".into()),
                ..ThemeSpec::default()
            },
        ),
        (
            "dracula".to_string(),
            ThemeSpec {
                base1: Some("#282a36".into()),
                base_content: Some("#f8f8f2".into()),
                primary: Some("#ff79c6".into()),
                info: Some("#8be9fd".into()),
                success: Some("#50fa7b".into()),
                warning: Some("#f1fa8c".into()),
                error: Some("#ff5555".into()),
                ..ThemeSpec::default()
            },
        ),
    ]
}

/// Names of the built-in presets, in registry order.
pub fn available_themes() -> Vec<String> {
    preset_registry().into_iter().map(|(name, _)| name).collect()
}

/// Look up a built-in preset by name.
pub fn preset(name: &str) -> Option<ThemeSpec> {
    preset_registry()
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, spec)| spec)
}

/// Raw color lookup for one slot of a named theme, falling back to the
/// default palette when the preset omits it. Derived slots that the preset
/// does not declare have no raw value.
pub fn theme_color(theme: &str, slot: Slot) -> Option<String> {
    let spec = preset(theme)?;
    spec.get(slot)
        .map(str::to_string)
        .or_else(|| DEFAULT_PALETTE.value(slot).map(str::to_string))
}

/// Raw color lookup for several slots at once.
pub fn theme_colors(theme: &str, slots: &[Slot]) -> Vec<Option<String>> {
    slots.iter().map(|slot| theme_color(theme, *slot)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn variable_mapping_is_bijective() {
        let names: HashSet<&str> = Slot::ALL.iter().map(|slot| slot.css_var()).collect();
        assert_eq!(names.len(), Slot::ALL.len());
    }

    #[test]
    fn slot_keys_are_distinct() {
        let keys: HashSet<&str> = Slot::ALL.iter().map(|slot| slot.key()).collect();
        assert_eq!(keys.len(), Slot::ALL.len());
    }

    #[test]
    fn registry_order_is_stable() {
        let names = available_themes();
        assert_eq!(names, vec!["light", "dark", "business", "dracula"]);
    }

    #[test]
    fn preset_lookup_and_default_fallback() {
        let dark = preset("dark").expect("dark preset");
        assert_eq!(dark.get(Slot::Base1), Some("#1d232a"));
        assert_eq!(dark.get(Slot::Info), None);

        // Omitted status slots resolve to the default palette.
        assert_eq!(theme_color("dark", Slot::Info).as_deref(), Some("#00B5FF"));
        assert_eq!(theme_color("dark", Slot::Primary).as_deref(), Some("#4a9d9c"));
        // Derived slots have no raw value unless declared.
        assert_eq!(theme_color("dark", Slot::Base2), None);
        assert_eq!(theme_color("nope", Slot::Base1), None);
    }

    #[test]
    fn theme_spec_roundtrips_through_camel_case_json() {
        let spec = preset("dark").unwrap();
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"baseContent\""));
        assert!(!json.contains("\"info\""), "omitted slots are skipped");
        let back: ThemeSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn declared_iterates_in_slot_order() {
        let dark = preset("dark").unwrap();
        let slots: Vec<Slot> = dark.declared().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![Slot::Base1, Slot::BaseContent, Slot::Primary]);
    }
}
