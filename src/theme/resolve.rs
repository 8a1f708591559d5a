//! Partial-spec resolution.
//!
//! Fills every slot of a partial [`ThemeSpec`] deterministically: declared
//! slots pass through canonicalized, omitted base/status slots take the
//! default palette, and omitted derived slots are tinted from their paired
//! base value. The output is a full 14-slot mapping of canonical `"r,g,b"`
//! strings.

use crate::color::{BASE2_WEIGHT, BASE3_WEIGHT, CONTENT_WEIGHT, Rgba};

use super::spec::{DEFAULT_PALETTE, Slot, ThemeSpec};

/// A fully resolved theme: every slot populated with a canonical `"r,g,b"`
/// value, in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTheme {
    values: [String; 14],
}

impl ResolvedTheme {
    pub fn value(&self, slot: Slot) -> &str {
        &self.values[slot as usize]
    }

    /// Iterate `(slot, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> {
        Slot::ALL
            .iter()
            .map(|slot| (*slot, self.value(*slot)))
    }
}

/// Resolve a partial spec into all 14 slots.
///
/// Derivation seeds use the preset's own base/status value when declared
/// and the default palette's otherwise, so a theme that authors only
/// `base1` and `primary` still gets coherent `base2`/`base3` steps and
/// readable `*Content` foregrounds.
pub fn resolve(spec: &ThemeSpec) -> ResolvedTheme {
    let base1 = seed(spec, Slot::Base1, DEFAULT_PALETTE.base1);
    let primary = seed(spec, Slot::Primary, DEFAULT_PALETTE.primary);
    let info = seed(spec, Slot::Info, DEFAULT_PALETTE.info);
    let success = seed(spec, Slot::Success, DEFAULT_PALETTE.success);
    let warning = seed(spec, Slot::Warning, DEFAULT_PALETTE.warning);
    let error = seed(spec, Slot::Error, DEFAULT_PALETTE.error);

    let derived = |slot: Slot| -> Rgba {
        match slot {
            Slot::Base1 => Rgba::parse_or_default(DEFAULT_PALETTE.base1),
            Slot::Base2 => base1.tint(BASE2_WEIGHT),
            Slot::Base3 => base1.tint(BASE3_WEIGHT),
            Slot::BaseContent => base1.tint(CONTENT_WEIGHT),
            Slot::Primary => Rgba::parse_or_default(DEFAULT_PALETTE.primary),
            Slot::PrimaryContent => primary.tint(CONTENT_WEIGHT),
            Slot::Info => Rgba::parse_or_default(DEFAULT_PALETTE.info),
            Slot::InfoContent => info.tint(CONTENT_WEIGHT),
            Slot::Success => Rgba::parse_or_default(DEFAULT_PALETTE.success),
            Slot::SuccessContent => success.tint(CONTENT_WEIGHT),
            Slot::Warning => Rgba::parse_or_default(DEFAULT_PALETTE.warning),
            Slot::WarningContent => warning.tint(CONTENT_WEIGHT),
            Slot::Error => Rgba::parse_or_default(DEFAULT_PALETTE.error),
            Slot::ErrorContent => error.tint(CONTENT_WEIGHT),
        }
    };

    let values = Slot::ALL.map(|slot| match spec.get(slot) {
        Some(declared) => Rgba::parse_or_default(declared).css_triple(),
        None => derived(slot).css_triple(),
    });

    ResolvedTheme { values }
}

/// The tint seed for a slot: the declared value when present, otherwise
/// the default palette's.
fn seed(spec: &ThemeSpec, slot: Slot, default: &str) -> Rgba {
    Rgba::parse_or_default(spec.get(slot).unwrap_or(default))
}
