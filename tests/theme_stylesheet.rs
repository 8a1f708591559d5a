use memeboard::color::{CONTENT_WEIGHT, Rgba};
use memeboard::theme::{
    self, Slot, ThemeFile, ThemeSpec, compile, preset_registry, resolve, write_stylesheet,
};
use tempfile::TempDir;

/// Compiling the same registry twice yields byte-identical text.
#[test]
fn compilation_is_byte_identical_across_runs() {
    let registry = preset_registry();
    let first = compile(&registry);
    let second = compile(&preset_registry());
    assert_eq!(first, second);
}

/// Every theme resolves all 14 slots to valid channel triples.
#[test]
fn resolved_registry_is_complete() {
    for (name, spec) in preset_registry() {
        let resolved = resolve(&spec);
        for (slot, value) in resolved.iter() {
            let channels: Vec<u8> = value
                .split(',')
                .map(|part| part.parse().unwrap_or_else(|_| panic!("{name}/{}: {value}", slot.key())))
                .collect();
            assert_eq!(channels.len(), 3);
        }
    }
}

/// The generated artifact matches the documented external format.
#[test]
fn stylesheet_matches_wire_format() {
    let css = compile(&preset_registry());
    let lines: Vec<&str> = css.lines().collect();
    assert_eq!(lines.len(), 4);

    let light = lines[0];
    assert!(light.starts_with(":root[data-theme=light] {--b1: 255,255,255;--b2: 237,237,237;"));
    assert!(lines[1].starts_with(":root[data-theme=dark] {--b1: 29,35,42;"));

    // Values are bare triples, never rgb()-wrapped, never carrying alpha.
    assert!(!css.contains("rgb("));
    for line in &lines {
        assert!(line.ends_with('}'));
        assert_eq!(line.matches(": ").count(), 14);
    }
}

/// The "dark" preset scenario: declared slots pass through canonicalized,
/// omitted status slots come from the default palette, content slots tint
/// from their matching seed.
#[test]
fn dark_theme_scenario() {
    let spec = theme::preset("dark").expect("dark preset");
    let resolved = resolve(&spec);

    assert_eq!(resolved.value(Slot::Base1), "29,35,42");
    assert_eq!(resolved.value(Slot::BaseContent), "166,173,187");
    assert_eq!(resolved.value(Slot::Primary), "74,157,156");

    for (slot, expected) in [
        (Slot::Info, "#00B5FF"),
        (Slot::Success, "#00A96E"),
        (Slot::Warning, "#FFBE00"),
        (Slot::Error, "#FF5861"),
    ] {
        assert_eq!(
            resolved.value(slot),
            Rgba::parse_or_default(expected).css_triple()
        );
    }

    assert_eq!(
        resolved.value(Slot::InfoContent),
        Rgba::parse_or_default("#00B5FF").tint(CONTENT_WEIGHT).css_triple()
    );
    assert_eq!(resolved.value(Slot::Base2), "45,50,57");
    assert_eq!(resolved.value(Slot::Base3), "61,66,72");
}

/// Status colors omitted from a white-base preset fall back to the default
/// palette, and content tones derive from those defaults.
#[test]
fn default_fallback_scenario() {
    let spec = ThemeSpec {
        base1: Some("#FFFFFF".into()),
        ..ThemeSpec::default()
    };
    let resolved = resolve(&spec);
    assert_eq!(resolved.value(Slot::Primary), "0,102,255");
    assert_eq!(
        resolved.value(Slot::PrimaryContent),
        Rgba::parse_or_default("#0066FF").tint(CONTENT_WEIGHT).css_triple()
    );
}

#[test]
fn empty_registry_compiles_to_empty_text() {
    assert_eq!(compile(&Vec::new()), "");
}

/// User themes from a TOML file compile after the built-ins so their
/// rulesets win the cascade.
#[test]
fn user_themes_append_after_builtins() {
    let toml = r##"
version = 1

[themes.solarized]
base1 = "#fdf6e3"
primary = "#268bd2"
"##;
    let mut registry = preset_registry();
    registry.extend(ThemeFile::from_toml_str(toml).unwrap().into_entries());

    let css = compile(&registry);
    let lines: Vec<&str> = css.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[4].starts_with(":root[data-theme=solarized] {--b1: 253,246,227;"));
}

/// The artifact write is a single whole-file write that can be re-run.
#[test]
fn artifact_write_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("styles").join("themes.css");
    let css = compile(&preset_registry());

    write_stylesheet(&path, &css).unwrap();
    write_stylesheet(&path, &css).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), css);
}
