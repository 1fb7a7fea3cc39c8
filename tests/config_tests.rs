//! Settings file → context tests for the icon-classes crate.

use icon_classes::load_context;
use icon_classes_engine::ClassifyOptions;
use std::io::Write;

fn write_settings(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn empty_settings_file_gives_builtin_fontawesome() {
    let file = write_settings("");
    let context = load_context(Some(file.path())).unwrap();
    assert!(context.registry().get("fontawesome").is_some());
    assert_eq!(
        context.classify("fas fa-check", &ClassifyOptions::default()),
        "fa-solid fa-check"
    );
}

#[test]
fn configured_font_and_fallback() {
    let file = write_settings(
        r#"
fallback_icon: "rpg-unknown"
include_builtin_fonts: false
fonts:
  - name: rpg
    prefixes: ["rpg-"]
    aliases:
      hp: rpg-heart
    schema:
      glyph:
        pattern: "[a-z]+"
      tint:
        choices: [red, blue]
        required: true
        default: rpg-red
    list: [heart, skull, potion]
"#,
    );
    let context = load_context(Some(file.path())).unwrap();
    let opts = ClassifyOptions::default();

    assert_eq!(context.fallback(), "rpg-unknown");
    assert_eq!(context.classify("hp", &opts), "rpg-unknown");
    assert_eq!(context.classify("rpg-skull blue", &opts), "rpg-blue rpg-skull");
    assert_eq!(context.classify("potion", &opts), "rpg-red rpg-potion");
    assert_eq!(context.classify("rpg-sword", &opts), "rpg-unknown");
}

#[test]
fn invalid_font_is_reported() {
    let file = write_settings(
        r#"
fonts:
  - name: clash
    prefixes: ["fa-"]
    list: [x]
"#,
    );
    let err = load_context(Some(file.path())).unwrap_err();
    assert!(format!("{err:#}").contains("collides"));
}

#[test]
fn exact_glyph_slot_is_reported() {
    let file = write_settings(
        r#"
include_builtin_fonts: false
fonts:
  - name: fixed
    prefixes: ["fx-"]
    schema:
      glyph:
        value: fx-one
    list: [one]
"#,
    );
    let err = load_context(Some(file.path())).unwrap_err();
    assert!(format!("{err:#}").contains("exact value"));
}

#[test]
fn malformed_settings_are_reported() {
    let file = write_settings("fonts: 12\n");
    assert!(load_context(Some(file.path())).is_err());
}

#[test]
fn missing_settings_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_context(Some(&dir.path().join("absent.yaml"))).unwrap_err();
    assert!(format!("{err:#}").contains("failed to load settings"));
}
