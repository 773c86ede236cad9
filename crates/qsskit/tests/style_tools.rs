use qsskit::{
    DynamicThemes, Error, ExtraAttributes, GenerateOptions, RecordingToolkit, ResourceGenerator,
    StaticThemes, StyleTools, ThemeManager, ThemeSource, ToolkitCall, DEFAULT_QSS_NAME,
};
use tempfile::TempDir;

fn static_tools(tmp: &TempDir, names: &[&str]) -> StyleTools<StaticThemes> {
    let options = GenerateOptions {
        destination: Some(tmp.path().to_path_buf()),
        ..GenerateOptions::default()
    };
    let generator = ResourceGenerator::new();
    for name in names {
        generator
            .generate(name, &ExtraAttributes::default(), &options)
            .unwrap();
    }
    StyleTools::new(StaticThemes::from_dir(tmp.path()).unwrap())
}

#[test]
fn static_theme_list_starts_with_default() {
    let tmp = TempDir::new().unwrap();
    let tools = static_tools(&tmp, &["light_cyan", "dark_amber"]);
    assert_eq!(
        tools.theme_list().unwrap(),
        vec!["default", "dark_amber", "light_cyan"]
    );
}

#[test]
fn static_apply_uses_bundle_directory() {
    let tmp = TempDir::new().unwrap();
    let mut tools = static_tools(&tmp, &["dark_amber"]);
    let mut toolkit = RecordingToolkit::new();

    tools.apply(&mut toolkit, &mut (), "dark_amber").unwrap();

    let dir = tmp.path().join("dark_amber");
    let expected_theme = ThemeManager::builtin().load("dark_amber").unwrap();
    let expected_qss = std::fs::read_to_string(dir.join(DEFAULT_QSS_NAME)).unwrap();
    assert_eq!(
        toolkit.calls(),
        &[
            ToolkitCall::SearchPath {
                dir,
                prefix: "icon".into()
            },
            ToolkitCall::Palette(expected_theme),
            ToolkitCall::Stylesheet(expected_qss),
        ]
    );
}

#[test]
fn switching_between_themes() {
    let tmp = TempDir::new().unwrap();
    let mut tools = static_tools(&tmp, &["dark_amber", "light_cyan"]);
    let mut toolkit = RecordingToolkit::new();

    tools.apply(&mut toolkit, &mut (), "dark_amber").unwrap();
    tools.apply(&mut toolkit, &mut (), "light_cyan").unwrap();
    assert_eq!(tools.current_theme(), "light_cyan");
    assert_eq!(toolkit.calls().len(), 6);

    toolkit.clear();
    tools.apply(&mut toolkit, &mut (), "light_cyan").unwrap();
    assert!(toolkit.calls().is_empty());

    tools.apply(&mut toolkit, &mut (), "default").unwrap();
    assert_eq!(toolkit.last_stylesheet(), Some(""));
}

#[test]
fn empty_bundle_directory_only_offers_default() {
    let tmp = TempDir::new().unwrap();
    let mut tools = StyleTools::new(StaticThemes::from_dir(tmp.path()).unwrap());
    assert!(!tools.source().is_initialized());
    assert_eq!(tools.theme_list().unwrap(), vec!["default"]);

    let mut toolkit = RecordingToolkit::new();
    assert!(matches!(
        tools.apply(&mut toolkit, &mut (), "dark_teal"),
        Err(Error::ThemeNotFound(_))
    ));
}

#[test]
fn dynamic_themes_from_custom_palette_dir() {
    let palettes = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    std::fs::write(
        palettes.path().join("corporate.json"),
        qsskit::builtin_theme_json("light_blue").unwrap(),
    )
    .unwrap();

    let mut source = DynamicThemes::new(None)
        .unwrap()
        .with_cache_dir(cache.path());
    source.set_theme_dir(Some(palettes.path())).unwrap();
    assert_eq!(source.theme_names().unwrap(), vec!["corporate"]);

    let mut tools = StyleTools::new(source);
    let mut toolkit = RecordingToolkit::new();
    tools.apply(&mut toolkit, &mut (), "corporate").unwrap();
    assert!(cache.path().join("disabled/uparrow.svg").is_file());

    tools.source_mut().set_theme_dir(None).unwrap();
    assert!(tools.theme_list().unwrap().len() > 2);
}
