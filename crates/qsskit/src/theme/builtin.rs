//! Palettes compiled into the crate.
//!
//! Stored as `(name, json)` pairs. Names carry no `.json` extension.

macro_rules! builtin_theme {
    ($name:literal) => {
        (
            $name,
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/resources/themes/",
                $name,
                ".json"
            )),
        )
    };
}

/// Built-in palettes, sorted by name.
pub const BUILTIN_THEMES: &[(&str, &str)] = &[
    builtin_theme!("dark_amber"),
    builtin_theme!("dark_blue"),
    builtin_theme!("dark_cyan"),
    builtin_theme!("dark_lightgreen"),
    builtin_theme!("dark_pink"),
    builtin_theme!("dark_purple"),
    builtin_theme!("dark_red"),
    builtin_theme!("dark_teal"),
    builtin_theme!("dark_yellow"),
    builtin_theme!("light_amber"),
    builtin_theme!("light_blue"),
    builtin_theme!("light_cyan"),
    builtin_theme!("light_cyan_500"),
    builtin_theme!("light_lightgreen"),
    builtin_theme!("light_orange"),
    builtin_theme!("light_pink"),
    builtin_theme!("light_purple"),
    builtin_theme!("light_red"),
    builtin_theme!("light_teal"),
    builtin_theme!("light_yellow"),
];

/// Looks up a built-in palette's JSON text.
pub fn builtin_theme_json(name: &str) -> Option<&'static str> {
    BUILTIN_THEMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, json)| *json)
}
