//! The icon templates compiled into the crate.
//!
//! Each template draws with the main sentinel, the sub sentinel and black.
//! The set of names here is the required icon set every bundle must carry.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

macro_rules! builtin_icon {
    ($name:literal) => {
        (
            $name,
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/resources/icons/",
                $name
            )),
        )
    };
}

/// Built-in icon templates as `(file_name, svg)` pairs.
pub const BUILTIN_ICONS: &[(&str, &str)] = &[
    builtin_icon!("branch-closed.svg"),
    builtin_icon!("branch-end.svg"),
    builtin_icon!("branch-open.svg"),
    builtin_icon!("checkbox_checked.svg"),
    builtin_icon!("checkbox_indeterminate.svg"),
    builtin_icon!("checkbox_unchecked.svg"),
    builtin_icon!("close.svg"),
    builtin_icon!("downarrow.svg"),
    builtin_icon!("float.svg"),
    builtin_icon!("leftarrow.svg"),
    builtin_icon!("radiobutton_checked.svg"),
    builtin_icon!("radiobutton_unchecked.svg"),
    builtin_icon!("rightarrow.svg"),
    builtin_icon!("sizegrip.svg"),
    builtin_icon!("slider.svg"),
    builtin_icon!("splitter-horizontal.svg"),
    builtin_icon!("splitter-vertical.svg"),
    builtin_icon!("tab_close.svg"),
    builtin_icon!("toolbar-handle-horizontal.svg"),
    builtin_icon!("toolbar-handle-vertical.svg"),
    builtin_icon!("uparrow.svg"),
    builtin_icon!("vline.svg"),
];

static REQUIRED_ICONS: Lazy<BTreeSet<&'static str>> =
    Lazy::new(|| BUILTIN_ICONS.iter().map(|(name, _)| *name).collect());

/// File names every icon context directory must contain.
pub fn required_icon_names() -> &'static BTreeSet<&'static str> {
    &REQUIRED_ICONS
}
