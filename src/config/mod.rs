//! Configuration module.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};

/// Options recognized by [`VirtualList`](crate::state::VirtualList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListConfig {
    /// Keep the hover highlight active while a selection exists.
    pub selected_plus_hover: bool,

    /// Hide icons whose image fails to load instead of showing a broken glyph.
    pub hide_broken_image_icons: bool,

    /// Signed adjustment added to the computed item text width.
    pub menu_text_width_correction_offset: i32,
}
