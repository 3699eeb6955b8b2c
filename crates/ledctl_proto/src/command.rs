//! The validated, address-independent command set the dispatcher routes to
//! the scene manager.

use ledctl_core::PaletteId;

/// A fully parsed and type/range-validated control request. Every variant
/// corresponds to one row of the address table; values are already
/// clamped where the table says "clamp".
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `/load_json`: path to a scene file on disk.
    LoadJson(String),
    /// `/change_scene`.
    ChangeScene(u32),
    /// `/change_effect`.
    ChangeEffect(u32),
    /// `/change_palette`.
    ChangePalette(PaletteId),
    /// `/palette/{P}/{C}`: palette id, color slot `0..=5`, clamped RGB.
    UpdatePaletteColor {
        palette_id: PaletteId,
        color_id: usize,
        r: i32,
        g: i32,
        b: i32,
    },
    /// `/set_dissolve_time`, clamped to `>= 0`.
    SetDissolveTime(u64),
    /// `/set_speed_percent`, clamped to `[0, 200]`.
    SetSpeedPercent(u32),
    /// `/master_brightness`, clamped to `[0, 255]`.
    MasterBrightness(u8),
}
