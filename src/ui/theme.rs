//! Theme constants for the desktop front-end

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(236, 230, 218);
pub const CELL_LINE: Color32 = Color32::from_rgb(150, 140, 125);
pub const SUB_BOARD_LINE: Color32 = Color32::from_rgb(50, 45, 40);
pub const ALLOWED_BG: Color32 = Color32::from_rgb(255, 236, 160);

// Marks
pub const PLAYER_A: Color32 = Color32::from_rgb(40, 90, 200);
pub const PLAYER_B: Color32 = Color32::from_rgb(210, 60, 50);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(250, 200, 60);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

/// Wash over a won sub-board so its big mark stands out
pub fn won_overlay() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 170)
}

pub fn hint_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(60, 200, 120, 90)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const BUTTON_BG: Color32 = Color32::from_rgb(50, 53, 58);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 16.0;
pub const MARK_RATIO: f32 = 0.32;
pub const CELL_LINE_WIDTH: f32 = 1.0;
pub const SUB_BOARD_LINE_WIDTH: f32 = 3.0;
pub const BIG_MARK_WIDTH: f32 = 8.0;

/// Mark color for a player
pub fn player_color(player: crate::Player) -> Color32 {
    match player {
        crate::Player::A => PLAYER_A,
        crate::Player::B => PLAYER_B,
    }
}
