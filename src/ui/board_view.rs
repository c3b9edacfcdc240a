//! Board rendering for the desktop front-end

use egui::{CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{BigBoard, Move, Player};
use crate::rules::sub_board_winners;
use crate::Game;

use super::theme::*;

const GRID: usize = 9;

/// Board view handles rendering and input for the 9x9 grid
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 40.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked legal move, if any.
    ///
    /// Clicks are only reported when `accept_input` is set.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        game: &Game,
        suggested_move: Option<Move>,
        accept_input: bool,
    ) -> Option<Move> {
        let available_size = ui.available_size();

        // Calculate board size to fit available space
        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / GRID as f32;

        let (response, painter) = ui.allocate_painter(Vec2::splat(board_size), Sense::click());
        self.board_rect = response.rect;

        let board = game.big_board();
        let allowed = game.allowed_sub_boards();
        let legal = game.legal_moves();

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);

        for &sb in &allowed {
            painter.rect_filled(self.sub_board_rect(sb), CornerRadius::ZERO, ALLOWED_BG);
        }

        self.draw_grid(&painter);
        self.draw_marks(&painter, &board);

        if let Some(mv) = game.last_move() {
            self.draw_last_move_marker(&painter, mv);
        }

        self.draw_won_sub_boards(&painter, &board);

        if let Some(mv) = suggested_move {
            painter.rect_filled(self.cell_rect(mv).shrink(2.0), CornerRadius::same(3), hint_fill());
        }

        let mut clicked = None;

        if accept_input {
            if let Some(mv) = response.hover_pos().and_then(|p| self.screen_to_move(p)) {
                if legal.contains(&mv) {
                    painter.rect_filled(self.cell_rect(mv).shrink(2.0), CornerRadius::same(3), hover_valid());
                    if response.clicked() {
                        clicked = Some(mv);
                    }
                }
            }
        }

        clicked
    }

    /// Thin cell lines, thick sub-board lines
    fn draw_grid(&self, painter: &Painter) {
        let origin = self.board_rect.min + Vec2::splat(BOARD_MARGIN);
        let extent = GRID as f32 * self.cell_size;

        for i in 0..=GRID {
            let stroke = if i % 3 == 0 {
                Stroke::new(SUB_BOARD_LINE_WIDTH, SUB_BOARD_LINE)
            } else {
                Stroke::new(CELL_LINE_WIDTH, CELL_LINE)
            };
            let offset = i as f32 * self.cell_size;

            painter.line_segment(
                [origin + Vec2::new(offset, 0.0), origin + Vec2::new(offset, extent)],
                stroke,
            );
            painter.line_segment(
                [origin + Vec2::new(0.0, offset), origin + Vec2::new(extent, offset)],
                stroke,
            );
        }
    }

    fn draw_marks(&self, painter: &Painter, board: &BigBoard) {
        for sb in 0..GRID as u8 {
            for cell in 0..GRID as u8 {
                let mv = Move::new(sb, cell);
                if let Some(player) = board.get(mv) {
                    let rect = self.cell_rect(mv);
                    let radius = self.cell_size * MARK_RATIO;
                    draw_mark(painter, rect.center(), radius, player, 3.0);
                }
            }
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, mv: Move) {
        painter.rect_stroke(
            self.cell_rect(mv).shrink(1.5),
            CornerRadius::same(2),
            Stroke::new(2.5, LAST_MOVE_MARKER),
            egui::StrokeKind::Inside,
        );
    }

    /// Fade won sub-boards and paint the owner's mark across them
    fn draw_won_sub_boards(&self, painter: &Painter, board: &BigBoard) {
        for (sb, winner) in sub_board_winners(board).into_iter().enumerate() {
            let Some(player) = winner else { continue };
            let rect = self.sub_board_rect(sb as u8);
            painter.rect_filled(rect.shrink(SUB_BOARD_LINE_WIDTH), CornerRadius::ZERO, won_overlay());
            draw_mark(painter, rect.center(), rect.width() * MARK_RATIO, player, BIG_MARK_WIDTH);
        }
    }

    fn sub_board_rect(&self, sb: u8) -> Rect {
        let size = 3.0 * self.cell_size;
        let min = self.board_rect.min
            + Vec2::splat(BOARD_MARGIN)
            + Vec2::new(f32::from(sb % 3) * size, f32::from(sb / 3) * size);
        Rect::from_min_size(min, Vec2::splat(size))
    }

    fn cell_rect(&self, mv: Move) -> Rect {
        let (row, col) = mv.to_grid();
        let min = self.board_rect.min
            + Vec2::splat(BOARD_MARGIN)
            + Vec2::new(f32::from(col), f32::from(row)) * self.cell_size;
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    /// Convert screen coordinates to the move under the pointer
    pub fn screen_to_move(&self, screen_pos: Pos2) -> Option<Move> {
        let relative = screen_pos - self.board_rect.min - Vec2::splat(BOARD_MARGIN);
        if relative.x < 0.0 || relative.y < 0.0 {
            return None;
        }
        let col = (relative.x / self.cell_size).floor() as u8;
        let row = (relative.y / self.cell_size).floor() as u8;
        Move::from_grid(row, col)
    }
}

/// A cross for A, a ring for B
fn draw_mark(painter: &Painter, center: Pos2, radius: f32, player: Player, width: f32) {
    let stroke = Stroke::new(width, player_color(player));
    match player {
        Player::A => {
            let d = Vec2::splat(radius * std::f32::consts::FRAC_1_SQRT_2);
            painter.line_segment([center - d, center + d], stroke);
            painter.line_segment(
                [center + Vec2::new(-d.x, d.y), center + Vec2::new(d.x, -d.y)],
                stroke,
            );
        }
        Player::B => {
            painter.circle_stroke(center, radius, stroke);
        }
    }
}
