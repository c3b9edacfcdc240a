//! Main application for the desktop front-end

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use crate::{EngineConfig, GameStatus, Player};

use super::board_view::BoardView;
use super::game_state::{GameMode, GameState};
use super::theme::*;

/// Main Ultimate Tic-Tac-Toe application
pub struct UtttApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl UtttApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        mode: GameMode,
        config: EngineConfig,
        depth: Option<u8>,
        first_player: Player,
    ) -> Self {
        Self {
            state: GameState::new(mode, config, depth, first_player),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }

    fn report<E: std::fmt::Display>(&mut self, result: Result<(), E>) {
        if let Err(err) = result {
            self.state.message = Some(err.to_string());
        }
    }

    fn switch_first_player(&mut self) {
        let result = self.state.switch_first_player().map(|_| ());
        self.report(result);
    }

    fn undo(&mut self) {
        let result = self.state.undo();
        self.report(result);
    }

    fn redo(&mut self) {
        let result = self.state.redo();
        self.report(result);
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (play as A)").clicked() {
                        self.state.new_game(GameMode::PvE { human: Player::A });
                        ui.close_menu();
                    }
                    if ui.button("New Game (play as B)").clicked() {
                        self.state.new_game(GameMode::PvE { human: Player::B });
                        ui.close_menu();
                    }
                    if ui.button("New Game (two players)").clicked() {
                        self.state.new_game(GameMode::PvP);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Switch First Player").clicked() {
                        self.switch_first_player();
                        ui.close_menu();
                    }
                    if ui.button("Undo").clicked() {
                        self.undo();
                        ui.close_menu();
                    }
                    if ui.button("Redo").clicked() {
                        self.redo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human } => format!("vs Engine - You: {human}"),
                        GameMode::PvP => "Two players".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("ULTIMATE").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("tic-tac-toe").size(11.0).color(TEXT_MUTED));
        });
    }

    /// Side to move, or the result once the game is over
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let status = self.state.game.status();
            let player = match status {
                GameStatus::Won(winner) => winner,
                _ => self.state.game.current_player(),
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, player_color(player));
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    player.to_string(),
                    egui::FontId::proportional(26.0),
                    TEXT_PRIMARY,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    let (headline, detail, color) = match status {
                        GameStatus::Won(_) => (format!("{player} WINS"), "Game over", WIN_HIGHLIGHT),
                        GameStatus::Draw => ("DRAW".to_string(), "Game over", TEXT_SECONDARY),
                        GameStatus::InProgress if self.state.is_ai_thinking() => {
                            (format!("{player} to move"), "Engine thinking...", TIMER_WARNING)
                        }
                        GameStatus::InProgress if self.state.is_ai_turn() => {
                            (format!("{player} to move"), "Engine's turn", TIMER_WARNING)
                        }
                        GameStatus::InProgress => (format!("{player} to move"), "Your turn", TIMER_NORMAL),
                    };
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.label(RichText::new(detail).size(12.0).color(color));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ENGINE TIME").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let budget = self.state.config.time_budget().as_secs_f32();
            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < budget * 0.5 {
                    TIMER_NORMAL
                } else if secs < budget {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let text = match self.state.depth {
                    Some(depth) => format!("depth {depth}"),
                    None => format!("{budget:.1}s budget"),
                };
                ui.label(RichText::new(text).size(20.0).color(TEXT_PRIMARY));
            }

            if let Some(last) = self.state.last_ai_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last search: {:.3}s", last.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn action_button(ui: &mut egui::Ui, label: &str) -> bool {
        Frame::new()
            .fill(BUTTON_BG)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(
                    egui::Label::new(RichText::new(label).size(12.0).color(TEXT_PRIMARY))
                        .sense(egui::Sense::click()),
                )
                .clicked()
            })
            .inner
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if Self::action_button(ui, "Undo") {
                    self.undo();
                }
                ui.add_space(4.0);
                if Self::action_button(ui, "Redo") {
                    self.redo();
                }
                ui.add_space(4.0);
                if Self::action_button(ui, "Hint") {
                    self.state.request_suggestion();
                }
            });

            if self.state.game.moves().is_empty() {
                ui.add_space(6.0);
                if Self::action_button(ui, &format!("First: {} (switch)", self.state.game.first_player())) {
                    self.switch_first_player();
                }
            }

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.game.moves().len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ENGINE DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let Some(result) = &self.state.last_ai_result else {
                ui.label(RichText::new("No search yet").size(10.0).color(TEXT_MUTED));
                return;
            };

            ui.label(
                RichText::new(format!("Depth {} / score {}", result.depth, result.score))
                    .size(11.0)
                    .strong()
                    .color(TIMER_NORMAL),
            );
            ui.label(
                RichText::new(format!("{} nodes in {}ms", result.nodes_visited, result.elapsed_ms))
                    .size(10.0)
                    .color(TEXT_SECONDARY),
            );
            if let Some(mv) = result.best_move {
                ui.add_space(4.0);
                ui.label(RichText::new(format!("-> {mv}")).size(12.0).strong().color(WIN_HIGHLIGHT));
            }
        });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let accept_input = !self.state.is_ai_thinking() && self.state.is_human_turn();
            let clicked = self.board_view.show(
                ui,
                &self.state.game,
                self.state.suggested_move,
                accept_input,
            );

            if let Some(mv) = clicked {
                let result = self.state.try_play(mv);
                self.report(result);
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (debug, hint, undo, redo, new_game) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::H),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::N),
            )
        });

        if debug {
            self.show_debug = !self.show_debug;
        }
        if hint {
            self.state.request_suggestion();
        }
        if undo {
            self.undo();
        }
        if redo {
            self.redo();
        }
        if new_game {
            self.state.reset();
        }
    }
}

impl eframe::App for UtttApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();

        if self.state.is_ai_turn() && !self.state.is_ai_thinking() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
