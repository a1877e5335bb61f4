// ui.rs - Control panel and flap painter
// The board is redrawn from the core's cell states every frame

use eframe::egui;
use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};
use flapboard_core::{Justification, LetterCase, StepPolicy, Symbol, patterns};

use crate::settings::{FontChoice, StyleSettings, Theme};
use crate::{BoardInterface, FlapBoard};

// Flap aspect ratio (height / width) and gap between flaps
const FLAP_ASPECT: f32 = 1.45;
const GAP_RATIO: f32 = 0.08;

impl eframe::App for FlapBoard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick_clock();

        // Fullscreen shows the board alone
        if !self.fullscreen {
            egui::SidePanel::left("controls")
                .resizable(true)
                .default_width(300.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| self.controls(ui));
                });
        }

        let backdrop = self.config.style.backdrop();
        let clicked = egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(backdrop).inner_margin(16.0))
            .show(ctx, |ui| self.draw_board(ui))
            .inner;

        if clicked || ctx.input(|i| i.key_pressed(egui::Key::F11)) {
            let fullscreen = self.toggle_fullscreen();
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
        }

        // Keep repainting while flaps turn; otherwise sleep until the next cycle
        let board = self.board();
        if !board.is_settled() {
            ctx.request_repaint();
        } else if let Some(deadline) = board.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_sub(board.now()));
        }
    }
}

impl FlapBoard {
    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Flap Board");

        ui.horizontal(|ui| {
            let button_text = if self.board().is_paused() { "▶ Resume" } else { "⏸ Pause" };
            if ui.button(button_text).clicked() {
                self.toggle_pause();
            }
            if ui.button("⏭ Next").clicked() {
                self.skip();
            }
        });

        let board = self.board();
        let turning = board.cells().iter().filter(|c| c.is_animating()).count();
        ui.label(format!(
            "Frame {} of {}  ·  turning {} / {}",
            if board.playlist().is_empty() { 0 } else { board.cursor() + 1 },
            board.playlist().len(),
            turning,
            board.cells().len(),
        ));

        ui.separator();
        ui.label("Message now:");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.ad_hoc);
            if ui.button("Show").clicked() {
                self.send_message();
            }
        });

        ui.separator();
        egui::CollapsingHeader::new("Board").default_open(true).show(ui, |ui| {
            self.board_controls(ui);
        });
        egui::CollapsingHeader::new("Playlist").default_open(true).show(ui, |ui| {
            self.playlist_controls(ui);
        });

        ui.separator();
        ui.horizontal(|ui| {
            let label = if self.is_dirty() { "Apply changes" } else { "Rebuild" };
            let apply = egui::Button::new(label);
            if ui.add(apply).clicked() {
                self.rebuild();
            }
            if self.is_dirty() && ui.button("Revert").clicked() {
                self.config.board = self.applied.clone();
            }
        });
        if let Some(error) = &self.error {
            ui.colored_label(Color32::from_rgb(230, 80, 80), error.as_str());
        }

        ui.separator();
        egui::CollapsingHeader::new("Style").default_open(false).show(ui, |ui| {
            style_controls(ui, &mut self.config.style);
        });
    }

    fn board_controls(&mut self, ui: &mut egui::Ui) {
        let board = &mut self.config.board;

        ui.horizontal(|ui| {
            ui.label("Rows:");
            ui.add(egui::DragValue::new(&mut board.rows).clamp_range(1..=24));
            ui.label("Cols:");
            ui.add(egui::DragValue::new(&mut board.cols).clamp_range(1..=64));
        });

        ui.horizontal(|ui| {
            ui.label("Justify:");
            egui::ComboBox::from_id_source("justification")
                .selected_text(board.justification.name())
                .show_ui(ui, |ui| {
                    for j in Justification::ALL {
                        ui.selectable_value(&mut board.justification, j, j.name());
                    }
                });
        });

        let mut upper = board.letter_case == LetterCase::Upper;
        if ui.checkbox(&mut upper, "Upper-case messages").changed() {
            board.letter_case = if upper { LetterCase::Upper } else { LetterCase::Preserve };
        }

        ui.horizontal(|ui| {
            ui.label("Flip:");
            egui::ComboBox::from_id_source("policy")
                .selected_text(board.policy.name())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut board.policy, StepPolicy::Cycle, "Cycle");
                    let blurring = matches!(board.policy, StepPolicy::Blur { .. });
                    if ui.selectable_label(blurring, "Blur").clicked() && !blurring {
                        board.policy = StepPolicy::blur();
                    }
                });
        });
        if let StepPolicy::Blur { snap_chance, max_steps } = &mut board.policy {
            ui.add(egui::Slider::new(snap_chance, 0.0..=1.0).text("snap chance"));
            ui.add(egui::Slider::new(max_steps, 1..=64).text("max steps"));
        }

        ui.add(egui::Slider::new(&mut board.cycle_secs, 1.0..=60.0).suffix(" s").text("cycle"));
        ui.add(egui::Slider::new(&mut board.flip_ms, 30..=600).suffix(" ms").text("flip"));

        ui.label("Wheel:");
        ui.text_edit_singleline(&mut board.alphabet);
    }

    fn playlist_controls(&mut self, ui: &mut egui::Ui) {
        let mut remove = None;
        for (i, entry) in self.config.board.playlist.iter_mut().enumerate() {
            ui.horizontal(|ui| {
                ui.add(egui::TextEdit::multiline(entry).desired_rows(2).desired_width(220.0));
                if ui.small_button("✖").clicked() {
                    remove = Some(i);
                }
            });
        }
        if let Some(i) = remove {
            self.config.board.playlist.remove(i);
        }
        if ui.button("+ Add message").clicked() {
            self.config.board.playlist.push(String::new());
        }

        ui.separator();
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_source("preset")
                .selected_text(patterns::PRESETS[self.selected_preset].name)
                .show_ui(ui, |ui| {
                    for (i, preset) in patterns::PRESETS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_preset, i, preset.name);
                    }
                });
            if ui.button("Load").clicked() {
                self.apply_selected_preset();
            }
            if ui.button("🎲 Art").clicked() {
                self.apply_random_art();
            }
        });
    }

    /// Paints every flap; returns whether the board was clicked
    fn draw_board(&self, ui: &mut egui::Ui) -> bool {
        let board = self.board();
        let style = &self.config.style;
        let (rows, cols) = (board.config().rows(), board.config().cols());

        // Largest flap that fits both ways
        let avail = ui.available_size();
        let by_width = avail.x / (cols as f32 * (1.0 + GAP_RATIO));
        let by_height = avail.y / (rows as f32 * (FLAP_ASPECT + GAP_RATIO));
        let flap_w = by_width.min(by_height).max(4.0);
        let flap = Vec2::new(flap_w, flap_w * FLAP_ASPECT);
        let gap = flap_w * GAP_RATIO;

        let total = Vec2::new(
            cols as f32 * (flap.x + gap) - gap,
            rows as f32 * (flap.y + gap) - gap,
        );
        let (response, painter) = ui.allocate_painter(avail, egui::Sense::click());
        let origin = response.rect.center() - total / 2.0;

        for row in 0..rows {
            for col in 0..cols {
                let index = row * cols + col;
                let Some(cell) = board.cell(index) else { continue };
                let offset = Vec2::new(col as f32 * (flap.x + gap), row as f32 * (flap.y + gap));
                let min = origin + offset;
                let rect = Rect::from_min_size(min, flap);

                match (cell.incoming(), board.step_progress(index)) {
                    (Some(incoming), Some(progress)) => {
                        draw_turning_flap(&painter, rect, cell.current(), incoming, progress, style)
                    }
                    _ => draw_flap(&painter, rect, cell.current(), style),
                }
            }
        }
        response.clicked()
    }
}

fn style_controls(ui: &mut egui::Ui, style: &mut StyleSettings) {
    ui.horizontal(|ui| {
        ui.label("Theme:");
        for theme in Theme::ALL {
            if ui.selectable_label(style.theme == theme, theme.name()).clicked() {
                style.set_theme(theme);
            }
        }
    });

    ui.horizontal(|ui| {
        ui.label("Text:");
        let mut text = style.text_rgb();
        if ui.color_edit_button_srgb(&mut text).changed() {
            style.text_color = Some(text);
        }
        ui.label("Flap:");
        let mut fill = style.fill_rgb();
        if ui.color_edit_button_srgb(&mut fill).changed() {
            style.fill_color = Some(fill);
        }
        ui.label("Backdrop:");
        let mut backdrop = style.backdrop_rgb();
        if ui.color_edit_button_srgb(&mut backdrop).changed() {
            style.backdrop_color = Some(backdrop);
        }
    });

    ui.horizontal(|ui| {
        ui.label("Font:");
        egui::ComboBox::from_id_source("font")
            .selected_text(style.font.name())
            .show_ui(ui, |ui| {
                for font in FontChoice::ALL {
                    ui.selectable_value(&mut style.font, font, font.name());
                }
            });
        ui.checkbox(&mut style.bold, "Bold");
        ui.checkbox(&mut style.italic, "Italic");
    });

    ui.add(egui::Slider::new(&mut style.size, 0.4..=1.6).text("glyph size"));
}

/// A resting flap: backing, glyph and the hinge line.
fn draw_flap(painter: &Painter, rect: Rect, symbol: &Symbol, style: &StyleSettings) {
    painter.rect_filled(rect, 2.0, style.fill());
    draw_glyph(painter, rect, rect, symbol, style);
    draw_hinge(painter, rect, style);
}

/// A flap mid-step. The upper leaf falls during the first half, uncovering
/// the incoming glyph's top; the lower leaf lands during the second half,
/// covering the old glyph's bottom.
fn draw_turning_flap(
    painter: &Painter,
    rect: Rect,
    current: &Symbol,
    incoming: &Symbol,
    progress: f32,
    style: &StyleSettings,
) {
    let mid = rect.center().y;
    let top = Rect::from_min_max(rect.min, Pos2::new(rect.max.x, mid));
    let bottom = Rect::from_min_max(Pos2::new(rect.min.x, mid), rect.max);

    painter.rect_filled(rect, 2.0, style.fill());
    draw_glyph(painter, rect, top, incoming, style);
    draw_glyph(painter, rect, bottom, current, style);

    let shade = style.fill().gamma_multiply(0.75);
    if progress < 0.5 {
        // Upper leaf folding down toward the hinge
        let height = top.height() * (1.0 - progress * 2.0);
        let leaf = Rect::from_min_max(Pos2::new(top.min.x, mid - height), top.max);
        painter.rect_filled(leaf, 0.0, shade);
        draw_glyph(painter, rect, leaf, current, style);
    } else {
        // Lower leaf unfolding from the hinge
        let height = bottom.height() * (progress * 2.0 - 1.0);
        let leaf = Rect::from_min_max(bottom.min, Pos2::new(bottom.max.x, mid + height));
        painter.rect_filled(leaf, 0.0, shade);
        draw_glyph(painter, rect, leaf, incoming, style);
    }
    draw_hinge(painter, rect, style);
}

/// Glyph centred on `flap`, visible only inside `clip`.
fn draw_glyph(painter: &Painter, flap: Rect, clip: Rect, symbol: &Symbol, style: &StyleSettings) {
    if symbol.is_space() || clip.height() <= 0.0 {
        return;
    }
    let painter = painter.with_clip_rect(clip);
    let font_id = FontId::new(flap.height() * 0.7 * style.size, style.font.family());

    let mut job = LayoutJob::default();
    job.append(
        symbol.as_str(),
        0.0,
        TextFormat {
            font_id,
            color: style.text(),
            italics: style.italic,
            ..Default::default()
        },
    );
    let galley = painter.fonts(|f| f.layout_job(job));
    let pos = flap.center() - galley.size() / 2.0;
    if style.bold {
        painter.galley(pos + Vec2::new(flap.width() * 0.02, 0.0), galley.clone());
    }
    painter.galley(pos, galley);
}

fn draw_hinge(painter: &Painter, rect: Rect, style: &StyleSettings) {
    let y = rect.center().y;
    painter.line_segment(
        [Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)],
        Stroke::new((rect.height() * 0.015).max(1.0), style.backdrop()),
    );
}
