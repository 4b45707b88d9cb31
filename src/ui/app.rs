use eframe::egui;
use egui::{Color32, RichText};
use log::{error, info};

use crate::config::{Rgba, Settings};
use crate::schedule::{status_text, Clock, ScheduleStore, SystemClock, TimeBlock, TimeOfDay};
use super::strip::TimelineStrip;

pub struct DayStripApp {
    settings: Settings,
    schedule: Vec<TimeBlock>,
    store: Option<ScheduleStore>,
    clock: SystemClock,
    strip: TimelineStrip,

    // Settings dialog
    show_settings: bool,
    draft: Settings,

    // Status
    status_message: Option<(String, bool)>, // (message, is_error)
}

impl DayStripApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        super::setup_fonts(&cc.egui_ctx);
        super::setup_theme(&cc.egui_ctx);

        let mut status_message = None;
        let store = match ScheduleStore::open_default() {
            Ok(store) => Some(store),
            Err(e) => {
                error!("No schedule location: {:#}", e);
                status_message = Some((format!("Schedule unavailable: {}", e), true));
                None
            }
        };
        let schedule = store.as_ref().map(ScheduleStore::load).unwrap_or_default();

        Self {
            draft: settings.clone(),
            settings,
            schedule,
            store,
            clock: SystemClock,
            strip: TimelineStrip::new(),
            show_settings: false,
            status_message,
        }
    }

    fn reload_schedule(&mut self) {
        if let Some(store) = &self.store {
            self.schedule = store.load();
            self.strip.reset();
            info!("Schedule reloaded from {}", store.path().display());
        }
    }

    fn open_settings(&mut self) {
        self.draft = self.settings.clone();
        self.show_settings = true;
    }

    fn save_settings(&mut self, ctx: &egui::Context) {
        let resized = self.draft.window_width != self.settings.window_width
            || self.draft.window_height != self.settings.window_height;

        self.settings = self.draft.clone();
        self.strip.reset();

        if resized {
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                self.settings.window_width,
                self.settings.window_height,
            )));
        }

        match self.settings.save() {
            Ok(_) => {
                self.show_settings = false;
                self.status_message = None;
            }
            Err(e) => {
                error!("Failed to save settings: {:#}", e);
                self.status_message = Some((format!("Failed to save: {}", e), true));
            }
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui, now: TimeOfDay) {
        let (_, text_color) = super::theme::header_colors();

        // The window has no OS frame; the header background moves it.
        let drag = ui.interact(ui.max_rect(), ui.id().with("window_drag"), egui::Sense::drag());
        if drag.drag_started_by(egui::PointerButton::Primary) {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::StartDrag);
        }

        ui.horizontal(|ui| {
            let menu_text = format!("{} Menu", egui_phosphor::regular::LIST);
            ui.menu_button(RichText::new(menu_text).color(text_color), |ui| {
                ui.set_min_width(160.0);
                if ui.button(format!("{} Settings", egui_phosphor::regular::FADERS_HORIZONTAL)).clicked() {
                    self.open_settings();
                    ui.close_menu();
                }
                if ui.button(format!("{} Reload schedule", egui_phosphor::regular::ARROW_CLOCKWISE)).clicked() {
                    self.reload_schedule();
                    ui.close_menu();
                }
            });

            ui.add_space(16.0);
            ui.label(RichText::new(now.clock_label()).size(22.0).strong().color(text_color));

            ui.add_space(16.0);
            ui.label(RichText::new(status_text(now, &self.schedule)).size(16.0).color(text_color));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let close = RichText::new(egui_phosphor::regular::X).size(16.0).color(text_color);
                if ui.button(close).on_hover_text("Close").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
                let minimize = RichText::new(egui_phosphor::regular::MINUS).size(16.0).color(text_color);
                if ui.button(minimize).on_hover_text("Minimize").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Minimized(true));
                }

                if let Some((msg, is_error)) = &self.status_message {
                    let color = if *is_error {
                        Color32::from_rgb(224, 108, 117)
                    } else {
                        Color32::from_rgb(152, 195, 121)
                    };
                    ui.add_space(12.0);
                    ui.label(RichText::new(msg).color(color));
                }
            });
        });
    }

    fn render_settings(&mut self, ui: &mut egui::Ui) -> SettingsAction {
        let section_color = Color32::from_rgb(140, 140, 160);
        let mut action = SettingsAction::None;

        ui.label(RichText::new("Timeline").color(section_color).strong());
        ui.add_space(8.0);

        egui::Grid::new("timeline_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Start of day");
                egui::ComboBox::new("start_of_day", "")
                    .selected_text(self.draft.start_of_day.to_string())
                    .show_ui(ui, |ui| {
                        for hour in 0..24 {
                            if let Ok(time) = TimeOfDay::from_hm(hour, 0) {
                                ui.selectable_value(&mut self.draft.start_of_day, time, time.to_string());
                            }
                        }
                    });
                ui.end_row();

                ui.label("Window size");
                ui.horizontal(|ui| {
                    ui.add(egui::DragValue::new(&mut self.draft.window_width).range(300.0..=4000.0).suffix(" px"));
                    ui.label("×");
                    ui.add(egui::DragValue::new(&mut self.draft.window_height).range(100.0..=1000.0).suffix(" px"));
                });
                ui.end_row();
            });

        ui.add_space(20.0);

        ui.label(RichText::new("Colors").color(section_color).strong());
        ui.add_space(8.0);

        let colors = &mut self.draft.colors;
        let entries: [(&str, &mut Rgba); 7] = [
            ("Progress fill", &mut colors.progress_fill),
            ("Timeline", &mut colors.timeline),
            ("Current time", &mut colors.current_time),
            ("Block", &mut colors.block),
            ("Block hover", &mut colors.block_hover),
            ("Block border", &mut colors.block_border),
            ("Font", &mut colors.font),
        ];

        egui::Grid::new("color_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                for (label, color) in entries {
                    ui.label(label);
                    ui.color_edit_button_srgba_unmultiplied(&mut color.0);
                    ui.end_row();
                }
            });

        ui.add_space(24.0);

        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                action = SettingsAction::Save;
            }
            if ui.button("Cancel").clicked() {
                action = SettingsAction::Cancel;
            }
            if ui.button("Defaults").clicked() {
                self.draft = Settings::default();
            }
        });

        action
    }
}

enum SettingsAction {
    None,
    Save,
    Cancel,
}

impl eframe::App for DayStripApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.clock.now();

        let (header_bg, _) = super::theme::header_colors();
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(header_bg).inner_margin(egui::Margin::symmetric(8.0, 6.0)))
            .show(ctx, |ui| {
                self.render_header(ui, now);
            });

        if self.show_settings {
            let (content_bg, frame_color) = super::theme::dialog_colors();
            let dialog_frame = egui::Frame::none()
                .fill(content_bg)
                .stroke(egui::Stroke::new(2.0, frame_color))
                .rounding(egui::Rounding::same(8.0))
                .inner_margin(egui::Margin::same(20.0));

            let mut action = SettingsAction::None;
            egui::Window::new("Settings")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .frame(dialog_frame)
                .show(ctx, |ui| {
                    action = self.render_settings(ui);
                });

            match action {
                SettingsAction::Save => self.save_settings(ctx),
                SettingsAction::Cancel => self.show_settings = false,
                SettingsAction::None => {}
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(super::theme::strip_background()))
            .show(ctx, |ui| {
                self.strip.show(ui, &self.schedule, &self.settings, now);
            });
    }
}
