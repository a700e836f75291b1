#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

use std::time::{Duration, Instant};

use communication::Message;
use config::{Config, Theme};
use eframe::egui::{
    self, Button, CentralPanel, Color32, Layout, ProgressBar, RichText, TopBottomPanel, Window,
};
use stage::{format_hms, AlarmFlow, OverBound, Stage};
use widgets::Sketchpad;

pub mod communication;
pub mod config;
/// board geometry and the user's line
pub mod sketch;
/// the alarm workflow state machine
pub mod stage;
pub mod tone;
pub mod widgets;

pub struct DrawAlarm {
    config: Config,
    sender: std::sync::mpsc::Sender<Message>,
    flow: AlarmFlow,
    /// when the countdown last lost a second
    last_tick: Instant,
    /// the drawn-too-long message currently shown, if any
    rejection: Option<OverBound>,
    in_config: bool,
}

impl DrawAlarm {
    #[must_use]
    pub fn new(sender: std::sync::mpsc::Sender<Message>) -> Self {
        Self {
            config: Config::load(&Config::config_path()),
            sender,
            flow: AlarmFlow::new(),
            last_tick: Instant::now(),
            rejection: None,
            in_config: false,
        }
    }

    fn save(&self) {
        self.config.save(&Config::config_path());
    }

    fn start_ring(&self) {
        self.sender
            .send(Message::RingStarted {
                volume: self.config.volume,
                frequency: self.config.tone_frequency,
            })
            .unwrap();
    }

    fn stop_ring(&self) {
        self.sender.send(Message::RingStopped).unwrap();
    }

    fn reset(&mut self) {
        self.stop_ring();
        self.rejection = None;
        self.flow.reset();
    }

    fn render_settings(&mut self, ctx: &egui::Context) {
        Window::new("settings ⚙").show(ctx, |ui| {
            if ui.button("x").clicked() {
                self.in_config = false;
            }
            let mut changed = ui
                .add(
                    egui::Slider::new(&mut self.config.volume, 0.0..=100.0)
                        .integer()
                        .suffix("%")
                        .text("volume"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut self.config.tone_frequency, 200.0..=4000.0)
                        .integer()
                        .suffix(" Hz")
                        .text("tone pitch"),
                )
                .changed();
            if changed {
                self.save();
            }
        });
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("time_and_ctrl").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let theme_btn = ui.add(Button::new({
                    if self.config.theme == Theme::Dark {
                        "🌞"
                    } else {
                        "🌙"
                    }
                }));
                if theme_btn.clicked() {
                    self.config.theme = !self.config.theme;
                    self.save();
                }
                ui.centered_and_justified(|ui| {
                    ui.label(format!(
                        "Time: {}",
                        chrono::Local::now()
                            .naive_local()
                            .format(&self.config.time_format)
                    ));
                });
                ui.with_layout(Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("⚙").on_hover_text("settings").clicked() {
                        self.in_config = true;
                    }
                });
            });
        });
    }

    fn render_drawing(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(format!("SET {}", self.flow.stage().label().to_uppercase()));
            ui.label("Draw a line on the board, its length is the time value.");
            ui.label("💡 Don't draw anything and press SET to keep the value as 0");
            if self.flow.stage() != Stage::Hour {
                ui.colored_label(
                    Color32::DARK_GREEN,
                    format!("✔ Hour set: {:.2}", self.flow.hour()),
                );
            }
            if self.flow.stage() == Stage::Second {
                ui.colored_label(
                    Color32::DARK_GREEN,
                    format!("✔ Minute set: {:.2}", self.flow.minute()),
                );
            }
            ui.add(Sketchpad::new(self.flow.path_mut()));
            ui.small("30cm × 20cm");
            ui.label(format!(
                "Current line length: {:.2} cm",
                self.flow.path().length_cm()
            ));
            if let Some(rejection) = self.rejection {
                ui.colored_label(Color32::RED, rejection.to_string());
            }
            ui.horizontal(|ui| {
                if ui.button("SET").clicked() {
                    self.rejection = self.flow.set().err();
                }
                let erase =
                    ui.add_enabled(!self.flow.path().is_empty(), Button::new("ERASE"));
                if erase.clicked() {
                    self.flow.erase();
                    self.rejection = None;
                }
            });
        });
    }

    fn render_confirm(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("CONFIRM YOUR ALARM");
            ui.label(format!(
                "Hour: {:.2} | Minute: {:.2} | Second: {:.2}",
                self.flow.hour(),
                self.flow.minute(),
                self.flow.second()
            ));
            ui.horizontal(|ui| {
                if ui.button("START ALARM").clicked() {
                    if self.flow.confirm() == Stage::Ringing {
                        // nothing was set, ring right away
                        self.start_ring();
                    } else {
                        self.last_tick = Instant::now();
                    }
                }
                if ui.button("RESET").clicked() {
                    self.reset();
                }
            });
        });
    }

    #[allow(clippy::cast_precision_loss)]
    fn render_countdown(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("⏳ COUNTDOWN");
            ui.label(
                RichText::new(format_hms(self.flow.remaining()))
                    .monospace()
                    .size(64.0),
            );
            ui.add(ProgressBar::new(
                self.flow.remaining() as f32 / self.flow.total() as f32,
            ));
            if ui.button("CANCEL").clicked() {
                self.reset();
            }
        });
    }

    fn render_ringing(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("🔔 ALARM! 🔔")
                    .color(Color32::RED)
                    .size(48.0)
                    .strong(),
            );
            ui.label(RichText::new("⏰ TIME'S UP! ⏰").size(24.0));
            if ui.button(RichText::new("STOP ALARM").size(24.0)).clicked() {
                self.flow.stop();
                self.stop_ring();
            }
        });
    }

    fn render_done(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("✅ ALARM COMPLETED!");
            ui.label(format!(
                "Timer was set for: {:.2} hours, {:.2} minutes, {:.2} seconds",
                self.flow.hour(),
                self.flow.minute(),
                self.flow.second()
            ));
            if ui.button("RESET").clicked() {
                self.reset();
            }
        });
    }

    /// lose one second per elapsed wall clock second; starts the tone when
    /// the countdown runs out
    fn drive_countdown(&mut self, ctx: &egui::Context) {
        while self.last_tick.elapsed() >= Duration::from_secs(1) {
            self.last_tick += Duration::from_secs(1);
            if self.flow.tick() == Stage::Ringing {
                self.start_ring();
                break;
            }
        }
        // keep ticking even when there is no input
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

impl eframe::App for DrawAlarm {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.config.theme.into());
        if self.in_config {
            self.render_settings(ctx);
        }
        self.render_header(ctx);
        CentralPanel::default().show(ctx, |ui| match self.flow.stage() {
            Stage::Hour | Stage::Minute | Stage::Second => self.render_drawing(ui),
            Stage::Confirm => self.render_confirm(ui),
            Stage::Countdown => {
                self.drive_countdown(ctx);
                if self.flow.stage() == Stage::Countdown {
                    self.render_countdown(ui);
                } else {
                    self.render_ringing(ui);
                }
            }
            Stage::Ringing => self.render_ringing(ui),
            Stage::Done => self.render_done(ui),
        });
    }
}
