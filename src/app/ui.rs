use eframe::egui::{self, Color32, RichText};
use rfd::FileDialog;

use super::{ItemDetail, RawBatchApp, RunProgress};
use crate::convert::Quality;
use crate::utils::{color, file_size};

const SUCCESS_COLOR: Color32 = Color32::from_rgb(0, 180, 0);
const FAILURE_COLOR: Color32 = Color32::from_rgb(220, 50, 50);

fn accent_color() -> Color32 {
    color::from_hex("#a159e1").unwrap_or(Color32::LIGHT_BLUE)
}

impl RawBatchApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("RAW to JPEG");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("High-performance batch converter")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);
                self.render_input_zone(ui);
                ui.add_space(10.0);
                self.render_queue(ui);
                ui.add_space(10.0);
                self.render_controls(ui);

                if !matches!(self.state.progress, RunProgress::Idle) {
                    ui.add_space(10.0);
                    self.render_progress(ui);
                }

                if !self.state.item_log.is_empty() {
                    ui.add_space(10.0);
                    self.render_details(ui);
                }

                if !self.state.results.is_empty() {
                    ui.add_space(10.0);
                    self.render_results(ui, ctx);
                }

                if let Some(error) = &self.state.error_message {
                    ui.add_space(10.0);
                    ui.vertical_centered(|ui| {
                        ui.colored_label(FAILURE_COLOR, error);
                    });
                }

                ui.add_space(20.0);
            });
        });
    }

    fn render_input_zone(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.add_enabled_ui(!self.state.is_running(), |ui| {
                ui.horizontal(|ui| {
                    if ui.button("📁 Add Files").clicked() {
                        if let Some(paths) = FileDialog::new()
                            .add_filter(
                                "RAW photos",
                                &["cr2", "cr3", "nef", "arw", "dng", "raf", "orf", "rw2", "pef", "srw"],
                            )
                            .pick_files()
                        {
                            self.add_paths(paths);
                        }
                    }
                    if ui.button("🗀 Add Folder").clicked() {
                        if let Some(folder) = FileDialog::new().pick_folder() {
                            self.add_folder(&folder);
                        }
                    }
                    ui.label(
                        RichText::new("or drop RAW files anywhere in this window")
                            .color(ui.visuals().text_color().gamma_multiply(0.6)),
                    );
                });
            });
        });
    }

    fn render_queue(&mut self, ui: &mut egui::Ui) {
        if self.state.queue.is_empty() {
            return;
        }

        let can_remove = self.state.progress == RunProgress::Idle;
        let mut remove_index = None;

        ui.group(|ui| {
            ui.label(format!("{} files queued", self.state.queue.len()));
            ui.add_space(4.0);
            egui::ScrollArea::vertical()
                .id_source("queue")
                .max_height(160.0)
                .show(ui, |ui| {
                    for (index, file) in self.state.queue.iter().enumerate() {
                        ui.horizontal(|ui| {
                            if ui
                                .add_enabled(can_remove, egui::Button::new("✖").small())
                                .clicked()
                            {
                                remove_index = Some(index);
                            }
                            ui.label(&file.name);
                            ui.label(
                                RichText::new(file_size::format_size(file.size))
                                    .color(ui.visuals().text_color().gamma_multiply(0.6)),
                            );
                        });
                    }
                });
        });

        if let Some(index) = remove_index {
            self.state.remove_queued(index);
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!self.state.is_running(), |ui| {
                egui::ComboBox::from_label("Quality")
                    .selected_text(self.config.quality.label())
                    .show_ui(ui, |ui| {
                        for tier in Quality::ALL {
                            ui.selectable_value(&mut self.config.quality, tier, tier.label());
                        }
                    });
            });

            ui.add_space(8.0);

            let can_start = !self.state.queue.is_empty() && !self.state.is_running();
            ui.add_enabled_ui(can_start, |ui| {
                let label = if self.state.is_running() {
                    "⏳ Converting..."
                } else {
                    "⚡ Start Conversion"
                };
                let button = egui::Button::new(label).min_size(egui::vec2(200.0, 40.0));
                if ui.add(button).clicked() {
                    self.start_run();
                }
            });

            if !self.state.results.is_empty() && !self.state.is_running() {
                ui.add_space(5.0);
                if ui.button("📦 Download All (ZIP)").clicked() {
                    self.download_all();
                }
            }

            if self.state.is_completed() {
                ui.add_space(5.0);
                if ui.button("🔄 Start New Batch").clicked() {
                    self.reset_batch();
                }
            }
        });
    }

    fn render_progress(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            if let Some(current) = &self.state.current_file {
                ui.label(format!("⚡ Converting: {current}"));
            }

            let fraction = self.state.progress_percent() as f32 / 100.0;
            let bar = egui::ProgressBar::new(fraction)
                .show_percentage()
                .fill(accent_color());
            ui.add(bar);

            ui.label(self.state.status_text());
        });
    }

    fn render_details(&mut self, ui: &mut egui::Ui) {
        if ui
            .button(if self.state.show_details {
                "Hide Details"
            } else {
                "Show Details"
            })
            .clicked()
        {
            self.state.show_details = !self.state.show_details;
        }

        if self.state.show_details {
            egui::ScrollArea::vertical()
                .id_source("details")
                .max_height(200.0)
                .show(ui, |ui| {
                    egui::Frame::none()
                        .fill(ui.style().visuals.extreme_bg_color)
                        .show(ui, |ui| {
                            ui.add_space(8.0);
                            for entry in &self.state.item_log {
                                match &entry.detail {
                                    ItemDetail::Converted { new_name } => {
                                        ui.horizontal(|ui| {
                                            ui.label("✅");
                                            ui.colored_label(
                                                SUCCESS_COLOR,
                                                format!("{} → {new_name}", entry.name),
                                            );
                                        });
                                    }
                                    ItemDetail::Failed(error) => {
                                        ui.horizontal(|ui| {
                                            ui.label("❌");
                                            ui.colored_label(
                                                FAILURE_COLOR,
                                                format!("{} - {error}", entry.name),
                                            );
                                        });
                                    }
                                }
                                ui.add_space(4.0);
                            }
                            ui.add_space(8.0);
                        });
                });
        }
    }

    fn render_results(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let mut save_index = None;

        ui.group(|ui| {
            ui.label(format!("{} converted photos", self.state.results.len()));
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for (index, item) in self.state.results.iter_mut().enumerate() {
                    ui.group(|ui| {
                        ui.vertical(|ui| {
                            ui.set_width(170.0);
                            match item.preview_texture(ctx) {
                                Some(texture) => {
                                    ui.add(
                                        egui::Image::new(texture)
                                            .max_width(160.0)
                                            .max_height(120.0),
                                    );
                                }
                                None => {
                                    ui.label("(no preview)");
                                }
                            }
                            ui.label(RichText::new(&item.new_name).strong());
                            ui.label(
                                RichText::new(&item.metadata.camera_model)
                                    .color(ui.visuals().text_color().gamma_multiply(0.6)),
                            );
                            if ui.button("Save JPEG").clicked() {
                                save_index = Some(index);
                            }
                        });
                    });
                }
            });
        });

        if let Some(index) = save_index {
            self.save_item(index);
        }
    }
}
