//! Main application window
//!
//! Left panel: signal management, volume, playback effects, Butterworth
//! filter controls. Central panel: status and info lines, play button with
//! seek slider, waveform and spectrum plots.

use crate::plots::{build_plot_data, PlotData};
use egui::{Color32, RichText};
use egui_plot::{Line, Plot, PlotPoints};
use signal_workbench::audio::Recorder;
use signal_workbench::{Player, Workbench, DEFAULT_RECORD_SECS};
use std::time::Duration;

const STATUS_COLOR: Color32 = Color32::from_rgb(0x15, 0x65, 0xC0);
const WAVEFORM_COLOR: Color32 = Color32::from_rgb(0x19, 0x76, 0xD2);
const SPECTRUM_COLOR: Color32 = Color32::from_rgb(0xD3, 0x2F, 0x2F);

/// Seek slider resolution, in steps over the whole clip
const SEEK_STEPS: f64 = 1000.0;

pub struct WorkbenchApp {
    workbench: Workbench,
    player: Player,
    recorder: Option<Recorder>,
    plots: Option<PlotData>,

    status: String,
    cutoff_text: String,
    volume_percent: f32,
    seek: f64,
    seek_dragging: bool,
    error_message: Option<String>,
}

impl WorkbenchApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        match signal_workbench::audio::list_input_devices() {
            Ok(devices) => log::info!("{} input device(s) available", devices.len()),
            Err(e) => log::warn!("could not enumerate input devices: {}", e),
        }

        Self {
            workbench: Workbench::new(),
            player: Player::new(),
            recorder: None,
            plots: None,
            status: "Import or record a signal".to_owned(),
            cutoff_text: "2000".to_owned(),
            volume_percent: 100.0,
            seek: 0.0,
            seek_dragging: false,
            error_message: None,
        }
    }

    fn refresh_plots(&mut self) {
        self.plots = self.workbench.current().map(build_plot_data);
    }

    fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.error_message = Some(message);
    }

    // --- actions ---

    fn action_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("WAV audio", &["wav"])
            .pick_file()
        else {
            return;
        };

        self.player.stop();
        match self.workbench.load(&path) {
            Ok(()) => {
                self.seek = 0.0;
                self.refresh_plots();
                self.status = "Audio file imported".to_owned();
            }
            Err(e) => self.show_error(format!("Could not import {}: {}", path.display(), e)),
        }
    }

    fn action_record(&mut self) {
        match Recorder::start(DEFAULT_RECORD_SECS) {
            Ok(recorder) => {
                self.player.stop();
                self.recorder = Some(recorder);
                self.status = "Recording… speak now".to_owned();
            }
            Err(e) => self.show_error(format!("Could not start recording: {}", e)),
        }
    }

    fn action_export(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("WAV audio", &["wav"])
            .set_file_name("processed_audio.wav")
            .save_file()
        else {
            return;
        };

        match self.workbench.save(&path) {
            Ok(()) => self.status = format!("Audio saved to {}", path.display()),
            Err(e) => self.show_error(format!("Could not export {}: {}", path.display(), e)),
        }
    }

    fn action_reset(&mut self) {
        match self.workbench.reset() {
            Ok(()) => {
                self.refresh_plots();
                self.status = "Signal reset to original".to_owned();
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    fn action_reverse(&mut self) {
        match self.workbench.reverse() {
            Ok(()) => {
                self.refresh_plots();
                self.status = "Signal reversed".to_owned();
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    fn action_filter(&mut self, highpass: bool) {
        let cutoff_hz = match parse_cutoff(&self.cutoff_text) {
            Ok(v) => v,
            Err(msg) => {
                self.show_error(msg);
                return;
            }
        };

        let result = if highpass {
            self.workbench.highpass(cutoff_hz)
        } else {
            self.workbench.lowpass(cutoff_hz)
        };

        match result {
            Ok(()) => {
                self.refresh_plots();
                self.status = if highpass {
                    format!("High-pass filter applied at {} Hz", cutoff_hz)
                } else {
                    format!("Low-pass filter applied at {} Hz", cutoff_hz)
                };
            }
            Err(e) => self.show_error(format!("Filter failed: {}", e)),
        }
    }

    fn action_play(&mut self, start: f64, speed: f64) {
        let Some(clip) = self.workbench.current() else {
            return;
        };

        match self.player.play(clip, start, speed) {
            Ok(()) => {
                self.status = if speed > 1.0 {
                    format!("Playing at {:.0}× speed", speed)
                } else {
                    "Playing".to_owned()
                };
            }
            Err(e) => {
                let message = format!("Playback failed: {}", e);
                log::warn!("{}", message);
                self.error_message = Some(message);
            }
        }
    }

    // --- recording ---

    fn poll_recorder(&mut self, ctx: &egui::Context) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };

        if recorder.is_done() {
            let clip = recorder.finish();
            self.workbench.adopt_recording(clip);
            self.seek = 0.0;
            self.refresh_plots();
            self.status = "Recording finished".to_owned();
        } else {
            self.status = format!(
                "Recording… {:.1} / {:.1} s",
                recorder.seconds_captured(),
                recorder.duration_secs()
            );
            self.recorder = Some(recorder);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }

    // --- panels ---

    fn controls_panel(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.heading("Signal Workbench");
        ui.add_space(8.0);

        let has_signal = self.workbench.has_signal();
        let recording = self.recorder.is_some();

        ui.group(|ui| {
            ui.strong("Signal management");
            ui.vertical_centered_justified(|ui| {
                if ui.button("Import WAV…").clicked() {
                    self.action_import();
                }
                if ui
                    .add_enabled(!recording, egui::Button::new("Record (5 s)"))
                    .clicked()
                {
                    self.action_record();
                }
                if ui
                    .add_enabled(has_signal, egui::Button::new("Export WAV…"))
                    .clicked()
                {
                    self.action_export();
                }
                if ui
                    .add_enabled(has_signal, egui::Button::new("Reset to original"))
                    .clicked()
                {
                    self.action_reset();
                }
            });
        });

        ui.add_space(6.0);

        ui.group(|ui| {
            ui.strong("Volume");
            ui.add(
                egui::Slider::new(&mut self.volume_percent, 0.0..=200.0)
                    .suffix(" %")
                    .integer(),
            );
            ui.vertical_centered_justified(|ui| {
                if ui.button("Mute").clicked() {
                    self.volume_percent = 0.0;
                }
            });
        });

        ui.add_space(6.0);

        ui.group(|ui| {
            ui.strong("Playback effects");
            ui.vertical_centered_justified(|ui| {
                if ui
                    .add_enabled(has_signal, egui::Button::new("Play at 2× speed"))
                    .clicked()
                {
                    self.action_play(0.0, 2.0);
                }
                if ui
                    .add_enabled(has_signal, egui::Button::new("Reverse signal"))
                    .clicked()
                {
                    self.action_reverse();
                }
            });
        });

        ui.add_space(6.0);

        ui.group(|ui| {
            ui.strong("Butterworth filter");
            ui.horizontal(|ui| {
                ui.label("Cutoff (Hz):");
                ui.add(egui::TextEdit::singleline(&mut self.cutoff_text).desired_width(80.0));
            });
            ui.vertical_centered_justified(|ui| {
                if ui
                    .add_enabled(has_signal, egui::Button::new("Apply low-pass"))
                    .clicked()
                {
                    self.action_filter(false);
                }
                if ui
                    .add_enabled(has_signal, egui::Button::new("Apply high-pass"))
                    .clicked()
                {
                    self.action_filter(true);
                }
            });
        });
    }

    fn display_panel(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new(&self.status).strong().color(STATUS_COLOR));
        ui.label(RichText::new(self.info_line()).weak());
        ui.add_space(4.0);

        let has_signal = self.workbench.has_signal();

        ui.horizontal(|ui| {
            if ui
                .add_enabled(has_signal, egui::Button::new("▶ Play"))
                .clicked()
            {
                self.action_play(self.seek / SEEK_STEPS, 1.0);
            }

            ui.spacing_mut().slider_width = (ui.available_width() - 16.0).max(100.0);
            let response = ui.add_enabled(
                has_signal,
                egui::Slider::new(&mut self.seek, 0.0..=SEEK_STEPS).show_value(false),
            );
            if response.dragged() {
                self.seek_dragging = true;
            }
            if response.drag_stopped() {
                self.seek_dragging = false;
                self.action_play(self.seek / SEEK_STEPS, 1.0);
            }
        });

        ui.add_space(4.0);

        let plot_height = ((ui.available_height() - 48.0) / 2.0).max(120.0);

        ui.label("Waveform");
        let waveform: Vec<[f64; 2]> = self
            .plots
            .as_ref()
            .map(|p| p.waveform.clone())
            .unwrap_or_default();
        Plot::new("waveform")
            .height(plot_height)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(waveform))
                        .color(WAVEFORM_COLOR)
                        .width(1.0),
                );
            });

        ui.add_space(4.0);

        ui.label("Spectrum (0–8 kHz)");
        let spectrum: Vec<[f64; 2]> = self
            .plots
            .as_ref()
            .map(|p| p.spectrum.clone())
            .unwrap_or_default();
        Plot::new("spectrum")
            .height(plot_height)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(spectrum))
                        .color(SPECTRUM_COLOR)
                        .width(1.0),
                );
            });
    }

    fn info_line(&self) -> String {
        match self.workbench.info() {
            Some(info) => format!(
                "Duration: {:.2} s | Sample rate: {} Hz | Peak: {:.2}",
                info.duration_secs, info.sample_rate, info.peak
            ),
            None => "Duration: 0 s | Sample rate: 0 Hz | Peak: 0.0".to_owned(),
        }
    }

    fn error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_message.clone() else {
            return;
        };

        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(4.0);
                if ui.button("OK").clicked() {
                    self.error_message = None;
                }
            });
    }
}

impl eframe::App for WorkbenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_recorder(ctx);

        // Volume slider drives the player live
        self.player.set_volume(self.volume_percent / 100.0);

        egui::SidePanel::left("controls")
            .resizable(false)
            .exact_width(270.0)
            .show(ctx, |ui| self.controls_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.display_panel(ui));

        self.error_window(ctx);

        if self.player.is_playing() {
            if !self.seek_dragging {
                self.seek = self.player.progress() * SEEK_STEPS;
            }
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Parse the cutoff-frequency field
fn parse_cutoff(text: &str) -> Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid cutoff frequency \"{}\"", text.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cutoff_accepts_numbers() {
        assert_eq!(parse_cutoff("2000"), Ok(2000.0));
        assert_eq!(parse_cutoff(" 1500.5 "), Ok(1500.5));
    }

    #[test]
    fn test_parse_cutoff_rejects_garbage() {
        assert!(parse_cutoff("").is_err());
        assert!(parse_cutoff("2k").is_err());
        assert!(parse_cutoff("fast").is_err());
    }
}
