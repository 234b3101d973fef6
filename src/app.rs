use std::path::{Path, PathBuf};

use egui::{Color32, Rect, TextureHandle, TextureOptions, pos2, vec2};

use crate::config::SketchConfig;
use crate::error::{ConfigError, ExportError};
use crate::event::RepaintRequester;
use crate::input::{InputEvent, InputHandler};
use crate::sketchpad::Sketchpad;
use crate::tools::{ActiveTool, MarkerTool, StampChoice};

/// Screen points per logical canvas unit
const DISPLAY_SCALE: f32 = 2.0;

/// The desktop front-end: buttons, the canvas widget and export to disk.
pub struct SketchApp {
    sketchpad: Sketchpad,
    input: InputHandler,
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    markers: Vec<(String, MarkerTool)>,
    stamps: Vec<StampChoice>,
    custom_stamp: String,
    export_path: PathBuf,
    status: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Result<Self, ConfigError> {
        let sketchpad = Sketchpad::new(&config)?;
        sketchpad.subscribe(Box::new(RepaintRequester::new(cc.egui_ctx.clone())));

        let logical_size = vec2(config.canvas_width as f32, config.canvas_height as f32);
        Ok(Self {
            sketchpad,
            input: InputHandler::new(logical_size),
            texture: None,
            uploaded_revision: None,
            markers: config.marker_tools()?,
            stamps: config.stamp_choices()?,
            custom_stamp: String::new(),
            export_path: config.export_path,
            status: None,
        })
    }

    fn dispatch(&mut self, input: InputEvent) {
        match self.sketchpad.handle(input) {
            Ok(Some(png)) => self.save_export(&png),
            Ok(None) => {}
            Err(err) => {
                log::error!("Export failed: {err}");
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }

    fn save_export(&mut self, png: &[u8]) {
        match write_png(&self.export_path, png) {
            Ok(()) => {
                log::info!("Saved export to {}", self.export_path.display());
                self.status = Some(format!("Saved {}", self.export_path.display()));
            }
            Err(err) => {
                log::error!("Could not save {}: {err}", self.export_path.display());
                self.status = Some(format!("Could not save: {err}"));
            }
        }
    }

    fn add_custom_stamp(&mut self) {
        match StampChoice::new(self.custom_stamp.as_str()) {
            Ok(choice) => {
                log::info!("Added custom stamp {:?}", choice.label());
                self.custom_stamp.clear();
                self.stamps.push(choice.clone());
                self.dispatch(InputEvent::SelectStamp(choice));
                self.status = None;
            }
            Err(err) => {
                log::warn!("Rejected custom stamp: {err}");
                self.status = Some(err.to_string());
            }
        }
    }

    fn tools_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("tools_panel")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| {
                ui.heading("Markers");
                let active = self.sketchpad.controller().active_tool().clone();
                let mut picked = Vec::new();

                for (label, marker) in &self.markers {
                    let selected = active == ActiveTool::Marker(*marker);
                    if ui.selectable_label(selected, label.as_str()).clicked() {
                        picked.push(InputEvent::SelectMarker(*marker));
                    }
                }

                ui.separator();
                ui.heading("Stamps");
                ui.horizontal_wrapped(|ui| {
                    for choice in &self.stamps {
                        let selected = matches!(&active, ActiveTool::Stamp(s) if s.glyph() == choice.label());
                        if ui.selectable_label(selected, choice.label()).clicked() {
                            picked.push(InputEvent::SelectStamp(choice.clone()));
                        }
                    }
                });

                let mut add_custom = false;
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(&mut self.custom_stamp).desired_width(80.0));
                    add_custom = ui.button("Add").clicked();
                });

                ui.separator();
                let history = self.sketchpad.controller().history();
                let (can_undo, can_redo) = (history.can_undo(), history.can_redo());
                ui.horizontal(|ui| {
                    if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                        picked.push(InputEvent::Undo);
                    }
                    if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                        picked.push(InputEvent::Redo);
                    }
                });
                if ui.button("Clear").clicked() {
                    picked.push(InputEvent::Clear);
                }
                if ui.button("Export PNG").clicked() {
                    picked.push(InputEvent::Export);
                }

                ui.separator();
                ui.label(format!("State: {}", self.sketchpad.controller().state().name()));
                if let Some(status) = &self.status {
                    ui.label(status.as_str());
                }

                for input in picked {
                    self.dispatch(input);
                }
                if add_custom {
                    self.add_custom_stamp();
                }
            });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let size = self.sketchpad.surface().logical_size() * DISPLAY_SCALE;
        let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
        self.input.set_canvas_rect(rect);

        for input in self.input.process_input(ui.ctx()) {
            self.dispatch(input);
        }

        let revision = self.sketchpad.revision();
        if self.uploaded_revision != Some(revision) {
            let image = self.sketchpad.surface().to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture =
                        Some(ui.ctx().load_texture("sketchpad-canvas", image, TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = Some(revision);
        }

        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            ui.painter().image(texture.id(), rect, uv, Color32::WHITE);
        }
        ui.painter()
            .rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Color32::BLACK));
    }
}

fn write_png(path: &Path, png: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, png)?;
    Ok(())
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tools_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Sketchpad");
            self.canvas(ui);
        });
    }
}
