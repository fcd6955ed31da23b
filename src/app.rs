use eframe::{egui, App, NativeOptions};
use std::time::Instant;

use crate::analysis::TextAnalyzer;
use crate::analyze_and_format;
use crate::config::WindowConfig;
use crate::types::analysis_data::PosFilter;

pub struct TextLensApp {
    analyzer: TextAnalyzer,
    input_text: String,
    pos_filter: PosFilter,
    output_text: String,
    process_error: Option<String>,
}

impl TextLensApp {
    pub fn new(analyzer: TextAnalyzer) -> Self {
        Self {
            analyzer,
            input_text: String::new(),
            pos_filter: PosFilter::All,
            output_text: String::new(),
            process_error: None,
        }
    }

    pub fn set_input(&mut self, text: &str) {
        self.input_text = text.to_string();
    }

    pub fn set_pos_filter(&mut self, pos_filter: PosFilter) {
        self.pos_filter = pos_filter;
    }

    pub fn output(&self) -> &str {
        &self.output_text
    }

    pub fn error(&self) -> Option<&str> {
        self.process_error.as_deref()
    }

    /// Runs on "Process Text". The output is only replaced on success; a
    /// failure leaves it as it was and shows the error instead.
    pub fn process_text(&mut self) {
        let started = Instant::now();
        match analyze_and_format(&self.analyzer, &self.input_text, self.pos_filter) {
            Ok(results) => {
                self.output_text.clear();
                self.output_text.push_str(&results);
                self.process_error = None;
                tracing::debug!(
                    "Processed {} chars with filter {} in {:?}",
                    self.input_text.chars().count(),
                    self.pos_filter,
                    started.elapsed()
                );
            }
            Err(e) => {
                tracing::error!("Processing failed: {}", e);
                self.process_error = Some(e.to_string());
            }
        }
    }

    fn clear_input(&mut self) {
        self.input_text.clear();
        self.process_error = None;
    }

    fn clear_output(&mut self) {
        self.output_text.clear();
        self.process_error = None;
    }
}

impl App for TextLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Clear Input").clicked() {
                        self.clear_input();
                        ui.close_menu();
                    }
                    if ui.button("Clear Output").clicked() {
                        self.clear_output();
                        ui.close_menu();
                    }
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        egui::TopBottomPanel::top("input_panel").resizable(true).show(ctx, |ui| {
            ui.add_space(5.0);
            ui.label("Enter Text:");
            egui::ScrollArea::vertical().id_source("input_scroll").max_height(220.0).show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.input_text)
                        .desired_rows(10)
                        .desired_width(f32::INFINITY),
                );
            });

            ui.add_space(5.0);
            ui.label("Filter by POS Tag:");
            egui::ComboBox::from_id_source("pos_filter")
                .selected_text(self.pos_filter.label())
                .show_ui(ui, |ui| {
                    for filter in PosFilter::ALL {
                        ui.selectable_value(&mut self.pos_filter, filter, filter.label());
                    }
                });

            ui.add_space(5.0);
            if ui.button("Process Text").clicked() {
                self.process_text();
            }
            if let Some(err) = &self.process_error {
                ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
            }
            ui.add_space(5.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Output:");
            egui::ScrollArea::both().id_source("output_scroll").auto_shrink([false, false]).show(ui, |ui| {
                // A &str buffer is read-only but still selectable for copying.
                let mut display = self.output_text.as_str();
                ui.add(
                    egui::TextEdit::multiline(&mut display)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY),
                );
            });
        });
    }
}

pub fn run(window: &WindowConfig, analyzer: TextAnalyzer) -> Result<(), eframe::Error> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(window.title.clone())
            .with_inner_size([window.width, window.height])
            .with_min_inner_size([400.0, 350.0]),
        ..Default::default()
    };
    tracing::info!("Opening window '{}'", window.title);
    eframe::run_native(&window.title, options, Box::new(move |_cc| Box::new(TextLensApp::new(analyzer))))
}
