//! Waterfall Viewer Main Application
//! Main window with control panel, animated chart and P&L table.

use crate::config::ChartConfig;
use crate::controller::WaterfallController;
use crate::data::{DataLoader, PnlTable, Record};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, PnlTableView};
use crate::report::HtmlReport;
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Records {
        path: PathBuf,
        records: Vec<Record>,
    },
    Pnl {
        path: PathBuf,
        table: PnlTable,
    },
    Error {
        path: PathBuf,
        message: String,
    },
}

/// Main application window.
pub struct WaterfallApp {
    config: ChartConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    controller: Option<WaterfallController>,
    pnl: Option<PnlTable>,

    // Async CSV loading
    load_tx: Sender<LoadResult>,
    load_rx: Receiver<LoadResult>,
    pending_loads: usize,
}

impl WaterfallApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: ChartConfig,
        data_path: Option<PathBuf>,
        pnl_path: Option<PathBuf>,
    ) -> Self {
        let (load_tx, load_rx) = channel();
        let mut app = Self {
            chart_viewer: ChartViewer::new(&config),
            config,
            control_panel: ControlPanel::new(),
            controller: None,
            pnl: None,
            load_tx,
            load_rx,
            pending_loads: 0,
        };

        if let Some(path) = data_path {
            app.start_load(path, false);
        }
        if let Some(path) = pnl_path {
            app.start_load(path, true);
        }
        app
    }

    /// Read a CSV on a background thread; the result arrives through the channel.
    fn start_load(&mut self, path: PathBuf, is_pnl: bool) {
        log::info!("Loading {}", path.display());
        if is_pnl {
            self.control_panel.pnl_path = Some(path.clone());
        } else {
            self.control_panel.data_path = Some(path.clone());
        }
        self.control_panel.set_status("Loading CSV file...");
        self.control_panel.busy = true;
        self.pending_loads += 1;

        let tx = self.load_tx.clone();
        thread::spawn(move || {
            let result = if is_pnl {
                DataLoader::load_pnl(&path).map(|table| LoadResult::Pnl {
                    path: path.clone(),
                    table,
                })
            } else {
                DataLoader::load_records(&path).map(|records| LoadResult::Records {
                    path: path.clone(),
                    records,
                })
            };
            let message = result.unwrap_or_else(|e| LoadResult::Error {
                path,
                message: e.to_string(),
            });
            let _ = tx.send(message);
        });
    }

    fn handle_browse(&mut self, is_pnl: bool) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path, is_pnl);
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self, now: f64) {
        while let Ok(result) = self.load_rx.try_recv() {
            self.pending_loads = self.pending_loads.saturating_sub(1);
            self.control_panel.busy = self.pending_loads > 0;

            match result {
                LoadResult::Records { path, records } => {
                    let count = records.len();
                    match WaterfallController::new(records, self.config.clone()) {
                        Ok(controller) => {
                            self.control_panel
                                .update_categories(controller.categories().to_vec(), controller.selected());
                            self.chart_viewer
                                .set_frame(controller.selected(), controller.frame(), now);
                            self.control_panel.set_status(&format!(
                                "Loaded {} rows, {} categories",
                                count,
                                controller.categories().len()
                            ));
                            self.controller = Some(controller);
                        }
                        Err(e) => {
                            log::error!("{}: {}", path.display(), e);
                            self.control_panel.set_error(&format!("Error: {e}"));
                        }
                    }
                }
                LoadResult::Pnl { path, table } => {
                    log::info!("Loaded P&L table {} ({} rows)", path.display(), table.rows.len());
                    self.control_panel
                        .set_status(&format!("Loaded P&L table, {} rows", table.rows.len()));
                    self.pnl = Some(table);
                }
                LoadResult::Error { path, message } => {
                    log::error!("Failed to load {}: {}", path.display(), message);
                    self.control_panel.set_error(&format!("Error: {message}"));
                }
            }
        }
    }

    fn handle_category_changed(&mut self, category: &str, now: f64) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        match controller.select(category) {
            Ok(frame) => {
                self.chart_viewer.set_frame(category, frame, now);
                self.control_panel.set_selected(category);
            }
            Err(e) => {
                log::warn!("{}", e);
                self.control_panel.set_error(&format!("Error: {e}"));
            }
        }
    }

    /// Write the HTML report and open it in the browser.
    fn handle_export_report(&mut self) {
        let Some(controller) = &self.controller else {
            self.control_panel.set_error("No data to export");
            return;
        };

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("HTML", &["html"])
            .set_file_name("waterfall_report.html")
            .save_file()
        else {
            return; // User cancelled
        };

        match HtmlReport::write(controller, self.pnl.as_ref(), &output_path) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Report exported: {}", output_path.display()));
                if let Err(e) = open::that(&output_path) {
                    log::warn!("Could not open {}: {}", output_path.display(), e);
                }
            }
            Err(e) => {
                log::error!("Export failed: {:#}", e);
                self.control_panel.set_error(&format!("Export error: {e:#}"));
            }
        }
    }
}

impl eframe::App for WaterfallApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.check_load_results(now);

        // Request repaint while loading
        if self.pending_loads > 0 {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseData => self.handle_browse(false),
                        ControlPanelAction::BrowsePnl => self.handle_browse(true),
                        ControlPanelAction::CategoryChanged(category) => {
                            self.handle_category_changed(&category, now)
                        }
                        ControlPanelAction::ExportReport => self.handle_export_report(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart and P&L table
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.chart_viewer.show(ui);

                if let Some(table) = &self.pnl {
                    ui.add_space(20.0);
                    ui.label(egui::RichText::new("Profit & Loss").size(18.0).strong());
                    ui.add_space(8.0);
                    PnlTableView::show(ui, table);
                }
            });
        });
    }
}
