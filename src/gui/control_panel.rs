//! Control Panel Widget
//! Left side panel: data sources, category selector, export and status.

use egui::{Color32, ComboBox, RichText};
use std::path::{Path, PathBuf};

/// Left side control panel.
///
/// The category selector never changes the selection itself; it reports the
/// user's choice as [`ControlPanelAction::CategoryChanged`] and the app pushes
/// the accepted selection back with [`ControlPanel::set_selected`].
pub struct ControlPanel {
    pub data_path: Option<PathBuf>,
    pub pnl_path: Option<PathBuf>,
    categories: Vec<String>,
    selected: Option<String>,
    pub status: String,
    pub is_error: bool,
    pub busy: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            data_path: None,
            pnl_path: None,
            categories: Vec::new(),
            selected: None,
            status: "Ready".to_string(),
            is_error: false,
            busy: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selector entries after a dataset load.
    pub fn update_categories(&mut self, categories: Vec<String>, selected: &str) {
        self.categories = categories;
        self.selected = Some(selected.to_string());
    }

    pub fn set_selected(&mut self, category: &str) {
        self.selected = Some(category.to_string());
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = true;
    }

    /// The action for a click on `category` in the selector.
    fn pick(&self, category: &str) -> ControlPanelAction {
        if self.selected.as_deref() == Some(category) {
            ControlPanelAction::None
        } else {
            ControlPanelAction::CategoryChanged(category.to_string())
        }
    }

    fn file_label(path: Option<&Path>) -> String {
        path.and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "No file selected".to_string())
    }

    fn file_row(ui: &mut egui::Ui, title: &str, path: Option<&Path>) -> bool {
        let mut clicked = false;
        ui.label(RichText::new(title).size(13.0).strong());
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let color = if path.is_some() {
                        ui.visuals().text_color()
                    } else {
                        Color32::GRAY
                    };
                    ui.label(RichText::new(Self::file_label(path)).size(12.0).color(color));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        clicked = ui.button("📂 Browse").clicked();
                    });
                });
            });
        clicked
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Waterfall Viewer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Sources =====
        ui.add_enabled_ui(!self.busy, |ui| {
            if Self::file_row(ui, "📁 Waterfall Data", self.data_path.as_deref()) {
                action = ControlPanelAction::BrowseData;
            }
            ui.add_space(8.0);
            if Self::file_row(ui, "📁 P&L Table", self.pnl_path.as_deref()) {
                action = ControlPanelAction::BrowsePnl;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Category Selector =====
        ui.label(RichText::new("🔧 Category").size(14.0).strong());
        ui.add_space(5.0);

        ui.add_enabled_ui(!self.categories.is_empty(), |ui| {
            ComboBox::from_id_salt("category")
                .width(200.0)
                .selected_text(self.selected.clone().unwrap_or_default())
                .show_ui(ui, |ui| {
                    for category in &self.categories {
                        let is_selected = self.selected.as_deref() == Some(category.as_str());
                        if ui.selectable_label(is_selected, category).clicked() {
                            action = self.pick(category);
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!self.categories.is_empty(), |ui| {
                let button = egui::Button::new(RichText::new("📄 Export HTML").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportReport;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        if self.busy {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));
            });
        } else {
            let status_color = if self.is_error {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        }

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseData,
    BrowsePnl,
    CategoryChanged(String),
    ExportReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picking_current_category_is_no_action() {
        let mut panel = ControlPanel::new();
        panel.update_categories(vec!["A".into(), "B".into()], "A");
        assert_eq!(panel.pick("A"), ControlPanelAction::None);
        assert_eq!(
            panel.pick("B"),
            ControlPanelAction::CategoryChanged("B".into())
        );
        // selection is only changed by the owner
        assert_eq!(panel.selected(), Some("A"));
    }

    #[test]
    fn status_tracks_errors() {
        let mut panel = ControlPanel::new();
        panel.set_error("Error: boom");
        assert!(panel.is_error);
        panel.set_status("Loaded");
        assert!(!panel.is_error);
    }

    #[test]
    fn file_label_shows_name_only() {
        let path = PathBuf::from("/tmp/data/waterfall.csv");
        assert_eq!(ControlPanel::file_label(Some(&path)), "waterfall.csv");
        assert_eq!(ControlPanel::file_label(None), "No file selected");
    }
}
