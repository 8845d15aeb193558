//! P&L table widget.

use crate::data::PnlTable;
use egui::RichText;

pub struct PnlTableView;

impl PnlTableView {
    pub fn show(ui: &mut egui::Ui, table: &PnlTable) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("pnl_table")
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in table.header() {
                            ui.label(RichText::new(header).strong().size(12.0));
                        }
                        ui.end_row();

                        for row in &table.rows {
                            ui.label(RichText::new(&row.name).size(12.0));
                            for cell in row.formatted_cells() {
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| ui.label(RichText::new(cell).size(12.0).monospace()),
                                );
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
