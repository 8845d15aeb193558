//! HTML Report Generator Module
//! Writes a self-contained page: P&L table, category select and one SVG
//! waterfall per category. The select toggles which chart is visible.

use crate::charts::{ChartRenderer, StaticChartRenderer};
use crate::controller::WaterfallController;
use crate::data::PnlTable;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fmt::Write as _;
use std::path::Path;

const STYLE: &str = "body{font-family:sans-serif;margin:24px;color:#282828}\
table{border-collapse:collapse;margin-bottom:24px}\
th,td{border:1px solid #ccc;padding:4px 10px;text-align:right}\
th:first-child,td:first-child{text-align:left}\
thead{background:#f2f2f2}\
select{margin-bottom:12px;font-size:14px}";

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub struct HtmlReport;

impl HtmlReport {
    /// Render every category's chart in parallel and assemble the page.
    pub fn generate(controller: &WaterfallController, pnl: Option<&PnlTable>) -> Result<String> {
        let config = controller.config().clone();
        let charts: Vec<(String, String)> = controller
            .categories()
            .par_iter()
            .map(|category| -> Result<(String, String)> {
                let bars = controller.bars_for(category)?;
                let state = ChartRenderer::new(config.clone()).render(&bars).state;
                let svg = StaticChartRenderer::render_svg(&state, config.font_size)
                    .with_context(|| format!("Failed to draw category '{category}'"))?;
                Ok((category.clone(), svg))
            })
            .collect::<Result<_>>()?;

        let mut html = String::new();
        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">")?;
        writeln!(html, "<title>Waterfall Report</title>\n<style>{STYLE}</style>\n</head>\n<body>")?;

        if let Some(table) = pnl {
            html.push_str(&Self::pnl_table(table));
        }

        writeln!(html, "<select id=\"category\">")?;
        for category in controller.categories() {
            let selected = if category == controller.selected() { " selected" } else { "" };
            let escaped = escape_html(category);
            writeln!(html, "<option value=\"{escaped}\"{selected}>{escaped}</option>")?;
        }
        writeln!(html, "</select>")?;

        writeln!(html, "<div id=\"chart\">")?;
        for (category, svg) in &charts {
            let hidden = if category == controller.selected() { "" } else { " hidden" };
            writeln!(html, "<div class=\"chart\"{hidden}>\n{svg}\n</div>")?;
        }
        writeln!(html, "</div>")?;

        let categories_json = serde_json::to_string(controller.categories())?.replace("</", "<\\/");
        writeln!(
            html,
            "<script>\nconst CATEGORIES = {categories_json};\n\
             const charts = document.querySelectorAll('#chart > .chart');\n\
             document.querySelector('#category').addEventListener('change', (event) => {{\n\
             \x20 const index = CATEGORIES.indexOf(event.target.value);\n\
             \x20 charts.forEach((chart, i) => {{ chart.hidden = i !== index; }});\n\
             }});\n</script>"
        )?;
        writeln!(html, "</body>\n</html>")?;

        Ok(html)
    }

    /// `<table>` with a header row and one formatted row per P&L line.
    pub fn pnl_table(table: &PnlTable) -> String {
        let mut html = String::from("<table>\n<thead><tr>");
        for header in table.header() {
            html.push_str(&format!("<th>{}</th>", escape_html(&header)));
        }
        html.push_str("</tr></thead>\n<tbody>\n");
        for row in &table.rows {
            html.push_str(&format!("<tr><td>{}</td>", escape_html(&row.name)));
            for cell in row.formatted_cells() {
                html.push_str(&format!("<td>{}</td>", escape_html(&cell)));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");
        html
    }

    pub fn write(
        controller: &WaterfallController,
        pnl: Option<&PnlTable>,
        path: &Path,
    ) -> Result<()> {
        let html = Self::generate(controller, pnl)?;
        std::fs::write(path, html)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        log::info!("Report written to {}", path.display());
        Ok(())
    }
}
