use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

use crate::error::Result;
use crate::processing::measure::StatsReport;

/// Output formats supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

const NOT_AVAILABLE: &str = "n/a";

/// Format one statistic with `precision` decimals. Empty groups print as "n/a".
pub fn format_value(value: f64, precision: usize) -> String {
    if value.is_nan() {
        NOT_AVAILABLE.to_string()
    } else {
        format!("{value:.precision$}")
    }
}

/// Header and body rows shared by the table and CSV renderers.
///
/// One column per group, labelled with the group key; three rows per measure.
pub fn grid(report: &StatsReport, precision: usize) -> (Vec<String>, Vec<Vec<String>>) {
    let mut header = vec!["Measure".to_string()];
    header.extend(report.keys.iter().map(|k| format!("Class {k}")));

    let mut rows = Vec::with_capacity(report.measures.len() * 3);
    for m in &report.measures {
        for (name, values) in [
            ("Mean", &m.stats.mean),
            ("Median", &m.stats.median),
            ("Mode", &m.stats.mode),
        ] {
            let mut row = vec![format!("{} {name}", m.label)];
            row.extend(values.iter().map(|v| format_value(*v, precision)));
            rows.push(row);
        }
    }
    (header, rows)
}

pub fn build_table(report: &StatsReport, precision: usize) -> Table {
    let (header, rows) = grid(report, precision);
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.into_iter().map(Cell::new));
    for row in rows {
        table.add_row(row.into_iter().enumerate().map(|(i, text)| {
            let cell = Cell::new(text);
            if i == 0 {
                cell
            } else {
                cell.set_alignment(CellAlignment::Right)
            }
        }));
    }
    table
}

pub fn render_table(report: &StatsReport, precision: usize) -> String {
    build_table(report, precision).to_string()
}

pub fn render_csv(report: &StatsReport, precision: usize) -> Result<String> {
    let (header, rows) = grid(report, precision);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Full report as JSON. Statistics of empty groups serialize as `null`.
pub fn render_json(report: &StatsReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render(report: &StatsReport, format: OutputFormat, precision: usize) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(report, precision)),
        OutputFormat::Csv => render_csv(report, precision),
        OutputFormat::Json => render_json(report),
    }
}
