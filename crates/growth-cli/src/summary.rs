//! Terminal tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use growth_model::{CohortResultRow, Gender, MeasurementType, ReferenceStore};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// One row per individual with each measurement and its score.
pub fn cohort_table(rows: &[CohortResultRow]) -> Table {
    let mut table = Table::new();
    let mut header = vec![
        header_cell("ID"),
        header_cell("Gender"),
        header_cell("Age"),
        header_cell("Adjusted age"),
    ];
    for measurement in MeasurementType::ALL {
        header.push(header_cell(measurement.as_str()));
        header.push(header_cell(&format!("{measurement} SD")));
    }
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 2..table.column_count() {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for row in rows {
        let mut cells = vec![
            Cell::new(&row.id).add_attribute(Attribute::Bold),
            Cell::new(&row.provided_gender),
            Cell::new(format!("{:.3}", row.age_years)),
            Cell::new(format!("{:.3}", row.adjusted_age_years)),
        ];
        for measurement in MeasurementType::ALL {
            let score = row.score(measurement);
            cells.push(value_cell(score.value));
            cells.push(score_cell(score.z));
        }
        table.add_row(cells);
    }
    table
}

/// Key/value table for a single calculation.
pub fn zscore_table(z: f64, nearest_age_years: f64, age_years: f64) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Result"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("z-score"), score_cell(Some(z))]);
    table.add_row(vec![
        Cell::new("Nearest reference age (years)"),
        Cell::new(format!("{nearest_age_years:.4}")),
    ]);
    table.add_row(vec![
        Cell::new("Adjusted age (years)"),
        Cell::new(format!("{age_years:.4}")),
    ]);
    table
}

/// Loaded datasets with row counts per measurement and gender.
pub fn datasets_table(store: &ReferenceStore) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Measurement"),
        header_cell("Male rows"),
        header_cell("Female rows"),
        header_cell("Age range (years)"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    for dataset in store.datasets() {
        for measurement in MeasurementType::ALL {
            let Ok(reference) = store.table(dataset, measurement) else {
                continue;
            };
            let (min, max) = reference
                .rows()
                .iter()
                .map(|row| row.age_years)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), age| {
                    (lo.min(age), hi.max(age))
                });
            let range = if reference.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(format!("{min:.2} to {max:.2}"))
            };
            table.add_row(vec![
                Cell::new(dataset).fg(Color::Blue).add_attribute(Attribute::Bold),
                Cell::new(measurement),
                Cell::new(reference.rows_for(Gender::Male).count()),
                Cell::new(reference.rows_for(Gender::Female).count()),
                range,
            ]);
        }
    }
    table
}

fn value_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format!("{value}")),
        None => dim_cell("-"),
    }
}

fn score_cell(z: Option<f64>) -> Cell {
    match z {
        Some(z) if z.abs() >= 2.0 => Cell::new(format!("{z:.3}"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Some(z) => Cell::new(format!("{z:.3}")),
        None => dim_cell("-"),
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
