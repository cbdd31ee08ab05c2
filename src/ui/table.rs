use eframe::egui::{Id, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{CountRow, MeanRow, PairCountRow};

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 320.0;

/// Format an optional number, showing missing values as `n/a`.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "n/a".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Generic virtualized table
// ---------------------------------------------------------------------------

/// Render `n_rows` rows; `cell(row, col)` produces the text for one cell.
/// Only visible rows are formatted, so large tables stay cheap.
pub fn show_table(
    ui: &mut Ui,
    id_salt: impl std::hash::Hash,
    headers: &[&str],
    n_rows: usize,
    cell: impl Fn(usize, usize) -> String,
) {
    if n_rows == 0 {
        ui.weak("No rows.");
        return;
    }
    ui.push_id(Id::new(id_salt), |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .columns(Column::auto().at_least(60.0).clip(true), headers.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for h in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*h);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, n_rows, |mut row| {
                    let r = row.index();
                    for c in 0..headers.len() {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell(r, c));
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Typed tables
// ---------------------------------------------------------------------------

pub fn count_table(ui: &mut Ui, id_salt: &str, value_header: &str, rows: &[CountRow]) {
    show_table(ui, id_salt, &[value_header, "count"], rows.len(), |r, c| {
        let row = &rows[r];
        match c {
            0 => row.value.clone(),
            _ => row.count.to_string(),
        }
    });
}

pub fn pair_table(ui: &mut Ui, id_salt: &str, headers: [&str; 2], rows: &[PairCountRow]) {
    show_table(ui, id_salt, &[headers[0], headers[1], "count"], rows.len(), |r, c| {
        let row = &rows[r];
        match c {
            0 => row.first.clone(),
            1 => row.second.clone(),
            _ => row.count.to_string(),
        }
    });
}

/// `headers` names the key column followed by one header per mean.
pub fn mean_table(ui: &mut Ui, id_salt: &str, headers: &[&str], rows: &[MeanRow], decimals: usize) {
    show_table(ui, id_salt, headers, rows.len(), |r, c| {
        let row = &rows[r];
        match c {
            0 => row.key.clone(),
            _ => fmt_opt(row.means.get(c - 1).copied().flatten(), decimals),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_numbers_render_as_na() {
        assert_eq!(fmt_opt(None, 2), "n/a");
        assert_eq!(fmt_opt(Some(3.14159), 2), "3.14");
        assert_eq!(fmt_opt(Some(4.0), 0), "4");
    }
}
