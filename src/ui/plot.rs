use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{generate_palette, Scheme};
use crate::data::aggregate::CountRow;
use crate::data::summary::Bin;

const PLOT_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Category bar chart
// ---------------------------------------------------------------------------

/// One bar per row, labelled with the row value on the x axis.
pub fn bar_chart(
    ui: &mut Ui,
    id: &str,
    title: &str,
    axis_labels: (&str, &str),
    rows: &[CountRow],
    scheme: Scheme,
) {
    ui.label(RichText::new(title).strong());
    if rows.is_empty() {
        ui.weak("Nothing to plot.");
        return;
    }

    let colors = generate_palette(scheme, rows.len());
    let bars: Vec<Bar> = rows
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (row, color))| {
            Bar::new(i as f64, row.count as f64)
                .name(&row.value)
                .fill(color)
                .width(0.8)
        })
        .collect();

    let labels: Vec<String> = rows.iter().map(|r| r.value.clone()).collect();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .x_axis_label(axis_labels.0)
        .y_axis_label(axis_labels.1)
        .allow_scroll(false)
        .allow_drag(true)
        .allow_zoom(true)
        .x_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v >= 0.0 && v.fract() == 0.0 {
                labels.get(v as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(title));
        });
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Histogram of pre-computed bins.
pub fn histogram(ui: &mut Ui, id: &str, title: &str, axis_labels: (&str, &str), bins: &[Bin], hue: u16) {
    ui.label(RichText::new(title).strong());
    if bins.is_empty() {
        ui.weak("No values to plot.");
        return;
    }

    let color = generate_palette(Scheme::Solid(hue), 1)[0];
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new(b.center(), b.count as f64)
                .width(b.width())
                .name(format!("{:.1} – {:.1}", b.start, b.end))
                .fill(color)
        })
        .collect();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .x_axis_label(axis_labels.0)
        .y_axis_label(axis_labels.1)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(title).color(color));
        });
}
