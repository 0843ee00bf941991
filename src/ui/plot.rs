use std::collections::BTreeMap;

use eframe::egui::{Align2, Color32, CornerRadius, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, MarkerShape, Plot, Points};

use crate::data::chart::{BarSeries, ChartData, PieSlice, ScatterPoint};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart panel (central panel)
// ---------------------------------------------------------------------------

/// Render the current chart in the central panel.
pub fn chart_panel(ui: &mut Ui, state: &AppState) {
    if state.chart.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No launches match the current filters.");
        });
        return;
    }

    match &state.chart {
        ChartData::Pie { slices } => pie_chart(ui, slices, state),
        ChartData::Scatter { points } => scatter_chart(ui, points, state),
        ChartData::Bar { series } => bar_chart(ui, series, state),
    }
}

// ---------------------------------------------------------------------------
// Scatter: payload mass (x) vs. launch site (y), coloured by booster
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, points: &[ScatterPoint], state: &AppState) {
    // Group per booster category so each gets one legend entry and colour.
    let mut by_category: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in points {
        by_category
            .entry(p.booster_category.as_str())
            .or_default()
            .push([p.payload_mass_kg, p.site_index as f64]);
    }

    let sites = state.dataset.sites.clone();
    let n_sites = sites.len();

    Plot::new("launch_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Site")
        .y_axis_formatter(move |mark, _range| site_axis_label(&sites, mark.value))
        .include_y(-0.5)
        .include_y(n_sites as f64 - 0.5)
        .show(ui, |plot_ui| {
            for (category, pts) in by_category {
                let color = state.booster_colors.color_for(category);
                plot_ui.points(
                    Points::new(pts)
                        .name(category)
                        .color(color)
                        .radius(3.5)
                        .shape(MarkerShape::Circle),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Bar: launch site (x) vs. payload mass (y), stacked per booster
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, series: &[BarSeries], state: &AppState) {
    let mut charts: Vec<BarChart> = Vec::new();
    for s in series {
        let color = state.booster_colors.color_for(&s.booster_category);
        let bars: Vec<Bar> = s
            .site_totals_kg
            .iter()
            .enumerate()
            .filter(|(_, &total)| total > 0.0)
            .map(|(site_index, &total)| Bar::new(site_index as f64, total).width(0.6))
            .collect();

        let mut chart = BarChart::new(bars)
            .name(&s.booster_category)
            .color(color);
        let below: Vec<&BarChart> = charts.iter().collect();
        if !below.is_empty() {
            chart = chart.stack_on(&below);
        }
        charts.push(chart);
    }

    let sites = state.dataset.sites.clone();
    let n_sites = sites.len();

    Plot::new("launch_bar")
        .legend(Legend::default())
        .x_axis_label("Launch Site")
        .y_axis_label("Payload Mass (kg)")
        .x_axis_formatter(move |mark, _range| site_axis_label(&sites, mark.value))
        .include_x(-0.5)
        .include_x(n_sites as f64 - 0.5)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Site name at integer axis marks, nothing at fractional grid lines.
fn site_axis_label(sites: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < sites.len() {
        sites[idx as usize].clone()
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// Pie: total payload mass per mission outcome
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, slices: &[PieSlice], state: &AppState) {
    let total: f64 = slices.iter().map(|s| s.total_payload_kg).sum();
    if total <= 0.0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Matching launches carried no payload mass.");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        // ---- Pie disc ----
        let side = ui
            .available_height()
            .min(ui.available_width() * 0.6)
            .clamp(160.0, 480.0);
        let (rect, _response) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = side * 0.5 - 8.0;

        // Start at 12 o'clock, sweep clockwise.
        let mut angle = -std::f64::consts::FRAC_PI_2;
        for slice in slices {
            let fraction = slice.total_payload_kg / total;
            let sweep = fraction * std::f64::consts::TAU;
            let color = state.outcome_colors.color_for(&slice.outcome);

            // Triangle fan; each segment stays convex no matter the sweep.
            let steps = ((sweep / 0.035).ceil() as usize).max(1);
            let mut prev = point_on_circle(center, radius, angle);
            for i in 1..=steps {
                let a = angle + sweep * i as f64 / steps as f64;
                let next = point_on_circle(center, radius, a);
                painter.add(Shape::convex_polygon(
                    vec![center, prev, next],
                    color,
                    Stroke::NONE,
                ));
                prev = next;
            }

            if fraction > 0.03 {
                let mid = angle + sweep / 2.0;
                painter.text(
                    point_on_circle(center, radius * 0.6, mid),
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", fraction * 100.0),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
            }
            angle += sweep;
        }

        // ---- Legend ----
        ui.vertical(|ui: &mut Ui| {
            ui.add_space(12.0);
            ui.strong("Mission Outcome");
            for slice in slices {
                let color = state.outcome_colors.color_for(&slice.outcome);
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter().rect_filled(swatch, CornerRadius::same(2), color);
                    ui.label(format!(
                        "{} : {:.0} kg ({:.1}%)",
                        slice.outcome,
                        slice.total_payload_kg,
                        100.0 * slice.total_payload_kg / total,
                    ));
                });
            }
        });
    });
}

fn point_on_circle(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    Pos2::new(
        center.x + radius * angle.cos() as f32,
        center.y + radius * angle.sin() as f32,
    )
}
