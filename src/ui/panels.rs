use eframe::egui::{self, RichText, Ui};

use crate::data::chart::ChartKind;
use crate::data::filter::SiteSelection;
use crate::state::{AppState, PAYLOAD_SLIDER_MAX, PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_STEP};
use crate::ui::widgets;

// ---------------------------------------------------------------------------
// Left side panel – dashboard controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch Filters");
    ui.separator();

    // Clone the site list so we can mutate state inside the combo closure.
    let sites = state.dataset.sites.clone();

    // ---- Site selector ----
    ui.strong("Launch site");
    egui::ComboBox::from_id_salt("site_select")
        .width(ui.available_width())
        .selected_text(state.site.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            let all_selected = state.site == SiteSelection::AllSites;
            if ui.selectable_label(all_selected, "All Sites").clicked() {
                state.site = SiteSelection::AllSites;
            }
            for site in &sites {
                let selected = matches!(&state.site, SiteSelection::Site(s) if s == site);
                if ui.selectable_label(selected, site).clicked() {
                    state.site = SiteSelection::Site(site.clone());
                }
            }
        });
    ui.add_space(8.0);

    // ---- Chart type selector ----
    ui.strong("Chart type");
    egui::ComboBox::from_id_salt("chart_kind")
        .width(ui.available_width())
        .selected_text(state.chart_kind.label())
        .show_ui(ui, |ui: &mut Ui| {
            for kind in ChartKind::ALL {
                if ui
                    .selectable_label(state.chart_kind == kind, kind.label())
                    .clicked()
                {
                    state.chart_kind = kind;
                }
            }
        });
    ui.add_space(8.0);

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    widgets::range_slider(
        ui,
        &mut state.payload_range,
        PAYLOAD_SLIDER_MIN,
        PAYLOAD_SLIDER_MAX,
        PAYLOAD_SLIDER_STEP,
    );
    ui.label(format!(
        "{:.0} to {:.0} kg",
        state.payload_range.lo, state.payload_range.hi
    ));

    // Recompute the filtered rows and chart after any control change.
    state.refresh();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("Launch Records Dashboard").strong());
        ui.separator();
        ui.label(format!(
            "{} launches loaded, {} in view",
            state.dataset.len(),
            state.filtered.len()
        ));
        ui.separator();
        ui.label(state.site.to_string());
    });
}
