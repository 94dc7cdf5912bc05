use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{Selection, ALL};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – search and filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Prelims Question Bank");
    ui.label(RichText::new("Search and analyze previous year questions.").weak());
    ui.separator();

    // ---- Search ----
    ui.strong("Search");
    let mut term = state.criteria.search_term.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut term)
            .hint_text("Search by keyword or question number...")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        state.set_search_term(&term);
    }
    ui.add_space(8.0);

    // ---- Facets ----
    ui.strong("Year");
    if let Some(year) = facet_combo(
        ui,
        "year_filter",
        &state.year_options,
        &state.criteria.year,
        "All Years",
    ) {
        state.set_year(year);
    }
    ui.add_space(4.0);

    ui.strong("Subject");
    if let Some(category) = facet_combo(
        ui,
        "category_filter",
        &state.category_options,
        &state.criteria.category,
        "All Subjects",
    ) {
        state.set_category(category);
    }
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Showing {} questions", state.visible_indices.len()));
        if state.criteria.is_active() && ui.small_button("Clear filters").clicked() {
            state.clear_filters();
        }
    });
}

/// A combo box over facet labels.  Returns the new selection when the user
/// picks a different entry.
fn facet_combo(
    ui: &mut Ui,
    id: &str,
    options: &[String],
    current: &Selection,
    all_label: &str,
) -> Option<Selection> {
    let display = |label: &str| -> String {
        if label == ALL {
            all_label.to_string()
        } else {
            label.to_string()
        }
    };

    let current_label = current.to_string();
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(display(current_label.as_str()))
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                let is_current = *option == current_label;
                let clicked = ui
                    .selectable_label(is_current, display(option.as_str()))
                    .clicked();
                if clicked && !is_current {
                    picked = Some(Selection::from(option.as_str()));
                }
            }
        });
    picked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(ui.ctx(), state);
                ui.close_menu();
            }
            let can_reload = state.data_path.is_some() && !state.loading;
            if ui.add_enabled(can_reload, egui::Button::new("Reload")).clicked() {
                let ctx = ui.ctx().clone();
                state.reload(move || ctx.request_repaint());
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.loading {
            ui.label(format!(
                "{} questions loaded, {} visible",
                state.dataset.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(path) = &state.data_path {
            ui.separator();
            ui.label(RichText::new(path.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(ctx: &egui::Context, state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open question bank")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        let ctx = ctx.clone();
        state.begin_load(path, move || ctx.request_repaint());
    }
}
