use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Record;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Question list (central panel)
// ---------------------------------------------------------------------------

/// Render the loading indicator, the empty state, or the question cards.
pub fn question_list(ui: &mut Ui, state: &AppState) {
    if state.loading {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.add(egui::Spinner::new().size(32.0));
                ui.label(RichText::new("Loading questions...").size(18.0));
            });
        });
        return;
    }

    if state.visible_indices.is_empty() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.heading("No questions found");
            ui.label(RichText::new("Try adjusting your search or filters.").weak());
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for record in state.visible_records() {
                let badge = record
                    .question_category()
                    .map(|c| state.category_colors.color_for(c))
                    .unwrap_or(Color32::GRAY);
                question_card(ui, record, badge);
                ui.add_space(8.0);
            }
        });
}

/// One question: year and category badges, numbered text, footer.
fn question_card(ui: &mut Ui, record: &Record, category_color: Color32) {
    egui::Frame::group(ui.style())
        .inner_margin(12.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui: &mut Ui| {
                ui.label(
                    RichText::new(format!("Year: {}", record.year().unwrap_or_default()))
                        .small()
                        .color(Color32::WHITE)
                        .background_color(Color32::from_rgb(37, 99, 235)),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                    ui.label(
                        RichText::new(record.question_category().unwrap_or_default())
                            .small()
                            .color(Color32::WHITE)
                            .background_color(category_color),
                    );
                });
            });
            ui.add_space(6.0);

            let (prefix, lines) = numbered_lines(record);
            let mut lines = lines.into_iter();
            ui.horizontal_wrapped(|ui: &mut Ui| {
                ui.label(RichText::new(prefix).strong().color(Color32::GRAY));
                if let Some(first) = lines.next() {
                    ui.label(first);
                }
            });
            for line in lines {
                ui.label(line);
            }

            ui.add_space(6.0);
            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                ui.label(RichText::new(record.sub_category_label()).italics().weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                    ui.label(RichText::new(record.source().unwrap_or_default()).small());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Text layout helpers
// ---------------------------------------------------------------------------

/// The `Q<n>.` prefix and the question's display lines.  The prefix is
/// rendered inline with the first line.
pub fn numbered_lines(record: &Record) -> (String, Vec<String>) {
    let prefix = format!("Q{}.", record.question_number().unwrap_or_default());
    let lines = match record.question_text() {
        Some(text) if !text.is_empty() => option_lines(text),
        _ => Vec::new(),
    };
    (prefix, lines)
}

/// Split question text into display lines, starting a new line at each
/// inline answer option `(a)`–`(d)` that sits between whitespace.
pub fn option_lines(text: &str) -> Vec<String> {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c.is_whitespace() && starts_option(&text[i + c.len_utf8()..]) {
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out.split('\n').map(str::to_string).collect()
}

fn starts_option(rest: &str) -> bool {
    let b = rest.as_bytes();
    b.len() > 3
        && b[0] == b'('
        && (b'a'..=b'd').contains(&b[1])
        && b[2] == b')'
        && rest[3..].chars().next().is_some_and(char::is_whitespace)
}
