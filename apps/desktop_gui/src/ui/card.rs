//! Painting of the swipe card, its decision badges and action buttons.

use client_core::{CardCursor, CardView, CardVisual};
use eframe::egui;
use shared::domain::Choice;

pub const CARD_SIZE: egui::Vec2 = egui::vec2(380.0, 480.0);
const CARD_PADDING: f32 = 18.0;
const BADGE_HEIGHT: f32 = 40.0;

const SAVE_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 160, 67);
const SKIP_COLOR: egui::Color32 = egui::Color32::from_rgb(218, 54, 51);

/// Reserves the card slot. The response senses drags for the whole slot so a
/// card that has moved under the pointer keeps tracking it.
pub fn allocate_card(ui: &mut egui::Ui) -> (egui::Rect, egui::Response) {
    ui.allocate_exact_size(CARD_SIZE, egui::Sense::click_and_drag())
}

pub fn cursor_icon(cursor: CardCursor) -> egui::CursorIcon {
    match cursor {
        CardCursor::Default => egui::CursorIcon::Default,
        CardCursor::Grab => egui::CursorIcon::Grab,
        CardCursor::Grabbing => egui::CursorIcon::Grabbing,
    }
}

/// Paints the card offset and faded per `visual`. Returns the choice whose
/// button was clicked this frame.
pub fn paint_card(
    ui: &mut egui::Ui,
    slot: egui::Rect,
    view: &CardView<'_>,
    visual: &CardVisual,
    buttons_enabled: bool,
) -> Option<Choice> {
    let rect = slot.translate(egui::vec2(visual.translate_x, 0.0));
    let mut pressed = None;

    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect.shrink(CARD_PADDING))
            .layout(egui::Layout::top_down(egui::Align::Min)),
    );
    child.multiply_opacity(visual.opacity);

    paint_background(&child, rect, visual.rotation_deg);
    paint_badge(&child, rect, Choice::Save, visual.save_label_opacity);
    paint_badge(&child, rect, Choice::Skip, visual.skip_label_opacity);

    child.add_space(BADGE_HEIGHT);
    child.heading(view.title);
    if let Some(price) = &view.price {
        child.label(egui::RichText::new(price).strong());
    }
    child.add_space(6.0);
    meta_row(&mut child, "Date", view.date.as_deref());
    meta_row(&mut child, "Organizer", view.organizer);

    if !view.chips.is_empty() {
        child.add_space(6.0);
        child.horizontal_wrapped(|ui| {
            for chip in &view.chips {
                ui.label(
                    egui::RichText::new(format!(" {chip} "))
                        .small()
                        .background_color(ui.visuals().faint_bg_color),
                );
            }
        });
    }

    if let Some(description) = view.description {
        child.add_space(8.0);
        child.label(description);
    }
    if let Some(url) = view.picture_url {
        child.hyperlink_to("View picture", url);
    }

    child.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
        ui.horizontal(|ui| {
            let button_size = egui::vec2(120.0, 36.0);
            let skip = egui::Button::new(egui::RichText::new("Skip").color(SKIP_COLOR))
                .min_size(button_size);
            if ui.add_enabled(buttons_enabled, skip).clicked() {
                pressed = Some(Choice::Skip);
            }
            let save = egui::Button::new(egui::RichText::new("Save").color(SAVE_COLOR))
                .min_size(button_size);
            if ui.add_enabled(buttons_enabled, save).clicked() {
                pressed = Some(Choice::Save);
            }
        });
    });

    pressed
}

fn meta_row(ui: &mut egui::Ui, label: &str, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).weak());
        ui.label(value);
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect, rotation_deg: f32) {
    let rotation = egui::emath::Rot2::from_angle(rotation_deg.to_radians());
    let center = rect.center();
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ]
    .map(|corner| center + rotation * (corner - center));

    let visuals = ui.visuals();
    ui.painter().add(egui::Shape::convex_polygon(
        corners.to_vec(),
        visuals.extreme_bg_color,
        visuals.widgets.noninteractive.bg_stroke,
    ));
}

fn paint_badge(ui: &egui::Ui, rect: egui::Rect, choice: Choice, opacity: f32) {
    if opacity <= 0.0 {
        return;
    }
    let (anchor, align, color) = match choice {
        Choice::Save => (
            rect.left_top() + egui::vec2(CARD_PADDING, CARD_PADDING),
            egui::Align2::LEFT_TOP,
            SAVE_COLOR,
        ),
        Choice::Skip => (
            rect.right_top() + egui::vec2(-CARD_PADDING, CARD_PADDING),
            egui::Align2::RIGHT_TOP,
            SKIP_COLOR,
        ),
    };
    ui.painter().text(
        anchor,
        align,
        choice.label().to_ascii_uppercase(),
        egui::FontId::proportional(26.0),
        color.gamma_multiply(opacity),
    );
}
