use std::time::{Duration, Instant};

use client_core::{
    card::counter_label, CardKey, CardView, FeedSession, GestureInput, GestureReaction,
    GestureRecognizer, EXIT_ANIMATION,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{CategoryMap, Choice};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::card;

const IDLE_REPAINT: Duration = Duration::from_millis(100);

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Auth => "Authentication",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

/// Gesture state bound to one card of one feed generation.
struct ActiveCard {
    generation: u64,
    position: usize,
    recognizer: GestureRecognizer,
    exit_started: Option<Instant>,
}

impl ActiveCard {
    fn new(generation: u64, position: usize, threshold: f32) -> Self {
        Self {
            generation,
            position,
            recognizer: GestureRecognizer::with_threshold(threshold),
            exit_started: None,
        }
    }

    fn exit_progress(&self) -> f32 {
        self.exit_started
            .map(|started| (started.elapsed().as_secs_f32() / EXIT_ANIMATION.as_secs_f32()).min(1.0))
            .unwrap_or(0.0)
    }
}

pub struct SwipeApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: FeedSession,
    categories: CategoryMap,
    active_card: Option<ActiveCard>,
    swipe_threshold: f32,
    loading: bool,
    status: String,
    backend_error: Option<UiError>,
}

impl SwipeApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        swipe_threshold: f32,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            session: FeedSession::default(),
            categories: CategoryMap::default(),
            active_card: None,
            swipe_threshold,
            loading: false,
            status: String::new(),
            backend_error: None,
        };
        app.request_feed();
        app
    }

    fn request_feed(&mut self) {
        if dispatch_backend_command(&self.cmd_tx, BackendCommand::LoadFeed, &mut self.status) {
            self.loading = true;
            self.status = "Loading your feed...".to_string();
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::FeedLoaded(events) => {
                    self.loading = false;
                    self.status = format!("{} events in your feed", events.len());
                    self.session.load_succeeded(events);
                    self.active_card = None;
                }
                UiEvent::FeedFailed(err) => {
                    self.loading = false;
                    self.status.clear();
                    if err.requires_reauth() {
                        self.status =
                            "Session rejected; update the access token and restart.".to_string();
                    }
                    self.session.load_failed(err.message());
                    self.active_card = None;
                }
                UiEvent::CategoriesLoaded(categories) => {
                    self.categories = CategoryMap::from_categories(categories);
                }
                UiEvent::DecisionSettled { ticket, result } => {
                    let reauth = result.as_ref().err().is_some_and(UiError::requires_reauth);
                    let outcome = self.session.complete_submission(ticket, result);
                    tracing::debug!(?outcome, "decision settled");
                    if reauth {
                        self.status =
                            "Session rejected; update the access token and restart.".to_string();
                    }
                }
                UiEvent::Error(err) => {
                    self.loading = false;
                    tracing::error!(context = ?err.context(), "{}", err.message());
                    self.backend_error = Some(err);
                }
            }
        }
    }

    /// Keeps exactly one recognizer per visible card. A retired recognizer is
    /// replaced once its submission has settled without advancing.
    fn sync_active_card(&mut self) {
        if self.session.current_item().is_none() {
            self.active_card = None;
            return;
        }
        let generation = self.session.generation();
        let position = self.session.position();
        let submitting = self.session.is_submitting();

        let replace = match &self.active_card {
            Some(card) => {
                card.generation != generation
                    || card.position != position
                    || (card.recognizer.is_retired() && !submitting)
            }
            None => true,
        };
        if replace {
            self.active_card = Some(ActiveCard::new(generation, position, self.swipe_threshold));
        }
        if let Some(card) = &mut self.active_card {
            card.recognizer.set_disabled(submitting || self.loading);
        }
    }

    fn feed_input(&mut self, input: GestureInput) {
        let reaction = match &mut self.active_card {
            Some(card) => card.recognizer.handle(input),
            None => return,
        };
        self.apply_reaction(reaction);
    }

    fn apply_reaction(&mut self, reaction: GestureReaction) {
        match reaction {
            GestureReaction::Committing(_) => {
                if let Some(card) = &mut self.active_card {
                    card.exit_started = Some(Instant::now());
                }
            }
            GestureReaction::Committed(choice) => self.submit(choice),
            GestureReaction::Ignored
            | GestureReaction::DragStarted
            | GestureReaction::Dragged { .. }
            | GestureReaction::SnappedBack => {}
        }
    }

    fn submit(&mut self, choice: Choice) {
        let Some(ticket) = self.session.begin_submission(choice) else {
            return;
        };
        let cmd = BackendCommand::SubmitDecision { ticket };
        if !dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            let reason = self.status.clone();
            self.session.complete_submission(ticket, Err(reason));
        }
    }

    fn tick_exit_animation(&mut self, ctx: &egui::Context) {
        let finished = match &mut self.active_card {
            Some(card) if card.exit_started.is_some() => {
                if card.exit_progress() >= 1.0 {
                    card.exit_started = None;
                    Some(card.recognizer.animation_finished())
                } else {
                    ctx.request_repaint();
                    None
                }
            }
            _ => None,
        };
        if let Some(reaction) = finished {
            self.apply_reaction(reaction);
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (left, right) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
            )
        });
        if left {
            self.feed_input(GestureInput::Key(CardKey::ArrowLeft));
        }
        if right {
            self.feed_input(GestureInput::Key(CardKey::ArrowRight));
        }
    }

    fn show_status(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("Event Swipe");
            ui.separator();
            ui.label(&self.status);
            if self.session.is_submitting() {
                ui.spinner();
            }
        });

        if let Some(err) = &self.backend_error {
            ui.colored_label(
                ui.visuals().error_fg_color,
                format!("{}: {}", err_label(err.category()), err.message()),
            );
        }

        let mut dismiss = false;
        if let Some(banner) = self.session.banner() {
            ui.horizontal(|ui| {
                ui.colored_label(ui.visuals().warn_fg_color, banner.user_message())
                    .on_hover_text(banner.detail());
                dismiss = ui.small_button("Dismiss").clicked();
            });
        }
        if dismiss {
            self.session.dismiss_banner();
        }
    }

    fn show_feed(&mut self, ui: &mut egui::Ui) {
        if self.loading && self.session.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        }

        let Some(event) = self.session.current_item().cloned() else {
            self.show_empty_state(ui);
            return;
        };
        let Some(active) = &self.active_card else {
            return;
        };
        if active.recognizer.is_retired() {
            // Flown out; waiting for the submission to settle.
            ui.vertical_centered(|ui| {
                ui.add_space(160.0);
                ui.spinner();
            });
            return;
        }
        let visual = active.recognizer.visual(active.exit_progress());
        let dragging = active.recognizer.is_dragging();
        let buttons_enabled = !active.recognizer.is_disabled() && !active.recognizer.is_committing();
        let counter = counter_label(self.session.position(), self.session.len());

        let mut inputs = Vec::new();
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.label(egui::RichText::new(counter).weak());
            ui.add_space(8.0);

            let (slot, response) = card::allocate_card(ui);
            let response = response.on_hover_cursor(card::cursor_icon(visual.cursor));

            // The card owns the pointer while dragged, so nothing behind it scrolls.
            let press_x = ui.input(|i| i.pointer.press_origin()).map(|pos| pos.x);
            let pointer_x = response.interact_pointer_pos().map(|pos| pos.x);
            if response.drag_started() {
                if let Some(x) = press_x.or(pointer_x) {
                    inputs.push(GestureInput::Start { x });
                }
            }
            if response.dragged() {
                if let Some(x) = pointer_x {
                    inputs.push(GestureInput::Move { x });
                }
            }
            if response.drag_stopped() {
                inputs.push(GestureInput::End);
            } else if dragging && !response.contains_pointer() {
                inputs.push(GestureInput::Leave);
            }

            let view = CardView::new(&event, &self.categories);
            if let Some(choice) = card::paint_card(ui, slot, &view, &visual, buttons_enabled) {
                inputs.push(GestureInput::Button(choice));
            }
        });

        for input in inputs {
            self.feed_input(input);
        }
        if visual.animate && visual.translate_x != 0.0 {
            ui.ctx().request_repaint();
        }
    }

    fn show_empty_state(&mut self, ui: &mut egui::Ui) {
        let mut reload = false;
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.heading("No more events");
            ui.label("You've reached the end of your recommendations.");
            ui.add_space(12.0);
            reload = ui
                .add_enabled(!self.loading, egui::Button::new("Reload feed"))
                .clicked();
        });
        if reload {
            self.request_feed();
        }
    }
}

impl eframe::App for SwipeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.sync_active_card();
        self.tick_exit_animation(ctx);
        self.sync_active_card();
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| self.show_status(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.show_feed(ui));

        ctx.request_repaint_after(IDLE_REPAINT);
    }
}

#[cfg(test)]
#[path = "../tests/app_tests.rs"]
mod tests;
