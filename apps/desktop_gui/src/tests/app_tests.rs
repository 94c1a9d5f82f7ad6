use super::*;

use crossbeam_channel::bounded;
use shared::domain::{Event, EventId};

use crate::controller::events::UiErrorContext;

fn event(id: i64) -> Event {
    Event {
        id: EventId(id),
        title: format!("Event {id}"),
        price: None,
        date: None,
        organizer_name: None,
        category_ids: Vec::new(),
        description: None,
        picture_url: None,
    }
}

fn loaded_app(
    events: Vec<Event>,
) -> (SwipeApp, Receiver<BackendCommand>, Sender<UiEvent>) {
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(8);
    let mut app = SwipeApp::bootstrap(cmd_tx, ui_rx, 120.0);
    assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::LoadFeed)));
    assert!(app.loading);

    ui_tx.send(UiEvent::FeedLoaded(events)).expect("send feed");
    app.process_ui_events();
    app.sync_active_card();
    (app, cmd_rx, ui_tx)
}

/// Drives the active card's exit animation to completion.
fn finish_exit(app: &mut SwipeApp) {
    let reaction = app
        .active_card
        .as_mut()
        .expect("active card")
        .recognizer
        .animation_finished();
    app.apply_reaction(reaction);
}

#[test]
fn key_commit_queues_one_submission_and_advances_on_success() {
    let (mut app, cmd_rx, ui_tx) = loaded_app(vec![event(1), event(2)]);
    assert!(!app.loading);

    app.feed_input(GestureInput::Key(CardKey::ArrowRight));
    assert!(app.active_card.as_ref().expect("card").exit_started.is_some());
    finish_exit(&mut app);
    assert!(app.session.is_submitting());

    let ticket = match cmd_rx.try_recv() {
        Ok(BackendCommand::SubmitDecision { ticket }) => ticket,
        other => panic!("expected submission, got {other:?}"),
    };
    assert_eq!(ticket.decision().event_id, EventId(1));
    assert!(ticket.decision().liked);

    app.sync_active_card();
    app.feed_input(GestureInput::Button(Choice::Skip));
    assert!(cmd_rx.try_recv().is_err());

    ui_tx
        .send(UiEvent::DecisionSettled {
            ticket,
            result: Ok(()),
        })
        .expect("settle");
    app.process_ui_events();
    app.sync_active_card();

    assert_eq!(app.session.position(), 1);
    let card = app.active_card.as_ref().expect("next card");
    assert_eq!(card.position, 1);
    assert!(!card.recognizer.is_disabled());
}

#[test]
fn rejected_submission_keeps_card_and_rearms_gestures() {
    let (mut app, cmd_rx, ui_tx) = loaded_app(vec![event(1)]);

    app.feed_input(GestureInput::Button(Choice::Skip));
    finish_exit(&mut app);
    let ticket = match cmd_rx.try_recv() {
        Ok(BackendCommand::SubmitDecision { ticket }) => ticket,
        other => panic!("expected submission, got {other:?}"),
    };

    ui_tx
        .send(UiEvent::DecisionSettled {
            ticket,
            result: Err(UiError::from_message(
                UiErrorContext::SubmitDecision,
                "failed to submit swipe: connection reset",
            )),
        })
        .expect("settle");
    app.process_ui_events();
    app.sync_active_card();

    assert_eq!(app.session.position(), 0);
    assert!(app.session.banner().is_some());
    let card = app.active_card.as_ref().expect("same card");
    assert!(!card.recognizer.is_retired());
    assert!(card.exit_started.is_none());
}

#[test]
fn undeliverable_submission_releases_the_guard() {
    let (mut app, cmd_rx, _ui_tx) = loaded_app(vec![event(1)]);
    drop(cmd_rx);

    app.feed_input(GestureInput::Key(CardKey::ArrowLeft));
    finish_exit(&mut app);

    assert!(!app.session.is_submitting());
    assert_eq!(app.session.position(), 0);
    assert!(app.session.banner().is_some());
    assert!(app.status.contains("disconnected"));
}

#[test]
fn feed_failure_shows_empty_state_with_banner() {
    let (cmd_tx, _cmd_rx) = bounded::<BackendCommand>(8);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(8);
    let mut app = SwipeApp::bootstrap(cmd_tx, ui_rx, 120.0);

    ui_tx
        .send(UiEvent::FeedFailed(UiError::from_message(
            UiErrorContext::FeedLoad,
            "failed to fetch feed: HTTP 401",
        )))
        .expect("send");
    app.process_ui_events();
    app.sync_active_card();

    assert!(!app.loading);
    assert!(app.active_card.is_none());
    assert_eq!(
        app.session.banner().map(|b| b.user_message()),
        Some("Could not load your event feed. Please try again.")
    );
    assert!(app.status.contains("access token"));
}
