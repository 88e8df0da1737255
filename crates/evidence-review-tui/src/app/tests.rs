use std::time::Duration;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use evidence_review_core::{PLACEHOLDER_URL, Record, RecordSet, columns, parse_records};

use super::*;
use crate::action::Action;
use crate::tui_event::BackendEvent;

/// Create an App wired to a command channel the test can inspect.
fn test_app() -> (App, mpsc::UnboundedReceiver<BackendCommand>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(
        ImageResolver::new("http://localhost:5001/evidencias/", PLACEHOLDER_URL),
        AutosaveController::default(),
        Theme::hacker(),
    );
    app.backend_cmd_tx = Some(tx);
    (app, rx)
}

fn three_records() -> RecordSet {
    let headers = [
        columns::NOMBRE_A_VALIDAR,
        columns::LINK_IMAGEN,
        columns::NOMBRE_OK,
        columns::PERIODO_OK,
        columns::TAREA_OK,
    ]
    .map(String::from)
    .to_vec();
    let records = ["Ana", "Luis", "Marta"]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Record::from_pairs([
                (columns::NOMBRE_A_VALIDAR, name.to_string()),
                (columns::LINK_IMAGEN, format!("data/Evidencias 2024/img{i}.jpg")),
                (columns::NOMBRE_OK, "0".to_string()),
                (columns::PERIODO_OK, "1".to_string()),
                (columns::TAREA_OK, "0".to_string()),
            ])
        })
        .collect();
    RecordSet::new(headers, records)
}

/// App that has finished loading three records, with the load-time image
/// probe already drained from the channel.
fn loaded_app() -> (App, mpsc::UnboundedReceiver<BackendCommand>) {
    let (mut app, mut rx) = test_app();
    app.handle_backend_event(BackendEvent::Loaded(three_records()));
    drain(&mut rx);
    (app, rx)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<BackendCommand>) -> Vec<BackendCommand> {
    let mut out = Vec::new();
    while let Ok(cmd) = rx.try_recv() {
        out.push(cmd);
    }
    out
}

fn saves(cmds: &[BackendCommand]) -> Vec<(u64, SaveTrigger, String)> {
    cmds.iter()
        .filter_map(|c| match c {
            BackendCommand::Save { seq, trigger, csv } => Some((*seq, *trigger, csv.clone())),
            _ => None,
        })
        .collect()
}

fn cursor(app: &App) -> usize {
    app.session.as_ref().map(|s| s.cursor()).unwrap_or(usize::MAX)
}

// ── Loading ─────────────────────────────────────────────────────

#[test]
fn start_load_sends_load_command() {
    let (mut app, mut rx) = test_app();
    app.start_load();
    assert_eq!(app.screen, Screen::Loading);
    assert_eq!(drain(&mut rx), vec![BackendCommand::Load]);
}

#[test]
fn start_load_without_backend_fails() {
    let (mut app, rx) = test_app();
    drop(rx);
    app.start_load();
    assert!(matches!(app.screen, Screen::Failed(_)));
}

#[test]
fn loaded_enters_review_and_probes_first_image() {
    let (mut app, mut rx) = test_app();
    app.handle_backend_event(BackendEvent::Loaded(three_records()));

    assert_eq!(app.screen, Screen::Review);
    assert_eq!(cursor(&app), 0);
    assert_eq!(
        drain(&mut rx),
        vec![BackendCommand::ProbeImage {
            index: 0,
            url: "http://localhost:5001/evidencias/img0.jpg".to_string(),
        }]
    );
}

#[test]
fn load_failure_shows_error_and_reload_retries() {
    let (mut app, mut rx) = test_app();
    app.handle_backend_event(BackendEvent::LoadFailed {
        error: "server responded 404".to_string(),
    });
    assert_eq!(app.screen, Screen::Failed("server responded 404".to_string()));

    app.update(Action::Reload);
    assert_eq!(app.screen, Screen::Loading);
    assert_eq!(drain(&mut rx), vec![BackendCommand::Load]);
}

#[test]
fn reload_ignored_while_reviewing() {
    let (mut app, mut rx) = loaded_app();
    app.update(Action::Reload);
    assert_eq!(app.screen, Screen::Review);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn review_keys_ignored_before_load() {
    let (mut app, mut rx) = test_app();
    app.update(Action::NextRecord);
    app.update(Action::ToggleFlag(FlagField::Name));
    app.update(Action::Save);
    assert!(app.session.is_none());
    assert!(drain(&mut rx).is_empty());
}

// ── Toggle, navigate, save ──────────────────────────────────────

#[test]
fn toggle_then_next_sends_exactly_one_save() {
    let (mut app, mut rx) = loaded_app();

    app.update(Action::ToggleFlag(FlagField::Name));
    app.update(Action::NextRecord);

    let cmds = drain(&mut rx);
    let saves = saves(&cmds);
    assert_eq!(saves.len(), 1);
    let (_, trigger, csv) = &saves[0];
    assert_eq!(*trigger, SaveTrigger::Navigation);

    let sent = parse_records(csv).unwrap();
    assert_eq!(sent.records[0].get(columns::NOMBRE_OK), "1");
    assert_eq!(sent.records[1].get(columns::NOMBRE_OK), "0");
    assert_eq!(cursor(&app), 1);

    // The debounce armed by the toggle was superseded by the navigation save.
    app.poll_autosave(Instant::now() + Duration::from_secs(5));
    assert!(saves_of(&mut rx).is_empty());
}

fn saves_of(rx: &mut mpsc::UnboundedReceiver<BackendCommand>) -> Vec<(u64, SaveTrigger, String)> {
    saves(&drain(rx))
}

#[test]
fn navigation_probes_new_image() {
    let (mut app, mut rx) = loaded_app();
    app.update(Action::NextRecord);
    let cmds = drain(&mut rx);
    assert!(cmds.contains(&BackendCommand::ProbeImage {
        index: 1,
        url: "http://localhost:5001/evidencias/img1.jpg".to_string(),
    }));
}

#[test]
fn boundary_navigation_still_saves_but_stays_put() {
    let (mut app, mut rx) = loaded_app();
    app.update(Action::PrevRecord);
    assert_eq!(cursor(&app), 0);
    let saves = saves_of(&mut rx);
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].1, SaveTrigger::Navigation);
}

#[test]
fn toggle_twice_restores_value() {
    let (mut app, _rx) = loaded_app();
    app.update(Action::ToggleFlag(FlagField::Period));
    app.update(Action::ToggleFlag(FlagField::Period));
    let record = app.session.as_ref().and_then(|s| s.current()).unwrap();
    assert_eq!(record.get(columns::PERIODO_OK), "1");
}

#[test]
fn summary_tracks_toggles() {
    let (mut app, _rx) = loaded_app();
    assert_eq!(app.summary().count(FlagField::Name), 0);
    app.update(Action::ToggleFlag(FlagField::Name));
    assert_eq!(app.summary().count(FlagField::Name), 1);
    assert_eq!(app.summary().count(FlagField::Period), 3);
}

#[test]
fn debounced_save_fires_after_quiet_period() {
    let (mut app, mut rx) = loaded_app();
    app.update(Action::ToggleFlag(FlagField::Task));

    app.poll_autosave(Instant::now());
    assert!(saves_of(&mut rx).is_empty());
    assert!(app.autosave.has_unsent_changes());

    app.poll_autosave(Instant::now() + Duration::from_secs(3));
    let saves = saves_of(&mut rx);
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].1, SaveTrigger::Debounced);
}

#[test]
fn manual_save_sends_current_state() {
    let (mut app, mut rx) = loaded_app();
    app.update(Action::ToggleFlag(FlagField::Task));
    app.update(Action::Save);
    let saves = saves_of(&mut rx);
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].1, SaveTrigger::Manual);
    let sent = parse_records(&saves[0].2).unwrap();
    assert_eq!(sent.records[0].get(columns::TAREA_OK), "1");
}

#[test]
fn saves_during_flight_collapse_and_carry_latest_state() {
    let (mut app, mut rx) = loaded_app();
    app.update(Action::Save);
    let first = saves_of(&mut rx);
    assert_eq!(first.len(), 1);
    assert!(app.autosave.is_saving());

    // Two more triggers and an edit while the first save is in flight.
    app.update(Action::ToggleFlag(FlagField::Name));
    app.update(Action::Save);
    app.update(Action::NextRecord);
    assert!(saves_of(&mut rx).is_empty());

    app.handle_backend_event(BackendEvent::SaveFinished {
        seq: first[0].0,
        trigger: SaveTrigger::Manual,
        result: Ok(()),
    });
    let follow_up = saves_of(&mut rx);
    assert_eq!(follow_up.len(), 1);
    assert!(follow_up[0].0 > first[0].0);
    let sent = parse_records(&follow_up[0].2).unwrap();
    assert_eq!(sent.records[0].get(columns::NOMBRE_OK), "1");
}

#[test]
fn successful_save_records_timestamp() {
    let (mut app, mut rx) = loaded_app();
    app.update(Action::Save);
    let (seq, trigger, _) = saves_of(&mut rx).remove(0);
    app.handle_backend_event(BackendEvent::SaveFinished {
        seq,
        trigger,
        result: Ok(()),
    });
    assert!(app.last_saved.is_some());
    assert!(!app.autosave.is_saving());
    assert_eq!(
        app.toasts.latest().map(|t| t.kind),
        Some(ToastKind::Success)
    );
}

#[test]
fn failed_save_keeps_edits_and_reports() {
    let (mut app, mut rx) = loaded_app();
    app.update(Action::ToggleFlag(FlagField::Name));
    app.update(Action::Save);
    let (seq, trigger, _) = saves_of(&mut rx).remove(0);
    app.handle_backend_event(BackendEvent::SaveFinished {
        seq,
        trigger,
        result: Err("server responded 500".to_string()),
    });

    assert!(app.last_saved.is_none());
    assert_eq!(app.toasts.latest().map(|t| t.kind), Some(ToastKind::Error));
    let record = app.session.as_ref().and_then(|s| s.current()).unwrap();
    assert_eq!(record.get(columns::NOMBRE_OK), "1");
    assert!(!app.autosave.is_saving());
    assert!(app.autosave.has_unsent_changes());
    assert_eq!(app.save_status().0, "Unsaved changes");

    // Next trigger retries with the same edits.
    app.update(Action::Save);
    let retry = saves_of(&mut rx);
    assert_eq!(retry.len(), 1);
    let (seq, trigger, csv) = retry.into_iter().next().unwrap();
    assert!(csv.lines().nth(1).unwrap().ends_with(",1,1,0"));
    app.handle_backend_event(BackendEvent::SaveFinished {
        seq,
        trigger,
        result: Ok(()),
    });
    assert!(!app.autosave.has_unsent_changes());
}

#[test]
fn failure_after_success_does_not_show_saved() {
    let (mut app, mut rx) = loaded_app();
    app.update(Action::Save);
    let (seq, trigger, _) = saves_of(&mut rx).remove(0);
    app.handle_backend_event(BackendEvent::SaveFinished {
        seq,
        trigger,
        result: Ok(()),
    });
    assert!(app.save_status().0.starts_with("Saved "));

    app.update(Action::ToggleFlag(FlagField::Task));
    app.update(Action::Save);
    let (seq, trigger, _) = saves_of(&mut rx).remove(0);
    app.handle_backend_event(BackendEvent::SaveFinished {
        seq,
        trigger,
        result: Err("connection refused".to_string()),
    });

    assert_eq!(app.save_status().0, "Unsaved changes");
    app.update(Action::Quit);
    assert!(app.confirm_quit);
    assert!(app.autosave.has_unsent_changes());
}

#[test]
fn stale_save_completion_is_ignored() {
    let (mut app, mut rx) = loaded_app();
    app.update(Action::Save);
    let (old_seq, trigger, _) = saves_of(&mut rx).remove(0);

    // A reload resets the queue; the old completion must not surface.
    app.handle_backend_event(BackendEvent::Loaded(three_records()));
    drain(&mut rx);
    app.handle_backend_event(BackendEvent::SaveFinished {
        seq: old_seq,
        trigger,
        result: Err("late failure".to_string()),
    });

    assert_ne!(app.toasts.latest().map(|t| t.kind), Some(ToastKind::Error));
    assert!(saves_of(&mut rx).is_empty());
}

#[test]
fn save_without_backend_is_reported() {
    let (mut app, rx) = loaded_app();
    drop(rx);
    app.update(Action::Save);
    assert!(!app.autosave.is_saving());
    assert_eq!(app.toasts.latest().map(|t| t.kind), Some(ToastKind::Error));
}

// ── Zoom and pan ────────────────────────────────────────────────

#[test]
fn zoom_and_drag_reset_on_record_switch() {
    let (mut app, _rx) = loaded_app();
    app.last_image_area = Some(Rect::new(0, 0, 100, 40));

    for _ in 0..4 {
        app.update(Action::ZoomIn);
    }
    assert_eq!(app.session.as_ref().unwrap().viewport().zoom(), 2.0);

    app.update(Action::DragStart(10, 20));
    app.update(Action::DragMove(50, 10));
    app.update(Action::DragEnd);
    assert_eq!(app.session.as_ref().unwrap().viewport().offset(), (40, -10));

    app.update(Action::NextRecord);
    let viewport = app.session.as_ref().unwrap().viewport();
    assert_eq!(viewport.zoom(), 1.0);
    assert_eq!(viewport.offset(), (0, 0));
}

#[test]
fn drag_outside_image_panel_does_not_pan() {
    let (mut app, _rx) = loaded_app();
    app.last_image_area = Some(Rect::new(50, 0, 50, 40));
    app.update(Action::ZoomIn);
    app.update(Action::ZoomIn);

    app.update(Action::DragStart(10, 10));
    app.update(Action::DragMove(30, 30));
    assert_eq!(app.session.as_ref().unwrap().viewport().offset(), (0, 0));
}

#[test]
fn drag_hit_test_stops_at_panel_edge() {
    let (mut app, _rx) = loaded_app();
    app.last_image_area = Some(Rect::new(50, 0, 50, 40));
    app.update(Action::ZoomIn);
    app.update(Action::ZoomIn);

    // One past the right edge is outside the panel.
    app.update(Action::DragStart(100, 10));
    app.update(Action::DragMove(80, 10));
    app.update(Action::DragEnd);
    assert_eq!(app.session.as_ref().unwrap().viewport().offset(), (0, 0));

    app.update(Action::DragStart(99, 10));
    app.update(Action::DragMove(79, 15));
    app.update(Action::DragEnd);
    assert_eq!(app.session.as_ref().unwrap().viewport().offset(), (-20, 5));
}

#[test]
fn zoom_is_clamped_and_resettable() {
    let (mut app, _rx) = loaded_app();
    for _ in 0..20 {
        app.update(Action::ZoomIn);
    }
    assert_eq!(app.session.as_ref().unwrap().viewport().zoom(), 3.0);
    for _ in 0..20 {
        app.update(Action::ZoomOut);
    }
    assert_eq!(app.session.as_ref().unwrap().viewport().zoom(), 0.5);
    app.update(Action::ResetZoom);
    assert_eq!(app.session.as_ref().unwrap().viewport().zoom(), 1.0);
}

// ── Images ──────────────────────────────────────────────────────

#[test]
fn unavailable_image_falls_back_to_placeholder() {
    let (mut app, _rx) = loaded_app();
    app.handle_backend_event(BackendEvent::ImageUnavailable {
        index: 0,
        url: "http://localhost:5001/evidencias/img0.jpg".to_string(),
    });
    let slot = app.session.as_ref().and_then(|s| s.image()).unwrap();
    assert!(slot.is_placeholder());
    assert_eq!(slot.url(), PLACEHOLDER_URL);
}

#[test]
fn late_image_failure_for_previous_record_is_ignored() {
    let (mut app, _rx) = loaded_app();
    app.update(Action::NextRecord);
    app.handle_backend_event(BackendEvent::ImageUnavailable {
        index: 0,
        url: "http://localhost:5001/evidencias/img0.jpg".to_string(),
    });
    let slot = app.session.as_ref().and_then(|s| s.image()).unwrap();
    assert!(!slot.is_placeholder());
}

// ── Sidebar ─────────────────────────────────────────────────────

#[test]
fn sidebar_select_jumps_and_saves() {
    let (mut app, mut rx) = loaded_app();
    app.update(Action::ListDown);
    app.update(Action::ListDown);
    app.update(Action::ListDown);
    assert_eq!(app.list_cursor, 2);
    assert_eq!(cursor(&app), 0);

    app.update(Action::ListSelect);
    assert_eq!(cursor(&app), 2);
    assert_eq!(saves_of(&mut rx).len(), 1);
}

#[test]
fn hidden_sidebar_ignores_list_keys() {
    let (mut app, _rx) = loaded_app();
    app.update(Action::ToggleSidebar);
    assert!(!app.sidebar_visible);
    app.update(Action::ListDown);
    app.update(Action::ListSelect);
    assert_eq!(app.list_cursor, 0);
    assert_eq!(cursor(&app), 0);
}

// ── Modals ──────────────────────────────────────────────────────

#[test]
fn quit_requires_confirmation() {
    let (mut app, _rx) = loaded_app();
    assert!(!app.update(Action::Quit));
    assert!(app.confirm_quit);

    app.update(Action::NavigateBack);
    assert!(!app.confirm_quit);
    assert!(!app.should_quit);

    app.update(Action::Quit);
    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}

#[test]
fn force_quit_skips_confirmation() {
    let (mut app, _rx) = loaded_app();
    assert!(app.update(Action::ForceQuit));
    assert!(app.should_quit);
}

#[test]
fn help_swallows_next_key() {
    let (mut app, _rx) = loaded_app();
    app.update(Action::ToggleHelp);
    assert!(app.show_help);
    app.update(Action::NextRecord);
    assert!(!app.show_help);
    assert_eq!(cursor(&app), 0);
}

#[test]
fn empty_csv_reviews_nothing() {
    let (mut app, mut rx) = test_app();
    let empty = RecordSet::new(vec![columns::NOMBRE_OK.to_string()], Vec::new());
    app.handle_backend_event(BackendEvent::Loaded(empty));
    assert_eq!(app.screen, Screen::Review);
    app.update(Action::NextRecord);
    app.update(Action::ToggleFlag(FlagField::Name));
    assert_eq!(cursor(&app), 0);
    // Navigation still flushes, even with nothing to show.
    assert_eq!(saves_of(&mut rx).len(), 1);
}
