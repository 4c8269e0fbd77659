use std::path::PathBuf;
use std::sync::Once;

use capture_core::{update, AppState, Effect, Msg, SessionState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(capture_logging::initialize_for_tests);
}

fn started_state(dir: &str) -> (AppState, Vec<Effect>) {
    let state = AppState::new();
    let (state, _) = update(state, Msg::DirChanged(dir.to_string()));
    update(state, Msg::StartClicked)
}

#[test]
fn start_without_directory_is_rejected_with_a_log_line() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = update(state, Msg::StartClicked);
    let view = next.view();

    assert_eq!(view.session, SessionState::Idle);
    assert!(effects.is_empty());
    assert!(view.log.iter().any(|line| line.contains("save directory")));
}

#[test]
fn start_with_directory_enters_scanning_and_launches_capture() {
    init_logging();
    let (next, effects) = started_state("  /tmp/images  ");
    let view = next.view();

    assert_eq!(view.session, SessionState::Scanning);
    assert!(!view.can_start);
    assert_eq!(
        effects,
        vec![Effect::StartCapture {
            save_dir: PathBuf::from("/tmp/images"),
        }]
    );
}

#[test]
fn start_is_ignored_while_a_run_is_active() {
    init_logging();
    let (state, _) = started_state("/tmp/images");

    let (next, effects) = update(state, Msg::StartClicked);

    assert_eq!(next.view().session, SessionState::Scanning);
    assert!(effects.is_empty());
}

#[test]
fn scan_completion_seeds_counter_and_waits_for_login() {
    init_logging();
    let (state, _) = started_state("/tmp/images");

    let (next, effects) = update(state, Msg::ScanCompleted { existing: 7 });
    let view = next.view();

    assert_eq!(view.session, SessionState::WaitingForAuth);
    assert_eq!(view.saved_count, 7);
    assert!(effects.is_empty());
    assert!(view.log.iter().any(|line| line.contains("7 images")));
}

#[test]
fn scan_failure_is_reported_and_ends_the_run() {
    init_logging();
    let (state, _) = started_state("/tmp/images");

    let (next, effects) = update(
        state,
        Msg::ScanFailed {
            reason: "permission denied".to_string(),
        },
    );
    let view = next.view();

    assert_eq!(view.session, SessionState::Stopped);
    assert!(view.can_start);
    assert!(effects.is_empty());
    assert!(view
        .log
        .iter()
        .any(|line| line.contains("permission denied")));
}

#[test]
fn authentication_moves_the_run_into_capturing() {
    init_logging();
    let (state, _) = started_state("/tmp/images");
    let (state, _) = update(state, Msg::ScanCompleted { existing: 0 });

    let (next, _) = update(state, Msg::Authenticated);

    assert_eq!(next.view().session, SessionState::Capturing);
}

#[test]
fn saved_images_increment_the_counter_and_log_the_path() {
    init_logging();
    let (state, _) = started_state("/tmp/images");
    let (state, _) = update(state, Msg::ScanCompleted { existing: 2 });
    let (state, _) = update(state, Msg::Authenticated);

    let (next, _) = update(
        state,
        Msg::ImageSaved {
            url: "https://chat.example/webwxgetmsgimg?id=1".to_string(),
            path: PathBuf::from("/tmp/images/0123456789abcdef0123456789abcdef.jpg"),
        },
    );
    let view = next.view();

    assert_eq!(view.saved_count, 3);
    assert!(view
        .log
        .iter()
        .any(|line| line.contains("saved: /tmp/images/0123456789abcdef0123456789abcdef.jpg")));
}

#[test]
fn fetch_failure_is_logged_without_counting() {
    init_logging();
    let (state, _) = started_state("/tmp/images");
    let (state, _) = update(state, Msg::ScanCompleted { existing: 0 });
    let (state, _) = update(state, Msg::Authenticated);

    let (next, _) = update(
        state,
        Msg::FetchFailed {
            url: "https://chat.example/webwxgetmsgimg?id=2".to_string(),
            reason: "http status 404".to_string(),
        },
    );
    let view = next.view();

    assert_eq!(view.saved_count, 0);
    assert_eq!(view.session, SessionState::Capturing);
    assert!(view.log.iter().any(|line| line.contains("http status 404")));
}

#[test]
fn stop_while_waiting_for_auth_requests_worker_stop() {
    init_logging();
    let (state, _) = started_state("/tmp/images");
    let (state, _) = update(state, Msg::ScanCompleted { existing: 0 });

    let (state, effects) = update(state, Msg::StopClicked);
    assert_eq!(effects, vec![Effect::StopCapture]);
    // Still WaitingForAuth until the worker confirms it exited.
    assert_eq!(state.view().session, SessionState::WaitingForAuth);

    let (next, _) = update(state, Msg::CaptureStopped);
    assert_eq!(next.view().session, SessionState::Stopped);
}

#[test]
fn stop_with_no_active_run_is_a_reported_noop() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = update(state, Msg::StopClicked);

    assert!(effects.is_empty());
    assert!(next
        .view()
        .log
        .iter()
        .any(|line| line.contains("no capture in progress")));
}

#[test]
fn session_failure_is_surfaced_and_ends_the_run() {
    init_logging();
    let (state, _) = started_state("/tmp/images");
    let (state, _) = update(state, Msg::ScanCompleted { existing: 0 });

    let (next, _) = update(
        state,
        Msg::SessionFailed {
            reason: "webdriver connect error: connection refused".to_string(),
        },
    );
    let view = next.view();

    assert_eq!(view.session, SessionState::Stopped);
    assert!(view
        .log
        .iter()
        .any(|line| line.contains("connection refused")));
}

#[test]
fn stopped_run_allows_a_fresh_start() {
    init_logging();
    let (state, _) = started_state("/tmp/images");
    let (state, _) = update(state, Msg::ScanCompleted { existing: 1 });
    let (state, _) = update(state, Msg::StopClicked);
    let (state, _) = update(state, Msg::CaptureStopped);

    let (next, effects) = update(state, Msg::StartClicked);

    assert_eq!(next.view().session, SessionState::Scanning);
    assert_eq!(
        effects,
        vec![Effect::StartCapture {
            save_dir: PathBuf::from("/tmp/images"),
        }]
    );
}
