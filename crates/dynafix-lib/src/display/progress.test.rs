use super::*;

#[test]
fn test_bar_tracks_position() {
    let styling = StyleManager::plain();
    let progress = ProgressDisplay::new(&styling);

    let tracker = progress.bar(3);
    assert_eq!(tracker.bar().length(), Some(3));
    assert_eq!(tracker.bar().position(), 0);

    tracker.set_message("accounts.0001_users");
    tracker.inc();
    tracker.inc();
    assert_eq!(tracker.bar().position(), 2);

    tracker.finish("Loaded 2 fixtures");
    assert!(tracker.bar().is_finished());
}

#[test]
fn test_spinner_clears() {
    let styling = StyleManager::new(true, true);
    let progress = ProgressDisplay::new(&styling);

    let tracker = progress.spinner("Discovering fixtures");
    tracker.finish_clear();
    assert!(tracker.bar().is_finished());
}

#[test]
fn test_hidden_tracker_is_hidden() {
    let styling = StyleManager::plain();
    let progress = ProgressDisplay::new(&styling);

    let tracker = progress.hidden(5);
    assert!(tracker.bar().is_hidden());
    tracker.inc();
    assert_eq!(tracker.bar().position(), 1);
}

#[test]
fn test_suspend_returns_closure_value() {
    let styling = StyleManager::plain();
    let progress = ProgressDisplay::new(&styling);

    let tracker = progress.bar(1);
    assert_eq!(tracker.suspend(|| 42), 42);
    tracker.abandon("failed");
    assert!(tracker.bar().is_finished());
}
