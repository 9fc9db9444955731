use crmpro_core::db::open_db_in_memory;
use crmpro_core::{
    AppStore, FilterState, SearchDebouncer, SqliteSnapshotRepository, DEFAULT_QUIET_INTERVAL,
};
use std::time::{Duration, Instant};

#[test]
fn rapid_keystrokes_commit_only_the_final_value() {
    let mut debouncer = SearchDebouncer::new(Duration::from_millis(300));
    let base = Instant::now();

    // Keystrokes arrive faster than the quiet window.
    debouncer.note_input("a", base);
    debouncer.note_input("an", base + Duration::from_millis(100));
    debouncer.note_input("ana", base + Duration::from_millis(200));

    // Still typing: nothing commits.
    assert_eq!(debouncer.poll(base + Duration::from_millis(450)), None);

    // Quiet window elapsed after the last keystroke.
    let committed = debouncer.poll(base + Duration::from_millis(500));
    assert_eq!(committed.as_deref(), Some("ana"));

    // Exactly one commit: the value does not fire again.
    assert_eq!(debouncer.poll(base + Duration::from_secs(5)), None);
    assert!(!debouncer.is_pending());
}

#[test]
fn each_keystroke_restarts_the_quiet_interval() {
    let mut debouncer = SearchDebouncer::new(Duration::from_millis(300));
    let base = Instant::now();

    debouncer.note_input("q", base);
    assert_eq!(debouncer.deadline(), Some(base + Duration::from_millis(300)));

    debouncer.note_input("qu", base + Duration::from_millis(250));
    assert_eq!(debouncer.deadline(), Some(base + Duration::from_millis(550)));
}

#[test]
fn tokens_are_monotonic_per_keystroke() {
    let mut debouncer = SearchDebouncer::default();
    let base = Instant::now();

    let first = debouncer.note_input("a", base);
    let second = debouncer.note_input("ab", base);
    assert!(second > first);
    assert_eq!(debouncer.last_token(), second);
}

#[test]
fn cancel_prevents_any_commit() {
    let mut debouncer = SearchDebouncer::default();
    let base = Instant::now();

    debouncer.note_input("abandoned", base);
    debouncer.cancel();

    assert_eq!(debouncer.poll(base + DEFAULT_QUIET_INTERVAL * 4), None);
}

#[test]
fn debouncer_can_be_rearmed_after_a_commit() {
    let mut debouncer = SearchDebouncer::new(Duration::from_millis(300));
    let base = Instant::now();

    debouncer.note_input("first", base);
    assert_eq!(
        debouncer.poll(base + Duration::from_millis(300)).as_deref(),
        Some("first")
    );

    debouncer.note_input("second", base + Duration::from_millis(400));
    assert_eq!(
        debouncer
            .poll(base + Duration::from_millis(700))
            .as_deref(),
        Some("second")
    );
}

#[test]
fn committed_value_flows_into_the_filter_state() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut store = AppStore::open(repo, Vec::new());

    let mut debouncer = SearchDebouncer::new(Duration::from_millis(300));
    let base = Instant::now();

    debouncer.note_input("sol", base);
    debouncer.note_input("soler", base + Duration::from_millis(150));

    // Intermediate keystrokes never reach the filter state.
    assert_eq!(store.filters().search, "");

    if let Some(search) = debouncer.poll(base + Duration::from_millis(450)) {
        let filters = FilterState {
            search,
            ..store.filters().clone()
        };
        store.set_filters(filters);
    }

    assert_eq!(store.filters().search, "soler");
}
