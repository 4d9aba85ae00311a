// Resuming a session from an action log file that a crash left damaged
use bureau_of_magical_things::config::GameConfig;
use bureau_of_magical_things::interception::SpellType;
use bureau_of_magical_things::session::action_log::ActionLog;
use bureau_of_magical_things::session::GameState;
use std::io::Write;
use std::path::PathBuf;

fn temp_log(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "bmt_recovery_{}_{}.jsonl",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

fn config(path: &PathBuf) -> GameConfig {
    GameConfig {
        seed: Some(3),
        action_log_file: Some(path.clone()),
    }
}

fn append_raw(path: &PathBuf, text: &str) {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(path)
        .expect("open log");
    file.write_all(text.as_bytes()).expect("append");
}

#[test]
fn torn_last_line_does_not_lose_the_session() {
    let path = temp_log("torn");
    let mut gs = GameState::from_config(&config(&path));
    gs.start_interception(Some("Void Stalker")).expect("start");
    gs.cast(SpellType::Attack).expect("cast");
    gs.cast(SpellType::Attack).expect("cast");
    assert_eq!(gs.missions_completed, 1);
    let logged = gs.action_log.len();
    gs.shutdown();

    append_raw(&path, r#"{"seq":7,"action_ty"#);

    let mut resumed = GameState::from_config(&config(&path));
    assert_eq!(resumed.missions_completed, 1);
    assert_eq!(resumed.stats.control, 60);
    assert_eq!(resumed.action_log.len(), logged);
    resumed.rest();
    resumed.shutdown();

    let again = GameState::from_config(&config(&path));
    assert_eq!(again.missions_completed, 1);
    assert_eq!(again.stats.energy, 80);
    assert_eq!(again.action_log.len(), logged + 1);
    assert_eq!(
        ActionLog::read_entries(&path).expect("clean log").len(),
        logged + 1
    );
    again.shutdown();
    let _ = std::fs::remove_file(&path);
}

#[test]
fn corrupt_log_is_moved_aside_not_appended_to() {
    let path = temp_log("corrupt");
    let mut gs = GameState::from_config(&config(&path));
    gs.rest();
    gs.shutdown();
    let written = std::fs::read_to_string(&path).expect("read");
    let mut lines = written.lines();
    let damaged = format!(
        "{}\ngarbage in the middle\n{}\n",
        lines.next().expect("seed line"),
        lines.next().expect("rest line")
    );
    std::fs::write(&path, &damaged).expect("write");

    let fresh = GameState::from_config(&config(&path));
    fresh.shutdown();
    assert_eq!(fresh.action_log.len(), 1);
    assert_eq!(ActionLog::read_entries(&path).expect("fresh log").len(), 1);

    let dir = path.parent().expect("temp dir");
    let prefix = format!(
        "{}.corrupt-",
        path.file_name().and_then(|n| n.to_str()).expect("file name")
    );
    let moved: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("list temp dir")
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&prefix))
        })
        .collect();
    assert_eq!(moved.len(), 1);
    assert_eq!(std::fs::read_to_string(&moved[0]).expect("read"), damaged);

    for p in moved {
        let _ = std::fs::remove_file(p);
    }
    let _ = std::fs::remove_file(&path);
}
