use super::*;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("{}-{}.json", name, Uuid::new_v4()))
}

#[test]
fn new_save_formats_duration() {
    let save = SavedGame::new(
        "Local Hotseat".to_string(),
        chess_core::START_FEN.to_string(),
        vec!["d4".to_string()],
        2700,
    );
    assert_eq!(save.duration, "45:00");
    assert_eq!(save.history, ["d4"]);
}

#[test]
fn newest_first_and_remove() {
    let mut saves = SaveList::new();
    let first = SavedGame::new("Tutorial".into(), chess_core::START_FEN.into(), vec![], 1);
    let second = SavedGame::new("vs AI (Easy)".into(), chess_core::START_FEN.into(), vec![], 2);
    let (a, b) = (first.id, second.id);
    saves.add(first);
    saves.add(second);

    assert_eq!(saves.games[0].id, b);
    assert_eq!(saves.get(a).map(|g| g.mode.as_str()), Some("Tutorial"));
    assert!(saves.remove(a).is_some());
    assert!(saves.remove(a).is_none());
    assert_eq!(saves.len(), 1);
}

#[test]
fn file_round_trip() {
    let path = temp_path("saves");
    let mut saves = SaveList::new();
    saves.add(SavedGame::new(
        "vs AI (Medium)".into(),
        "r1bqk2r/pp2bppp/2n1pn2/2pp4/2P5/2NPPN2/PP2BPPP/R1BQK2R w KQkq - 1 7".into(),
        vec!["e4".into(), "c5".into()],
        75,
    ));
    saves.save(&path).unwrap();

    let loaded = SaveList::load(&path).unwrap();
    assert_eq!(loaded, saves);

    // the file is a plain JSON array
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.is_array());
    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_file_is_empty_list() {
    let saves = SaveList::load_or_default(temp_path("absent")).unwrap();
    assert!(saves.is_empty());
}

#[test]
fn corrupt_file_is_json_error() {
    let path = temp_path("corrupt");
    std::fs::write(&path, "{not json").unwrap();
    assert!(matches!(SaveList::load(&path), Err(TimelineError::Json(_))));
    std::fs::remove_file(&path).ok();
}
