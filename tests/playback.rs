//! Recorded sessions replayed against the editor without a terminal.

use tvi::app::{App, Model};
use tvi::editor::Buffer;
use tvi::input::{Playback, Recorder};

#[test]
fn test_recorded_session_replays_and_saves() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "alpha\nbeta\n").unwrap();
    let keys = dir.path().join("session.keys");

    let mut recorder = Recorder::create(&keys).unwrap();
    for &byte in b"jddotop\x1b:x\r" {
        recorder.record(byte).unwrap();
    }
    drop(recorder);

    let mut app = App::new(vec![file.clone()]);
    let model = app.load_model((80, 24)).unwrap();
    let model = app.replay(model, Playback::open(&keys).unwrap());

    assert!(model.should_quit);
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "alpha\ntop\n");
}

#[test]
fn test_replay_stops_reading_after_quit() {
    let model = Model::new(vec![Buffer::from_lines(["keep"], None)], (80, 24));
    let model = App::new(Vec::new()).replay(model, Playback::from_bytes(b":q\rdd".to_vec()));

    assert!(model.should_quit);
    assert_eq!(model.buffer().lines()[0].as_bytes(), b"keep");
}

#[test]
fn test_exhausted_playback_leaves_state() {
    let model = Model::new(vec![Buffer::from_lines(["abc"], None)], (80, 24));
    let model = App::new(Vec::new()).replay(model, Playback::from_bytes(b"Ax".to_vec()));

    assert!(!model.should_quit);
    assert_eq!(model.buffer().lines()[0].as_bytes(), b"abcx");
}
