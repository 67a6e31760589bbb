use super::*;
use crate::audio::fake::FakeEngine;
use crate::error::PlayerError;
use crate::library::Track;
use crate::playlist::PlaylistStore;
use crate::session::{PlaybackSession, PlaybackState};
use std::path::PathBuf;
use std::time::Duration;

fn t(title: &str, secs: u64) -> Track {
    Track::new(format!("/music/{title}.mp3"), Duration::from_secs(secs))
}

fn app_with(tracks: Vec<Track>, engine: FakeEngine) -> App<FakeEngine> {
    let store = PlaylistStore::load(tracks).unwrap();
    let session = PlaybackSession::new(engine, Duration::from_millis(500));
    App::new(store, session)
}

fn app(tracks: Vec<Track>) -> App<FakeEngine> {
    app_with(tracks, FakeEngine::default())
}

fn abc() -> Vec<Track> {
    vec![t("A", 180), t("B", 90), t("C", 120)]
}

#[test]
fn prime_loads_first_track_without_playing() {
    let mut app = app(abc());
    app.prime();
    assert_eq!(app.state(), PlaybackState::Stopped);
    assert_eq!(app.session.loaded().map(|t| t.title.as_str()), Some("A"));
}

#[test]
fn toggle_after_prime_plays_loaded_track() {
    let mut app = app(abc());
    app.prime();
    app.toggle_play();
    assert_eq!(app.state(), PlaybackState::Playing);
    assert_eq!(app.session.engine().loads.len(), 1);

    app.toggle_play();
    assert_eq!(app.state(), PlaybackState::Paused);
}

#[test]
fn toggle_from_cold_start_loads_and_plays() {
    let mut app = app(abc());
    app.toggle_play();
    assert_eq!(app.state(), PlaybackState::Playing);
    assert_eq!(app.session.loaded().map(|t| t.title.as_str()), Some("A"));
}

#[test]
fn skip_wraps_and_restarts_playback() {
    let mut app = app(abc());
    app.skip(-1);
    assert_eq!(app.playlist.active_track().title, "C");
    assert_eq!(app.state(), PlaybackState::Playing);
    assert_eq!(app.session.position(), Duration::ZERO);
    assert_eq!(app.cursor, 2);

    app.skip(1);
    assert_eq!(app.playlist.active_track().title, "A");
}

#[test]
fn natural_completion_advances_to_next_track() {
    let mut app = app(vec![t("A", 2), t("B", 90)]);
    app.play_active();

    assert!(!app.on_tick(Duration::from_secs(1)));
    assert!(app.on_tick(Duration::from_secs(1)));
    assert_eq!(app.playlist.active_track().title, "B");
    assert_eq!(app.state(), PlaybackState::Playing);
    assert_eq!(app.session.position(), Duration::ZERO);
}

#[test]
fn pause_while_stopped_plays_active_track() {
    let mut app = app(abc());
    app.prime();
    app.pause();
    assert_eq!(app.state(), PlaybackState::Playing);
    assert_eq!(app.session.loaded().map(|t| t.title.as_str()), Some("A"));
    assert_eq!(app.session.engine().loads.len(), 1);
}

#[test]
fn pause_from_cold_start_loads_and_plays() {
    let mut app = app(abc());
    assert!(app.session.loaded().is_none());
    app.pause();
    assert_eq!(app.state(), PlaybackState::Playing);
    assert_eq!(app.session.loaded().map(|t| t.title.as_str()), Some("A"));
}

#[test]
fn ticks_while_paused_never_advance() {
    let mut app = app(vec![t("A", 2), t("B", 90)]);
    app.play_active();
    app.pause();
    for _ in 0..10 {
        assert!(!app.on_tick(Duration::from_secs(1)));
    }
    assert_eq!(app.playlist.active_track().title, "A");
}

#[test]
fn load_failure_skips_to_next_track() {
    let engine = FakeEngine::failing_on(&[PathBuf::from("/music/B.mp3")]);
    let mut app = app_with(abc(), engine);

    app.select(1).unwrap();
    assert_eq!(app.playlist.active_track().title, "C");
    assert_eq!(app.state(), PlaybackState::Playing);
    assert!(app.last_error.is_none());
}

#[test]
fn two_failures_in_a_row_stop_with_error() {
    let engine = FakeEngine::failing_on(&[
        PathBuf::from("/music/B.mp3"),
        PathBuf::from("/music/C.mp3"),
    ]);
    let mut app = app_with(abc(), engine);

    app.select(1).unwrap();
    assert_eq!(app.state(), PlaybackState::Stopped);
    assert!(app.last_error.as_deref().unwrap().contains("C.mp3"));
    // Exactly one retry: B then C, never A.
    assert_eq!(app.session.engine().loads.len(), 2);
}

#[test]
fn successful_start_clears_error() {
    let engine = FakeEngine::failing_on(&[
        PathBuf::from("/music/B.mp3"),
        PathBuf::from("/music/C.mp3"),
    ]);
    let mut app = app_with(abc(), engine);
    app.select(1).unwrap();
    assert!(app.last_error.is_some());

    app.select(0).unwrap();
    assert!(app.last_error.is_none());
    assert_eq!(app.state(), PlaybackState::Playing);
}

#[test]
fn select_out_of_range_is_rejected() {
    let mut app = app(abc());
    let err = app.select(3).unwrap_err();
    assert!(matches!(err, PlayerError::IndexOutOfRange { index: 3, len: 3 }));
    assert_eq!(app.state(), PlaybackState::Stopped);
}

#[test]
fn shuffle_keeps_playing_track_and_moves_cursor_to_it() {
    let mut app = app(abc());
    app.select(2).unwrap();
    app.session.tick(Duration::from_secs(30));

    app.toggle_shuffle();
    assert_eq!(app.playlist.active_track().title, "C");
    assert_eq!(app.cursor, 0);
    // Shuffling does not reload or rewind.
    assert_eq!(app.session.position(), Duration::from_secs(30));
    assert_eq!(app.session.engine().loads.len(), 1);

    app.toggle_shuffle();
    assert_eq!(app.playlist.active_index(), 2);
    assert_eq!(app.cursor, 2);
}

#[test]
fn cursor_moves_freely_and_play_cursor_selects() {
    let mut app = app(abc());
    app.cursor_prev();
    assert_eq!(app.cursor, 2);
    assert!(!app.follow_playback);
    app.cursor_next();
    assert_eq!(app.cursor, 0);
    app.cursor_last();
    assert_eq!(app.cursor, 2);

    app.play_cursor().unwrap();
    assert_eq!(app.playlist.active_track().title, "C");
    assert!(app.follow_playback);
}

#[test]
fn free_roaming_cursor_stays_put_on_auto_advance() {
    let mut app = app(vec![t("A", 1), t("B", 90), t("C", 90)]);
    app.play_active();
    app.cursor_last();

    assert!(app.on_tick(Duration::from_secs(1)));
    assert_eq!(app.playlist.active_index(), 1);
    assert_eq!(app.cursor, 2);

    app.cursor_to_active();
    assert_eq!(app.cursor, 1);
}

#[test]
fn stop_then_toggle_restarts_from_zero() {
    let mut app = app(abc());
    app.play_active();
    app.on_tick(Duration::from_secs(20));
    app.stop();
    assert_eq!(app.state(), PlaybackState::Stopped);

    app.toggle_play();
    assert_eq!(app.state(), PlaybackState::Playing);
    assert_eq!(app.session.position(), Duration::ZERO);
}
