use crate::app::App;
use crate::audio::AudioEngine;
use crate::config;

/// Apply the configured starting state: follow mode, shuffle, then either
/// start the first track or just load it.
pub fn apply_playback_defaults<E: AudioEngine>(app: &mut App<E>, settings: &config::Settings) {
    app.follow_playback = settings.ui.follow_playback;

    if settings.playback.shuffle {
        app.toggle_shuffle();
    }

    if settings.playback.autoplay {
        app.play_active();
    } else {
        app.prime();
    }
}
