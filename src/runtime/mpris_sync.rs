use crate::app::App;
use crate::audio::AudioEngine;
use crate::mpris::MprisHandle;

pub fn update_mpris<E: AudioEngine>(mpris: &MprisHandle, app: &App<E>) {
    let loaded = app.session.loaded();
    let index = loaded.map(|_| app.playlist.active_index());
    mpris.set_track_metadata(index, loaded);
    mpris.set_playback(app.state());
    mpris.set_shuffle(app.playlist.is_shuffled());
}
