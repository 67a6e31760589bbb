//! MPRIS (D-Bus) media-control service.
//!
//! Media keys and tools like `playerctl` talk to `org.mpris.MediaPlayer2.rola`.
//! Method calls are forwarded to the event loop as [`ControlCmd`] values;
//! properties are served from a snapshot the loop keeps up to date.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};
use std::time::Duration;

use async_io::{Timer, block_on};
use tracing::{info, warn};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::library::Track;
use crate::session::PlaybackState;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.rola";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    shuffle: bool,
    title: Option<String>,
    url: Option<String>,
    length_micros: Option<i64>,
    track_id: Option<OwnedObjectPath>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    pub fn set_shuffle(&self, shuffle: bool) {
        if let Ok(mut s) = self.state.lock() {
            s.shuffle = shuffle;
        }
    }

    /// Publish the active track; `index` is its position in the display order.
    pub fn set_track_metadata(&self, index: Option<usize>, track: Option<&Track>) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        match (index, track) {
            (Some(i), Some(t)) => {
                s.title = Some(t.title.clone());
                s.url = Some(format!("file://{}", t.path.display()));
                s.length_micros = i64::try_from(t.duration.as_micros()).ok();
                s.track_id = ObjectPath::try_from(format!("{OBJECT_PATH}/track/{i}"))
                    .ok()
                    .map(OwnedObjectPath::from);
            }
            _ => {
                s.title = None;
                s.url = None;
                s.length_micros = None;
                s.track_id = None;
            }
        }
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "rola"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec!["audio/mpeg".to_string()]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

fn owned(value: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(value).ok()
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn shuffle(&self) -> bool {
        self.state.lock().map(|s| s.shuffle).unwrap_or(false)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        let mut put = |key: &str, value: Option<OwnedValue>| {
            if let Some(v) = value {
                map.insert(key.to_string(), v);
            }
        };
        put(
            "mpris:trackid",
            s.track_id
                .as_ref()
                .and_then(|p| owned(Value::from(p.clone().into_inner()))),
        );
        put(
            "xesam:title",
            s.title.as_ref().and_then(|t| owned(Value::from(t.as_str()))),
        );
        put(
            "xesam:url",
            s.url.as_ref().and_then(|u| owned(Value::from(u.as_str()))),
        );
        put("mpris:length", s.length_micros.and_then(|l| owned(Value::from(l))));
        map
    }
}

/// Claim the bus name and export both interfaces.
async fn serve(tx: Sender<ControlCmd>, state: Arc<Mutex<SharedState>>) -> zbus::Result<Connection> {
    let connection = Connection::session().await?;
    connection.request_name(BUS_NAME).await?;

    let server = connection.object_server();
    server.at(OBJECT_PATH, RootIface { tx: tx.clone() }).await?;
    server.at(OBJECT_PATH, PlayerIface { tx, state }).await?;
    Ok(connection)
}

/// Start the MPRIS service on its own thread. Failures (no session bus, name
/// taken) are logged and leave the player without media-key support.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let served = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            // The connection must outlive the loop below or the name is released.
            let _connection = match serve(tx, served).await {
                Ok(c) => c,
                Err(e) => {
                    warn!(error = %e, "MPRIS unavailable");
                    return;
                }
            };
            info!(name = BUS_NAME, "MPRIS service registered");

            loop {
                Timer::after(Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}
