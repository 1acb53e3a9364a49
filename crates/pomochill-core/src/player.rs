//! Ambient-music companion state.
//!
//! Models the background-stream widget: a catalog of streams, the current
//! selection, a 0-100 volume, and whether playback is on. The media element
//! itself lives in the hosting shell; this struct owns nothing global and
//! dies with its owner.

use serde::{Deserialize, Serialize};

pub const MAX_VOLUME: u8 = 100;
pub const DEFAULT_VOLUME: u8 = 25;

/// A selectable ambient stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub id: String,
    pub name: String,
}

/// The built-in catalog.
pub fn default_streams() -> Vec<Stream> {
    vec![
        Stream {
            id: "4xDzrJKXOOY".into(),
            name: "Retrowave".into(),
        },
        Stream {
            id: "HuFYqnbVbzY".into(),
            name: "LoFi Jazz".into(),
        },
        Stream {
            id: "jfKfPfyJRdk".into(),
            name: "LoFi Hip Hop".into(),
        },
    ]
}

#[derive(Debug, Clone)]
pub struct AmbientPlayer {
    streams: Vec<Stream>,
    selected: usize,
    volume: u8,
    playing: bool,
}

impl AmbientPlayer {
    /// Starts paused on the first stream. An empty catalog falls back to
    /// the built-in one so there is always a current stream.
    pub fn new(streams: Vec<Stream>, volume: u8) -> Self {
        let streams = if streams.is_empty() {
            default_streams()
        } else {
            streams
        };
        Self {
            streams,
            selected: 0,
            volume: volume.min(MAX_VOLUME),
            playing: false,
        }
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    pub fn current(&self) -> &Stream {
        &self.streams[self.selected]
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Clamped to [`MAX_VOLUME`]. Returns the applied value.
    pub fn set_volume(&mut self, volume: u8) -> u8 {
        self.volume = volume.min(MAX_VOLUME);
        self.volume
    }

    /// Flip play/pause. Returns the new playing state.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Select a stream by id. Unknown ids are rejected as a no-op; switching
    /// to a different stream always drops back to paused, re-selecting the
    /// current one changes nothing.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(index) = self.streams.iter().position(|s| s.id == id) else {
            return false;
        };
        if index != self.selected {
            self.selected = index;
            self.playing = false;
        }
        true
    }

    /// Cycle to the next stream in the catalog.
    pub fn select_next(&mut self) -> &Stream {
        let next = (self.selected + 1) % self.streams.len();
        if next != self.selected {
            self.selected = next;
            self.playing = false;
        }
        self.current()
    }
}

impl Default for AmbientPlayer {
    fn default() -> Self {
        Self::new(default_streams(), DEFAULT_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_on_first_stream() {
        let player = AmbientPlayer::default();
        assert_eq!(player.current().name, "Retrowave");
        assert_eq!(player.volume(), DEFAULT_VOLUME);
        assert!(!player.is_playing());
    }

    #[test]
    fn empty_catalog_falls_back_to_builtin() {
        let player = AmbientPlayer::new(Vec::new(), 40);
        assert_eq!(player.streams().len(), 3);
    }

    #[test]
    fn volume_clamps_to_max() {
        let mut player = AmbientPlayer::default();
        assert_eq!(player.set_volume(250), MAX_VOLUME);
        assert_eq!(player.set_volume(60), 60);
    }

    #[test]
    fn switching_streams_pauses_playback() {
        let mut player = AmbientPlayer::default();
        player.toggle();
        assert!(player.is_playing());

        assert!(player.select("jfKfPfyJRdk"));
        assert_eq!(player.current().name, "LoFi Hip Hop");
        assert!(!player.is_playing(), "a fresh stream loads paused");
    }

    #[test]
    fn reselecting_current_stream_is_harmless() {
        let mut player = AmbientPlayer::default();
        player.toggle();
        assert!(player.select("4xDzrJKXOOY"));
        assert!(player.is_playing(), "no reload, playback continues");
    }

    #[test]
    fn unknown_stream_is_rejected() {
        let mut player = AmbientPlayer::default();
        player.toggle();
        assert!(!player.select("dQw4w9WgXcQ"));
        assert_eq!(player.current().name, "Retrowave");
        assert!(player.is_playing());
    }

    #[test]
    fn select_next_wraps_around() {
        let mut player = AmbientPlayer::default();
        player.select_next();
        player.select_next();
        assert_eq!(player.current().name, "LoFi Hip Hop");
        player.select_next();
        assert_eq!(player.current().name, "Retrowave");
    }
}
