/// Sound cues, played through the terminal bell.

use std::io::{self, Write};

use crate::entities::Sound;

pub const CATCH_VOLUME: f32 = 0.1;
pub const GAME_OVER_VOLUME: f32 = 0.3;

const BEL: &[u8] = b"\x07";

/// Per-effect volumes with a mute switch that remembers what it silenced.
#[derive(Clone, Debug, PartialEq)]
pub struct Mixer {
    catch_volume: f32,
    game_over_volume: f32,
    /// Volumes in effect before muting; `Some` while muted.
    saved: Option<(f32, f32)>,
}

impl Default for Mixer {
    fn default() -> Self {
        Mixer::new(CATCH_VOLUME, GAME_OVER_VOLUME)
    }
}

impl Mixer {
    pub fn new(catch_volume: f32, game_over_volume: f32) -> Self {
        Mixer {
            catch_volume: catch_volume.clamp(0.0, 1.0),
            game_over_volume: game_over_volume.clamp(0.0, 1.0),
            saved: None,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.saved.is_some()
    }

    pub fn volume(&self, sound: Sound) -> f32 {
        match sound {
            Sound::Catch => self.catch_volume,
            Sound::GameOver => self.game_over_volume,
        }
    }

    /// Idempotent: muting twice still restores the original volumes.
    pub fn set_muted(&mut self, muted: bool) {
        match (muted, self.saved) {
            (true, None) => {
                self.saved = Some((self.catch_volume, self.game_over_volume));
                self.catch_volume = 0.0;
                self.game_over_volume = 0.0;
            }
            (false, Some((catch, game_over))) => {
                self.catch_volume = catch;
                self.game_over_volume = game_over;
                self.saved = None;
            }
            _ => {}
        }
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.is_muted());
    }

    /// Ring the bell once for a catch, twice for game over; silent at zero
    /// volume.
    pub fn play<W: Write>(&self, out: &mut W, sound: Sound) -> io::Result<()> {
        if self.volume(sound) <= 0.0 {
            return Ok(());
        }
        let rings = match sound {
            Sound::Catch => 1,
            Sound::GameOver => 2,
        };
        for _ in 0..rings {
            out.write_all(BEL)?;
        }
        Ok(())
    }
}
