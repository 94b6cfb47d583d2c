//! Audio cues and background melody
//!
//! The simulation never waits on sound: hosts map `GameEvent`s to `Cue`s and
//! hand them to an `AudioOutput`. On the web that is `WebAudio`, which
//! synthesises tones with the Web Audio API. If no `AudioContext` can be
//! created, playback silently becomes a no-op.

use serde::{Deserialize, Serialize};

use crate::sim::ItemTier;

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Generic grab (crystal and anything untiered)
    Grab,
    Gold,
    Diamond,
    Rock,
    GameOver,
    LevelUp,
}

/// A single synthesised tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Seconds
    pub duration: f64,
}

impl Cue {
    pub const ALL: [Cue; 6] = [
        Cue::Grab,
        Cue::Gold,
        Cue::Diamond,
        Cue::Rock,
        Cue::GameOver,
        Cue::LevelUp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Cue::Grab => "grab",
            Cue::Gold => "gold",
            Cue::Diamond => "diamond",
            Cue::Rock => "rock",
            Cue::GameOver => "gameOver",
            Cue::LevelUp => "levelUp",
        }
    }

    /// Catch sound for an item tier
    pub fn for_tier(tier: ItemTier) -> Self {
        match tier {
            ItemTier::Gold => Cue::Gold,
            ItemTier::Diamond => Cue::Diamond,
            ItemTier::Rock => Cue::Rock,
            ItemTier::Other => Cue::Grab,
        }
    }

    pub fn tone(&self) -> Tone {
        let (freq, duration) = match self {
            Cue::Grab => (800.0, 0.1),
            Cue::Gold => (1200.0, 0.2),
            Cue::Diamond => (1600.0, 0.3),
            Cue::Rock => (200.0, 0.15),
            Cue::GameOver => (400.0, 0.5),
            Cue::LevelUp => (1000.0, 0.4),
        };
        Tone { freq, duration }
    }
}

/// Sound sink used by the game loop. Every call is fire-and-forget.
pub trait AudioOutput {
    fn play(&mut self, cue: Cue);

    fn set_enabled(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;

    /// Flip enabled state, returning the new value
    fn toggle(&mut self) -> bool {
        let enabled = !self.is_enabled();
        self.set_enabled(enabled);
        enabled
    }

    /// Begin looping the background melody
    fn start_music(&mut self) {}

    /// Cancel the background melody
    fn stop_music(&mut self) {}

    /// Called once per frame to keep the melody scheduled
    fn update(&mut self) {}
}

/// Output that plays nothing (headless runs, or no audio backend)
#[derive(Debug, Clone, Default)]
pub struct SilentAudio {
    enabled: bool,
}

impl AudioOutput for SilentAudio {
    fn play(&mut self, _cue: Cue) {}

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// A melody note: frequency and length in beats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq: f32,
    pub beats: f64,
}

const fn note(freq: f32, beats: f64) -> Note {
    Note { freq, beats }
}

/// C5 D5 E5 F5 G5 E5 D5 C5
pub const BACKGROUND_MELODY: [Note; 8] = [
    note(523.25, 0.5),
    note(587.33, 0.5),
    note(659.25, 0.5),
    note(698.46, 0.5),
    note(783.99, 0.5),
    note(659.25, 0.5),
    note(587.33, 0.5),
    note(523.25, 0.5),
];

/// Seconds per beat for the background melody
pub const BACKGROUND_TEMPO: f64 = 0.6;

/// A note placed on the audio clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledNote {
    pub freq: f32,
    /// Absolute start (seconds, audio clock)
    pub start: f64,
    pub duration: f64,
}

/// Repeating melody scheduler driven by explicit timestamps.
///
/// Each `poll` hands back whole passes of the melody whose start falls inside
/// the lookahead window. `cancel` stops future passes; notes already handed
/// out are the caller's business.
#[derive(Debug, Clone)]
pub struct MelodyScheduler {
    notes: Vec<Note>,
    tempo: f64,
    looping: bool,
    lookahead: f64,
    next_pass: Option<f64>,
}

impl MelodyScheduler {
    pub fn new(notes: &[Note], tempo: f64, looping: bool) -> Self {
        Self {
            notes: notes.to_vec(),
            tempo,
            looping,
            lookahead: 0.1,
            next_pass: None,
        }
    }

    pub fn background() -> Self {
        Self::new(&BACKGROUND_MELODY, BACKGROUND_TEMPO, true)
    }

    /// Length of one pass in seconds
    pub fn pass_duration(&self) -> f64 {
        self.notes.iter().map(|n| n.beats * self.tempo).sum()
    }

    pub fn start(&mut self, now: f64) {
        if self.pass_duration() > 0.0 {
            self.next_pass = Some(now);
        }
    }

    pub fn cancel(&mut self) {
        self.next_pass = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_pass.is_some()
    }

    /// Notes due by `now + lookahead`
    pub fn poll(&mut self, now: f64) -> Vec<ScheduledNote> {
        let mut due = Vec::new();
        while let Some(pass_start) = self.next_pass {
            if pass_start > now + self.lookahead {
                break;
            }
            // Fell behind (tab was hidden): restart from now instead of catching up
            let mut t = pass_start.max(now);
            for n in &self.notes {
                let duration = n.beats * self.tempo;
                due.push(ScheduledNote {
                    freq: n.freq,
                    start: t,
                    duration,
                });
                t += duration;
            }
            self.next_pass = if self.looping { Some(t) } else { None };
        }
        due
    }
}

const MELODY_GAIN: f32 = 0.1;

/// Peak gain for melody notes, or `None` while the melody must stay silent.
/// Exponential ramps cannot start from zero, so a muted master yields `None`.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn melody_peak(enabled: bool, music_wanted: bool, master_volume: f32) -> Option<f32> {
    let peak = MELODY_GAIN * master_volume;
    (enabled && music_wanted && peak > 0.0).then_some(peak)
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioOutput, Cue, MelodyScheduler, melody_peak};

    const CUE_GAIN: f32 = 0.3;

    /// Web Audio backend. The context is created lazily on the first sound
    /// after a user gesture; creation failure disables audio for the session.
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        init_failed: bool,
        enabled: bool,
        master_volume: f32,
        music_requested: bool,
        melody: MelodyScheduler,
    }

    impl WebAudio {
        pub fn new(enabled: bool, master_volume: f32) -> Self {
            Self {
                ctx: None,
                init_failed: false,
                enabled,
                master_volume: master_volume.clamp(0.0, 1.0),
                music_requested: false,
                melody: MelodyScheduler::background(),
            }
        }

        /// Create (once) and resume the audio context
        fn ensure_context(&mut self) -> bool {
            if self.ctx.is_none() && !self.init_failed {
                match AudioContext::new() {
                    Ok(ctx) => self.ctx = Some(ctx),
                    Err(_) => {
                        log::warn!("Failed to create AudioContext - audio disabled");
                        self.init_failed = true;
                    }
                }
            }

            let Some(ctx) = &self.ctx else { return false };
            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            true
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Tone with an exponential fade to near-silence
        fn play_tone(
            ctx: &AudioContext,
            freq: f32,
            start: f64,
            duration: f64,
            peak: f32,
            osc_type: OscillatorType,
        ) {
            let Some((osc, gain)) = Self::create_osc(ctx, freq, osc_type) else {
                return;
            };

            gain.gain().set_value_at_time(peak, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + duration)
                .ok();

            osc.start_with_when(start).ok();
            osc.stop_with_when(start + duration).ok();
        }
    }

    impl AudioOutput for WebAudio {
        fn play(&mut self, cue: Cue) {
            if !self.enabled || self.master_volume <= 0.0 {
                return;
            }
            if !self.ensure_context() {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            let tone = cue.tone();
            Self::play_tone(
                ctx,
                tone.freq,
                ctx.current_time(),
                tone.duration,
                CUE_GAIN * self.master_volume,
                OscillatorType::Sine,
            );
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
            if !enabled {
                // Restarts on the next update if music is still wanted
                self.melody.cancel();
            }
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn start_music(&mut self) {
            self.music_requested = true;
            if self.enabled {
                self.ensure_context();
            }
        }

        fn stop_music(&mut self) {
            self.music_requested = false;
            self.melody.cancel();
        }

        fn update(&mut self) {
            let Some(peak) = melody_peak(self.enabled, self.music_requested, self.master_volume)
            else {
                return;
            };
            // Sound may have been switched on after start_music
            if !self.ensure_context() {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            let now = ctx.current_time();
            if !self.melody.is_active() {
                self.melody.start(now);
            }
            for note in self.melody.poll(now) {
                Self::play_tone(
                    ctx,
                    note.freq,
                    note.start,
                    note.duration,
                    peak,
                    OscillatorType::Triangle,
                );
            }
        }
    }
}
