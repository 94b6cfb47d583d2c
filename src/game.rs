//! Host-agnostic game driver
//!
//! `Game` owns one session plus its audio output and turns animation-frame
//! timestamps into simulation ticks, draw calls, sound cues and HUD updates.
//! The browser entry point wraps it in `Rc<RefCell<_>>`; tests drive it
//! directly with fake surfaces.

use serde::Serialize;

use crate::audio::AudioOutput;
use crate::renderer::{DrawSurface, render};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Playfield, TickInput, tick};
use crate::tuning::Tuning;

/// Whether the host should schedule another animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Values shown in the page overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub time_left: u32,
    pub level: u32,
    pub phase: GamePhase,
}

impl HudSnapshot {
    pub fn of(state: &GameState) -> Self {
        Self {
            score: state.session.score,
            time_left: state.session.time_left,
            level: state.session.level,
            phase: state.phase(),
        }
    }
}

/// Receives HUD updates (only when something changed)
pub trait HudSink {
    fn show(&mut self, hud: &HudSnapshot);
}

/// Game instance holding all state
pub struct Game<A: AudioOutput> {
    state: GameState,
    settings: Settings,
    audio: A,
    input: TickInput,
    last_time: Option<f64>,
    last_hud: Option<HudSnapshot>,
}

impl<A: AudioOutput> Game<A> {
    pub fn new(seed: u64, playfield: Playfield, tuning: Tuning, settings: Settings, mut audio: A) -> Self {
        audio.set_enabled(settings.sound);
        Self {
            state: GameState::new(seed, playfield, tuning),
            settings,
            audio,
            input: TickInput::default(),
            last_time: None,
            last_hud: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Start → Playing. Returns false if the session already started.
    pub fn start(&mut self) -> bool {
        if !self.state.start() {
            return false;
        }
        self.state.drain_events();
        self.last_time = None;
        if self.settings.music {
            self.audio.start_music();
        }
        true
    }

    /// Throw the current session away and begin a new one
    pub fn restart(&mut self, seed: u64) {
        self.audio.stop_music();
        let playfield = self.state.playfield;
        let tuning = self.state.tuning.clone();
        self.state = GameState::new(seed, playfield, tuning);
        self.input = TickInput::default();
        self.last_hud = None;
        self.start();
        log::info!("Game restarted with seed: {}", seed);
    }

    /// Queue a hook launch for the next update. Ignored unless the hook is
    /// swinging in an active session.
    pub fn activate(&mut self) {
        if self.state.accepts_activation() {
            self.input.activate = true;
        }
    }

    /// Flip sound effects on/off, returning the new value
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.audio.toggle();
        log::info!("Sound {}", if enabled { "on" } else { "off" });
        enabled
    }

    pub fn is_running(&self) -> bool {
        self.state.session.is_playing()
    }

    /// One animation frame: update, draw, push the HUD
    pub fn frame(
        &mut self,
        timestamp_ms: f64,
        surface: &mut impl DrawSurface,
        hud: &mut impl HudSink,
    ) -> LoopControl {
        let dt = match self.last_time {
            Some(last) => (timestamp_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(timestamp_ms);

        if self.is_running() {
            self.update(dt);
        }
        self.render(surface);
        self.push_hud(hud);
        self.audio.update();

        if self.is_running() {
            LoopControl::Continue
        } else {
            LoopControl::Stop
        }
    }

    /// Advance the simulation and route its events to audio
    pub fn update(&mut self, dt_ms: f32) {
        tick(&mut self.state, &self.input, dt_ms);
        self.input = TickInput::default();

        for event in self.state.drain_events() {
            if let Some(cue) = event.cue() {
                self.audio.play(cue);
            }
            if let GameEvent::GameOver { score, level } = event {
                self.audio.stop_music();
                log::info!("Game over: score {} (level {})", score, level);
            }
        }
    }

    pub fn render(&self, surface: &mut impl DrawSurface) {
        render(&self.state, surface, &self.settings);
    }

    /// Send the HUD to the sink if it changed since the last push
    pub fn push_hud(&mut self, hud: &mut impl HudSink) {
        let snapshot = HudSnapshot::of(&self.state);
        if self.last_hud != Some(snapshot) {
            hud.show(&snapshot);
            self.last_hud = Some(snapshot);
        }
    }
}
