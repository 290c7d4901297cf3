//! The evasive-control loop as a plain state machine.
//!
//! `Session` owns everything the game tracks between events: the activation
//! counter, the phase, the single active control and the live celebration
//! effects. It never touches the DOM. Callers hand it a [`Stage`] that knows
//! the container size and can measure the control for a given label, which
//! keeps the whole loop testable on the host.
//!
//! Every `start()` / `reset()` bumps [`Session::generation`]. Deferred work
//! (reveal delay, effect cleanup, class removal) captures the generation it
//! was scheduled under and must be dropped once it no longer matches.

use rand::Rng;

use crate::config::GameConfig;

pub mod celebration;
pub mod placement;

pub use celebration::{EffectInstance, EffectKind};
pub use placement::{Extent, Placement};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
}

/// Geometry provider for control placement.
pub trait Stage {
    fn container(&self) -> Extent;
    /// Size of the control once it shows `label`.
    fn measure(&mut self, label: &str) -> Extent;
}

/// The single evasive button currently on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    pub id: u64,
    pub label: String,
    pub placement: Placement,
}

/// Result of one activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Counter went up and a fresh control was spawned.
    Advanced { count: u32 },
    /// Counter reached the target on this call.
    Won { count: u32 },
    /// No control to activate (already won).
    Ignored,
}

pub struct Session {
    config: GameConfig,
    phase: Phase,
    activation_count: u32,
    generation: u64,
    next_id: u64,
    control: Option<Control>,
    effects: Vec<EffectInstance>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            phase: Phase::Playing,
            activation_count: 0,
            generation: 0,
            next_id: 0,
            control: None,
            effects: Vec::new(),
        }
    }

    /// Swap in new tunables. Takes effect from the next `start()`; the
    /// generation keeps counting so timers from the old round stay stale.
    pub fn replace_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_won(&self) -> bool {
        self.activation_count >= self.config.target_count
    }

    pub fn activation_count(&self) -> u32 {
        self.activation_count
    }

    pub fn target_count(&self) -> u32 {
        self.config.target_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn control(&self) -> Option<&Control> {
        self.control.as_ref()
    }

    pub fn effects(&self) -> &[EffectInstance] {
        &self.effects
    }

    /// Begin a fresh play-through.
    pub fn start<R: Rng + ?Sized, S: Stage + ?Sized>(&mut self, rng: &mut R, stage: &mut S) -> &Control {
        self.phase = Phase::Playing;
        self.activation_count = 0;
        self.generation += 1;
        self.effects.clear();
        self.control = None;
        self.spawn_control(rng, stage)
    }

    /// Back to the initial state from anywhere. Same reinitialisation as
    /// `start()`; kept separate so callers read the way the page behaves.
    pub fn reset<R: Rng + ?Sized, S: Stage + ?Sized>(&mut self, rng: &mut R, stage: &mut S) -> &Control {
        self.start(rng, stage)
    }

    /// Pointer entered the control: move it and give it a new label.
    pub fn on_hover<R: Rng + ?Sized, S: Stage + ?Sized>(&mut self, rng: &mut R, stage: &mut S) -> Option<&Control> {
        let id = self.control.as_ref()?.id;
        let label = placement::pick_label(rng, &self.config.messages);
        let size = stage.measure(&label);
        let placement = placement::random_placement(rng, stage.container(), size, self.config.max_rotation_deg);
        self.control = Some(Control { id, label, placement });
        self.control.as_ref()
    }

    /// Click or touch-start on the control.
    pub fn on_activate<R: Rng + ?Sized, S: Stage + ?Sized>(&mut self, rng: &mut R, stage: &mut S) -> Activation {
        if self.phase == Phase::Won || self.control.is_none() {
            return Activation::Ignored;
        }
        self.activation_count += 1;
        let count = self.activation_count;
        if self.is_won() {
            self.phase = Phase::Won;
            self.control = None;
            Activation::Won { count }
        } else {
            self.spawn_control(rng, stage);
            Activation::Advanced { count }
        }
    }

    /// Spawn the balloon and confetti batch. Only meaningful while `Won`;
    /// returns the newly created instances.
    pub fn celebrate<R: Rng + ?Sized>(&mut self, rng: &mut R, now_ms: f64) -> &[EffectInstance] {
        if self.phase != Phase::Won {
            return &[];
        }
        let first = self.effects.len();
        let balloons = celebration::spawn_batch(rng, EffectKind::Balloon, &self.config.balloons, now_ms, &mut self.next_id);
        let confetti = celebration::spawn_batch(rng, EffectKind::Confetti, &self.config.confetti, now_ms, &mut self.next_id);
        self.effects.extend(balloons);
        self.effects.extend(confetti);
        &self.effects[first..]
    }

    /// Drop every effect whose lifetime has elapsed and return their ids.
    pub fn sweep_effects(&mut self, now_ms: f64) -> Vec<u64> {
        let mut expired = Vec::new();
        self.effects.retain(|e| {
            if e.is_expired(now_ms) {
                expired.push(e.id);
                false
            } else {
                true
            }
        });
        expired
    }

    fn spawn_control<R: Rng + ?Sized, S: Stage + ?Sized>(&mut self, rng: &mut R, stage: &mut S) -> &Control {
        let id = self.next_id;
        self.next_id += 1;
        let label = placement::pick_label(rng, &self.config.messages);
        let size = stage.measure(&label);
        let placement = placement::random_placement(rng, stage.container(), size, self.config.max_rotation_deg);
        self.control.insert(Control { id, label, placement })
    }
}
