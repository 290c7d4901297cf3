//! Game tunables.
//!
//! Every constant the game uses lives here so a page can override them through
//! `start_game_with_config` (feature `serde_json`). `Default` reproduces the
//! stock game: five catches, ten balloons, a hundred confetti pieces.

use crate::error::ConfigError;

/// Inclusive `[min, max]` range used for randomized animation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Parameters for one batch of celebration effects (balloons or confetti).
#[derive(Clone, Debug, PartialEq)]
pub struct EffectConfig {
    pub count: usize,
    pub colors: Vec<String>,
    /// Horizontal start position in viewport-width units.
    pub left_vw: Span,
    pub duration_s: Span,
    pub delay_s: Span,
    /// Fixed time after which the instance is removed, regardless of animation.
    pub lifetime_ms: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct MediaConfig {
    pub success_image: String,
    /// Substituted once when the success image fails to load on reveal.
    pub success_image_fallback: String,
    /// Substituted once when the image fails during the startup check.
    pub placeholder_image: String,
    pub success_sound: String,
    pub success_volume: f64,
    pub reset_sound: String,
    pub reset_volume: f64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            success_image: "./success-imagee.jpg".into(),
            success_image_fallback: "https://i.imgur.com/7D3eAa3.png".into(),
            placeholder_image: "https://via.placeholder.com/500x300?text=Love+You".into(),
            success_sound: "https://www.soundjay.com/human/sounds/applause-8.mp3".into(),
            success_volume: 0.5,
            reset_sound: "https://www.soundjay.com/buttons/button-09a.mp3".into(),
            reset_volume: 0.3,
        }
    }
}

/// Presentation delays, all in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct TimingConfig {
    pub reveal_delay_ms: u32,
    pub clicked_class_ms: u32,
    pub hide_delay_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { reveal_delay_ms: 50, clicked_class_ms: 300, hide_delay_ms: 500 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct GameConfig {
    /// Activations needed to win.
    pub target_count: u32,
    pub messages: Vec<String>,
    /// Control rotation is drawn from `[-max_rotation_deg, max_rotation_deg]`.
    pub max_rotation_deg: f64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "overrides::balloons"))]
    pub balloons: EffectConfig,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "overrides::confetti"))]
    pub confetti: EffectConfig,
    pub media: MediaConfig,
    pub timing: TimingConfig,
}

/// Largest rotation accepted, in degrees.
pub const MAX_ROTATION_DEG: f64 = 360.0;
/// Largest magnitude accepted for any `Span` bound.
pub const SPAN_LIMIT: f64 = 1.0e6;

const BALLOON_COLORS: &[&str] = &["#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#ffcc5c", "#ff6f69"];
const CONFETTI_COLORS: &[&str] = &["#ff6b6b", "#4ecdc4", "#45b7d1", "#ffcc5c", "#ff6f69"];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_count: 5,
            messages: owned(crate::BUTTON_MESSAGES),
            max_rotation_deg: 10.0,
            balloons: EffectConfig {
                count: 10,
                colors: owned(BALLOON_COLORS),
                left_vw: Span::new(0.0, 100.0),
                duration_s: Span::new(5.0, 10.0),
                delay_s: Span::new(0.0, 3.0),
                lifetime_ms: 10_000,
            },
            confetti: EffectConfig {
                count: 100,
                colors: owned(CONFETTI_COLORS),
                left_vw: Span::new(0.0, 100.0),
                duration_s: Span::new(2.0, 5.0),
                delay_s: Span::new(0.0, 0.5),
                lifetime_ms: 5_000,
            },
            media: MediaConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_count == 0 {
            return Err(ConfigError::ZeroTarget);
        }
        if self.messages.is_empty() {
            return Err(ConfigError::NoMessages);
        }
        if !(0.0..=MAX_ROTATION_DEG).contains(&self.max_rotation_deg) {
            return Err(ConfigError::InvalidRotation(self.max_rotation_deg));
        }
        validate_effect("balloons", &self.balloons)?;
        validate_effect("confetti", &self.confetti)?;
        for (name, volume) in [("success", self.media.success_volume), ("reset", self.media.reset_volume)] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::VolumeOutOfRange { sound: name, volume });
            }
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn validate_effect(effect: &'static str, cfg: &EffectConfig) -> Result<(), ConfigError> {
    if cfg.count > 0 && cfg.colors.is_empty() {
        return Err(ConfigError::EmptyPalette(effect));
    }
    for (field, span) in [("left_vw", cfg.left_vw), ("duration_s", cfg.duration_s), ("delay_s", cfg.delay_s)] {
        // NaN bounds fail this check too.
        if !(span.min <= span.max) {
            return Err(ConfigError::InvertedRange { effect, field, min: span.min, max: span.max });
        }
        // Wider ranges overflow the uniform float sampler.
        if span.min < -SPAN_LIMIT || span.max > SPAN_LIMIT {
            return Err(ConfigError::SpanOutOfBounds { effect, field, min: span.min, max: span.max, limit: SPAN_LIMIT });
        }
    }
    Ok(())
}

/// Partial overrides for the nested effect tables: any field left out keeps
/// the stock value for that effect.
#[cfg(feature = "serde")]
mod overrides {
    use serde::{Deserialize, Deserializer};

    use super::{EffectConfig, GameConfig, Span};

    #[derive(Deserialize)]
    struct SpanOverride {
        min: Option<f64>,
        max: Option<f64>,
    }

    impl SpanOverride {
        fn apply(self, base: Span) -> Span {
            Span::new(self.min.unwrap_or(base.min), self.max.unwrap_or(base.max))
        }
    }

    #[derive(Deserialize)]
    struct EffectOverride {
        count: Option<usize>,
        colors: Option<Vec<String>>,
        left_vw: Option<SpanOverride>,
        duration_s: Option<SpanOverride>,
        delay_s: Option<SpanOverride>,
        lifetime_ms: Option<u32>,
    }

    impl EffectOverride {
        fn apply(self, base: EffectConfig) -> EffectConfig {
            EffectConfig {
                count: self.count.unwrap_or(base.count),
                colors: self.colors.unwrap_or(base.colors),
                left_vw: self.left_vw.map_or(base.left_vw, |o| o.apply(base.left_vw)),
                duration_s: self.duration_s.map_or(base.duration_s, |o| o.apply(base.duration_s)),
                delay_s: self.delay_s.map_or(base.delay_s, |o| o.apply(base.delay_s)),
                lifetime_ms: self.lifetime_ms.unwrap_or(base.lifetime_ms),
            }
        }
    }

    pub(super) fn balloons<'de, D: Deserializer<'de>>(d: D) -> Result<EffectConfig, D::Error> {
        Ok(EffectOverride::deserialize(d)?.apply(GameConfig::default().balloons))
    }

    pub(super) fn confetti<'de, D: Deserializer<'de>>(d: D) -> Result<EffectConfig, D::Error> {
        Ok(EffectOverride::deserialize(d)?.apply(GameConfig::default().confetti))
    }
}
