//! Balloon and confetti batches spawned on a win.
//!
//! Instances are plain data: the DOM layer renders them and schedules one
//! removal timer each. Expiry is fixed at spawn time and does not wait for
//! the CSS animation to finish.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{EffectConfig, Span};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Balloon,
    Confetti,
}

impl EffectKind {
    /// CSS class used by the page stylesheet.
    pub fn class_name(self) -> &'static str {
        match self {
            EffectKind::Balloon => "balloon",
            EffectKind::Confetti => "confetti",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectInstance {
    pub id: u64,
    pub kind: EffectKind,
    pub color: String,
    pub left_vw: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub spawned_at_ms: f64,
    pub expires_at_ms: f64,
}

impl EffectInstance {
    pub fn lifetime_ms(&self) -> f64 {
        self.expires_at_ms - self.spawned_at_ms
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, span: Span) -> f64 {
    if span.max > span.min { rng.gen_range(span.min..=span.max) } else { span.min }
}

/// Build `cfg.count` instances of `kind`, taking ids from `next_id`.
pub fn spawn_batch<R: Rng + ?Sized>(
    rng: &mut R,
    kind: EffectKind,
    cfg: &EffectConfig,
    now_ms: f64,
    next_id: &mut u64,
) -> Vec<EffectInstance> {
    (0..cfg.count)
        .map(|_| {
            let id = *next_id;
            *next_id += 1;
            EffectInstance {
                id,
                kind,
                color: cfg.colors.choose(rng).cloned().unwrap_or_default(),
                left_vw: sample(rng, cfg.left_vw),
                duration_s: sample(rng, cfg.duration_s),
                delay_s: sample(rng, cfg.delay_s),
                spawned_at_ms: now_ms,
                expires_at_ms: now_ms + cfg.lifetime_ms as f64,
            }
        })
        .collect()
}
