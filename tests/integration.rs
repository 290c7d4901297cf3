// Integration tests (native) for the `evasive-button` crate.
// These drive the session state machine through its public API with a fixed
// geometry stage, so they run under `cargo test` on the host.

use evasive_button::session::{EffectKind, Extent};
use evasive_button::{Activation, GameConfig, Phase, Session, Stage};
use rand::SeedableRng;
use rand::rngs::SmallRng;

struct Area {
    width: f64,
    height: f64,
    control: Extent,
}

impl Stage for Area {
    fn container(&self) -> Extent {
        Extent::new(self.width, self.height)
    }
    fn measure(&mut self, _label: &str) -> Extent {
        self.control
    }
}

fn area() -> Area {
    Area { width: 480.0, height: 320.0, control: Extent::new(120.0, 44.0) }
}

#[test]
fn five_activations_win_the_round() {
    let mut session = Session::new(GameConfig::default());
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut stage = area();
    session.start(&mut rng, &mut stage);

    for n in 1..=4 {
        assert_eq!(session.on_activate(&mut rng, &mut stage), Activation::Advanced { count: n });
        assert_eq!(session.activation_count(), n);
        assert_eq!(session.phase(), Phase::Playing);
        assert!(session.control().is_some());
    }
    assert_eq!(session.on_activate(&mut rng, &mut stage), Activation::Won { count: 5 });
    assert_eq!(session.phase(), Phase::Won);
    assert_eq!(session.activation_count(), 5);
    assert!(session.control().is_none());
}

#[test]
fn hovering_never_counts() {
    let mut session = Session::new(GameConfig::default());
    let mut rng = SmallRng::seed_from_u64(77);
    let mut stage = area();
    session.start(&mut rng, &mut stage);
    session.on_activate(&mut rng, &mut stage);
    for _ in 0..200 {
        session.on_hover(&mut rng, &mut stage);
    }
    assert_eq!(session.activation_count(), 1);
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn every_spawn_stays_inside_the_area() {
    let mut session = Session::new(GameConfig { target_count: 1_000, ..GameConfig::default() });
    let mut rng = SmallRng::seed_from_u64(5);
    let mut stage = area();
    session.start(&mut rng, &mut stage);
    for i in 0..500 {
        if i % 2 == 0 {
            session.on_hover(&mut rng, &mut stage);
        } else {
            session.on_activate(&mut rng, &mut stage);
        }
        let p = session.control().unwrap().placement;
        assert!((0.0..=360.0).contains(&p.x), "x = {}", p.x);
        assert!((0.0..=276.0).contains(&p.y), "y = {}", p.y);
        assert!((-10.0..=10.0).contains(&p.rotation_deg));
    }
}

#[test]
fn labels_vary_across_spawns() {
    let mut session = Session::new(GameConfig::default());
    let mut rng = SmallRng::seed_from_u64(31);
    let mut stage = area();
    session.start(&mut rng, &mut stage);
    let mut labels = std::collections::HashSet::new();
    for _ in 0..100 {
        session.on_hover(&mut rng, &mut stage);
        labels.insert(session.control().unwrap().label.clone());
    }
    assert!(labels.len() > 1);
}

#[test]
fn reset_from_either_phase() {
    let mut session = Session::new(GameConfig::default());
    let mut rng = SmallRng::seed_from_u64(8);
    let mut stage = area();
    session.start(&mut rng, &mut stage);
    session.on_activate(&mut rng, &mut stage);
    session.reset(&mut rng, &mut stage);
    assert_eq!((session.phase(), session.activation_count()), (Phase::Playing, 0));

    for _ in 0..5 {
        session.on_activate(&mut rng, &mut stage);
    }
    assert_eq!(session.phase(), Phase::Won);
    session.reset(&mut rng, &mut stage);
    assert_eq!((session.phase(), session.activation_count()), (Phase::Playing, 0));
    assert!(session.control().is_some());
}

#[test]
fn celebration_cleans_up_after_itself() {
    let mut session = Session::new(GameConfig::default());
    let mut rng = SmallRng::seed_from_u64(13);
    let mut stage = area();
    session.start(&mut rng, &mut stage);
    for _ in 0..5 {
        session.on_activate(&mut rng, &mut stage);
    }
    let t0 = 50.0;
    let spawned = session.celebrate(&mut rng, t0).to_vec();
    assert_eq!(spawned.iter().filter(|e| e.kind == EffectKind::Balloon).count(), 10);
    assert_eq!(spawned.iter().filter(|e| e.kind == EffectKind::Confetti).count(), 100);

    session.sweep_effects(t0 + 5_000.0);
    assert!(session.effects().iter().all(|e| e.kind == EffectKind::Balloon));
    session.sweep_effects(t0 + 10_000.0);
    assert!(session.effects().is_empty());
}

#[test]
fn stale_generation_is_detectable_after_reset() {
    let mut session = Session::new(GameConfig::default());
    let mut rng = SmallRng::seed_from_u64(99);
    let mut stage = area();
    session.start(&mut rng, &mut stage);
    for _ in 0..5 {
        session.on_activate(&mut rng, &mut stage);
    }
    // A reveal timer scheduled now carries this generation.
    let scheduled_under = session.generation();
    session.reset(&mut rng, &mut stage);
    assert_ne!(session.generation(), scheduled_under);
    assert!(session.celebrate(&mut rng, 0.0).is_empty());
}
