//! Random placement and labelling for the active control.

use rand::Rng;
use rand::seq::SliceRandom;

/// Width / height in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Where the control sits inside its container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
}

impl Placement {
    /// True if a control of `control` size at this position lies fully inside
    /// `container`. A control larger than its container only fits at the origin.
    pub fn fits(&self, container: Extent, control: Extent) -> bool {
        let max_x = free_space(container.width, control.width);
        let max_y = free_space(container.height, control.height);
        (0.0..=max_x).contains(&self.x) && (0.0..=max_y).contains(&self.y)
    }
}

// Negative or non-finite room collapses to 0 so the range below is never empty.
fn free_space(outer: f64, inner: f64) -> f64 {
    let room = outer - inner;
    if room.is_finite() && room > 0.0 { room } else { 0.0 }
}

/// Draw x and y independently and uniformly over the free space on each axis,
/// plus a rotation in `[-max_rotation_deg, max_rotation_deg]`.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    container: Extent,
    control: Extent,
    max_rotation_deg: f64,
) -> Placement {
    let max_x = free_space(container.width, control.width);
    let max_y = free_space(container.height, control.height);
    let rot = max_rotation_deg.abs();
    Placement {
        x: rng.gen_range(0.0..=max_x),
        y: rng.gen_range(0.0..=max_y),
        rotation_deg: rng.gen_range(-rot..=rot),
    }
}

/// Uniform pick with replacement; consecutive repeats are allowed.
pub fn pick_label<R: Rng + ?Sized>(rng: &mut R, messages: &[String]) -> String {
    messages.choose(rng).cloned().unwrap_or_default()
}
