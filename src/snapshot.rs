use std::{convert::Infallible, fmt};

use nalgebra::Vector2;

use crate::Body;

/// Half the side length of the square conventionally used to display bodies.
pub const VIEWPORT: f64 = 75.;

/// Whether a position lies inside `[-VIEWPORT, VIEWPORT]` on both axes.
#[must_use]
pub fn in_viewport(position: &Vector2<f64>) -> bool {
    position.iter().all(|p| p.abs() <= VIEWPORT)
}

/// The observable state of one body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyState {
    pub mass: f64,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
}

impl From<&Body> for BodyState {
    fn from(body: &Body) -> Self {
        Self {
            mass: body.mass(),
            position: *body.position(),
            velocity: *body.velocity(),
        }
    }
}

impl fmt::Display for BodyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  m = {:>4}  x = {:>6}  y = {:>6}  v = {:>6}  w = {:>6}",
            significant(self.mass),
            significant(self.position.x),
            significant(self.position.y),
            significant(self.velocity.x),
            significant(self.velocity.y),
        )
    }
}

/// Format with three significant digits like `printf("%.3g")`: scientific
/// notation when the rounded exponent is below -4 or at least 3, trailing
/// zeros removed.
fn significant(value: f64) -> String {
    if value == 0. || !value.is_finite() {
        return format!("{value}");
    }

    // `{:.2e}` rounds to three significant digits, e.g. "9.99e2" or "1.00e3"
    let rounded = format!("{value:.2e}");
    let (mantissa, exp) = match rounded.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (rounded.as_str(), 0),
    };

    if !(-4..3).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs());
    }

    let decimals = (2 - exp) as usize;
    trim_zeros(&format!("{value:.decimals$}")).to_string()
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// The state of all bodies after a completed step, in body order.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    step: usize,
    bodies: Vec<BodyState>,
}

impl Snapshot {
    #[must_use]
    pub fn new(step: usize, bodies: &[Body]) -> Self {
        Self {
            step,
            bodies: bodies.iter().map(BodyState::from).collect(),
        }
    }

    /// Number of completed steps when this snapshot was taken, starting at 1.
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub fn bodies(&self) -> &[BodyState] {
        &self.bodies
    }

    pub fn positions(&self) -> impl Iterator<Item = &Vector2<f64>> {
        self.bodies.iter().map(|b| &b.position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Receives the snapshot of every completed step.
pub trait SnapshotSink {
    type Error;

    fn observe(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

impl SnapshotSink for Vec<Snapshot> {
    type Error = Infallible;

    fn observe(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        self.push(snapshot.clone());
        Ok(())
    }
}

impl<S: SnapshotSink> SnapshotSink for &mut S {
    type Error = S::Error;

    fn observe(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        (**self).observe(snapshot)
    }
}
