use nalgebra::Vector2;

/// A point mass moving in the plane.
///
/// The mass is fixed at construction. Position and velocity are advanced by
/// the integrator, while `force` is scratch space that only lives within a
/// single step: it is filled by the force pass and consumed by the integrator.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    mass: f64,
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    force: Vector2<f64>,
}

impl Body {
    /// Create a body with an empty force accumulator.
    ///
    /// A non-positive mass is a caller error and is caught in debug builds.
    #[must_use]
    pub fn new(mass: f64, position: Vector2<f64>, velocity: Vector2<f64>) -> Self {
        debug_assert!(mass > 0., "body mass must be positive, got {mass}");
        Self {
            mass,
            position,
            velocity,
            force: Vector2::zeros(),
        }
    }

    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[must_use]
    pub fn position(&self) -> &Vector2<f64> {
        &self.position
    }

    pub fn position_mut(&mut self) -> &mut Vector2<f64> {
        &mut self.position
    }

    #[must_use]
    pub fn velocity(&self) -> &Vector2<f64> {
        &self.velocity
    }

    pub fn velocity_mut(&mut self) -> &mut Vector2<f64> {
        &mut self.velocity
    }

    /// The force accumulated during the current step.
    #[must_use]
    pub fn force(&self) -> &Vector2<f64> {
        &self.force
    }

    pub fn force_mut(&mut self) -> &mut Vector2<f64> {
        &mut self.force
    }

    /// Linear momentum `m * v`.
    #[must_use]
    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }
}

/// Sum of the linear momenta of all bodies.
#[must_use]
pub fn total_momentum(bodies: &[Body]) -> Vector2<f64> {
    bodies.iter().map(Body::momentum).sum()
}
