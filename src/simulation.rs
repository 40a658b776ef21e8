use log::{debug, info};

use crate::{body::total_momentum, integrator, Body, DirectSummation, Snapshot, SnapshotSink};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Stepping,
    Finished,
}

/// Runs a fixed number of force/integration steps over an owned set of bodies.
///
/// Each step computes the force on every body before any body is moved, then
/// integrates all bodies and yields a [`Snapshot`]. `Simulation` is an
/// iterator over these snapshots.
#[derive(Clone, Debug)]
pub struct Simulation {
    bodies: Vec<Body>,
    summation: DirectSummation,
    time_step: f64,
    iterations: usize,
    completed: usize,
    phase: Phase,
}

impl Simulation {
    #[must_use]
    pub fn new(bodies: Vec<Body>, time_step: f64, iterations: usize) -> Self {
        Self {
            bodies,
            summation: DirectSummation::default(),
            time_step,
            iterations,
            completed: 0,
            phase: Phase::Initialized,
        }
    }

    /// Replace the force computation, e.g. to change the gravitational constant.
    #[must_use]
    pub fn summation(mut self, summation: DirectSummation) -> Self {
        self.summation = summation;
        self
    }

    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn rayon_iter(mut self) -> Self {
        self.summation = self.summation.rayon_iter();
        self
    }

    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    #[must_use]
    pub fn into_bodies(self) -> Vec<Body> {
        self.bodies
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    #[must_use]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Perform the next step, or return `None` once all iterations are done.
    pub fn step(&mut self) -> Option<Snapshot> {
        if self.phase == Phase::Initialized {
            info!(
                "simulating {} bodies for {} iterations with time step {}",
                self.bodies.len(),
                self.iterations,
                self.time_step
            );
        }

        if self.completed >= self.iterations {
            if self.phase != Phase::Finished {
                info!("simulation finished after {} iterations", self.completed);
            }
            self.phase = Phase::Finished;
            return None;
        }
        self.phase = Phase::Stepping;

        self.summation.accumulate(&mut self.bodies);
        integrator::integrate(&mut self.bodies, self.time_step);
        self.completed += 1;

        debug!(
            "step {}/{}: total momentum {:?}",
            self.completed,
            self.iterations,
            total_momentum(&self.bodies)
        );

        Some(Snapshot::new(self.completed, &self.bodies))
    }

    /// Run all remaining steps, handing every snapshot to `sink`.
    pub fn run<S: SnapshotSink>(&mut self, mut sink: S) -> Result<(), S::Error> {
        while let Some(snapshot) = self.step() {
            sink.observe(&snapshot)?;
        }
        Ok(())
    }

    /// Run all remaining steps and collect their snapshots.
    pub fn simulate(&mut self) -> Vec<Snapshot> {
        self.by_ref().collect()
    }
}

impl Iterator for Simulation {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.iterations.saturating_sub(self.completed);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Simulation {}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector2;

    use super::*;
    use crate::creator::{BodyCreator, ReferenceCreator};

    fn two_bodies() -> Vec<Body> {
        vec![
            Body::new(1., Vector2::new(-10., 0.), Vector2::zeros()),
            Body::new(1., Vector2::new(10., 0.), Vector2::zeros()),
        ]
    }

    #[test]
    fn reference_step() {
        let mut sim = Simulation::new(two_bodies(), 1., 1);
        let snapshots = sim.simulate();

        assert_eq!(snapshots.len(), 1);
        let b1 = &snapshots[0].bodies()[0];
        assert_abs_diff_eq!(b1.velocity, Vector2::new(0.002525, 0.), epsilon = 1e-12);
        assert_abs_diff_eq!(b1.position, Vector2::new(-9.997475, 0.), epsilon = 1e-12);
        let b2 = &snapshots[0].bodies()[1];
        assert_abs_diff_eq!(b2.position, Vector2::new(9.997475, 0.), epsilon = 1e-12);
    }

    #[test]
    fn phases() {
        let mut sim = Simulation::new(two_bodies(), 0.1, 2);
        assert_eq!(sim.phase(), Phase::Initialized);
        assert_eq!(sim.len(), 2);

        assert!(sim.step().is_some());
        assert_eq!(sim.phase(), Phase::Stepping);
        assert!(sim.step().is_some());
        assert_eq!(sim.completed(), 2);
        assert!(sim.step().is_none());
        assert_eq!(sim.phase(), Phase::Finished);
        assert!(sim.step().is_none());
        assert_eq!(sim.completed(), 2);
    }

    #[test]
    fn zero_iterations() {
        let bodies = ReferenceCreator::seeded(Some(5)).create_bodies(10);
        let mut sim = Simulation::new(bodies.clone(), 1., 0);
        let mut snapshots: Vec<Snapshot> = Vec::new();
        sim.run(&mut snapshots).unwrap();

        assert!(snapshots.is_empty());
        assert_eq!(sim.phase(), Phase::Finished);
        assert_eq!(sim.into_bodies(), bodies);
    }

    #[test]
    fn empty_simulation() {
        let mut sim = Simulation::new(Vec::new(), 1., 3);
        let snapshots = sim.simulate();

        assert_eq!(snapshots.len(), 3);
        assert!(snapshots.iter().all(Snapshot::is_empty));
    }

    #[test]
    fn zero_time_step() {
        let bodies = ReferenceCreator::seeded(Some(11)).create_bodies(8);
        let mut sim = Simulation::new(bodies.clone(), 0., 25);
        assert_eq!(sim.simulate().len(), 25);

        for (after, before) in sim.bodies().iter().zip(&bodies) {
            assert_eq!(after.position(), before.position());
            assert_eq!(after.velocity(), before.velocity());
            assert_eq!(after.mass(), before.mass());
            assert_eq!(*after.force(), Vector2::zeros());
        }
    }

    #[test]
    fn single_body_moves_linearly() {
        let v = Vector2::new(0.3, -0.2);
        let start = Vector2::new(4., 5.);
        let dt = 0.5;
        let mut sim = Simulation::new(vec![Body::new(2., start, v)], dt, 10);

        for (k, snapshot) in sim.by_ref().enumerate() {
            let expected = start + v * dt * (k + 1) as f64;
            assert_abs_diff_eq!(snapshot.bodies()[0].position, expected, epsilon = 1e-12);
            assert_abs_diff_eq!(snapshot.bodies()[0].velocity, v);
        }
        assert_eq!(sim.completed(), 10);
    }

    #[test]
    fn momentum_stays_bounded() {
        let bodies = vec![
            Body::new(1., Vector2::new(-5., 0.), Vector2::new(0., 0.2)),
            Body::new(3., Vector2::new(5., 0.), Vector2::new(0., -0.05)),
        ];
        let initial = total_momentum(&bodies);
        let mut sim = Simulation::new(bodies, 0.01, 5_000);

        while sim.step().is_some() {
            assert_abs_diff_eq!(total_momentum(sim.bodies()), initial, epsilon = 1e-9);
        }
    }

    #[test]
    fn snapshots_follow_bodies() {
        let bodies = ReferenceCreator::seeded(Some(2)).create_bodies(5);
        let mut sim = Simulation::new(bodies, 0.1, 3);

        for (i, snapshot) in sim.by_ref().enumerate() {
            assert_eq!(snapshot.step(), i + 1);
            assert_eq!(snapshot.len(), 5);
        }
        let last = Snapshot::new(3, sim.bodies());
        assert_eq!(last.len(), 5);
    }

    #[test]
    fn gravity_constant() {
        let mut weak = Simulation::new(two_bodies(), 1., 1).summation(DirectSummation::new(0.));
        let snapshot = weak.step().unwrap();

        assert_eq!(snapshot.bodies()[0].position, Vector2::new(-10., 0.));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn rayon_matches_single_threaded() {
        let bodies = ReferenceCreator::seeded(Some(9)).create_bodies(30);
        let single = Simulation::new(bodies.clone(), 0.1, 10).simulate();
        let multi = Simulation::new(bodies, 0.1, 10).rayon_iter().simulate();

        for (s, m) in single.iter().zip(&multi) {
            for (a, b) in s.bodies().iter().zip(m.bodies()) {
                assert_abs_diff_eq!(a.position, b.position, epsilon = 1e-9);
            }
        }
    }
}
