use nalgebra::Vector2;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::Body;

/// The gravitational constant of the simulation.
///
/// This is a model parameter, not the physical constant.
pub const G: f64 = 1.01;

/// Force exerted on a body of `mass1` at `position1` by a body of `mass2` at `position2`.
///
/// Coincident positions divide by zero and yield non-finite components.
#[must_use]
pub fn force(
    g: f64,
    mass1: f64,
    position1: &Vector2<f64>,
    mass2: f64,
    position2: &Vector2<f64>,
) -> Vector2<f64> {
    let r = position2 - position1;
    let distance = r.norm();
    r * (g * mass1 * mass2 / (distance * distance * distance))
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    #[default]
    SingleThreaded,
    #[cfg(feature = "rayon")]
    RayonIter,
}

/// Direct O(N²) summation of the pairwise gravitational forces.
#[derive(Copy, Clone, Debug)]
pub struct DirectSummation {
    g: f64,
    execution: Execution,
}

impl Default for DirectSummation {
    fn default() -> Self {
        Self::new(G)
    }
}

impl DirectSummation {
    #[must_use]
    pub fn new(g: f64) -> Self {
        Self {
            g,
            execution: Execution::SingleThreaded,
        }
    }

    /// Use Rayon to compute the net forces of different bodies in parallel.
    ///
    /// All forces are computed from the unmodified bodies before any of them is written back.
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn rayon_iter(mut self) -> Self {
        self.execution = Execution::RayonIter;
        self
    }

    #[must_use]
    pub fn g(&self) -> f64 {
        self.g
    }

    #[must_use]
    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// Net force on body `i` from every other body.
    #[must_use]
    pub fn net_force(&self, bodies: &[Body], i: usize) -> Vector2<f64> {
        let b1 = &bodies[i];
        bodies
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, b2)| force(self.g, b1.mass(), b1.position(), b2.mass(), b2.position()))
            .sum()
    }

    /// Overwrite the force accumulator of every body with its net force.
    pub fn accumulate(&self, bodies: &mut [Body]) {
        match self.execution {
            Execution::SingleThreaded => {
                for i in 0..bodies.len() {
                    *bodies[i].force_mut() = Vector2::zeros();
                    for j in 0..bodies.len() {
                        if i == j {
                            continue;
                        }
                        let (b1, b2) = (&bodies[i], &bodies[j]);
                        let f = force(self.g, b1.mass(), b1.position(), b2.mass(), b2.position());
                        *bodies[i].force_mut() += f;
                    }
                }
            }
            #[cfg(feature = "rayon")]
            Execution::RayonIter => {
                let view: &[Body] = bodies;
                let forces: Vec<_> = (0..view.len())
                    .into_par_iter()
                    .map(|i| self.net_force(view, i))
                    .collect();

                for (body, f) in bodies.iter_mut().zip(forces) {
                    *body.force_mut() = f;
                }
            }
        }
    }
}
