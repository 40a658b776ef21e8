use log::trace;
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Weibull};

use crate::Body;

/// Offset added to every sampled mass, keeping masses strictly positive.
pub const MASS_OFFSET: f64 = 1.;
pub const MASS_SCALE: f64 = 2.;
pub const MASS_SHAPE: f64 = 1.;
pub const POSITION_STD_DEV: f64 = 10.;
pub const VELOCITY_STD_DEV: f64 = 0.5;

pub trait BodyCreator {
    fn create_body(&mut self) -> Body;

    fn create_bodies(&mut self, n: usize) -> Vec<Body> {
        (0..n).map(|_| self.create_body()).collect()
    }
}

/// A distribution moved along the real line by a constant offset.
#[derive(Copy, Clone, Debug)]
pub struct Shifted<D> {
    distr: D,
    offset: f64,
}

impl<D: Distribution<f64>> Shifted<D> {
    pub fn new(distr: D, offset: f64) -> Self {
        Self { distr, offset }
    }
}

impl<D: Distribution<f64>> Distribution<f64> for Shifted<D> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.offset + self.distr.sample(rng)
    }
}

/// The default mass distribution, `Weibull(shape 1, scale 2) + 1`.
#[must_use]
pub fn mass_distribution() -> Shifted<Weibull<f64>> {
    let weibull = Weibull::new(MASS_SCALE, MASS_SHAPE).expect("valid Weibull parameters");
    Shifted::new(weibull, MASS_OFFSET)
}

pub type ReferenceCreator<R> = DistrBodyCreator<R, Shifted<Weibull<f64>>, Normal<f64>, Normal<f64>>;

/// Creates bodies whose mass and each position and velocity component are
/// drawn independently from the given distributions.
pub struct DistrBodyCreator<R, MD, PD, VD>
where
    R: Rng,
    MD: Distribution<f64>,
    PD: Distribution<f64>,
    VD: Distribution<f64>,
{
    rng: R,
    mass_distr: MD,
    position_distr: PD,
    velocity_distr: VD,
}

impl<R, MD, PD, VD> DistrBodyCreator<R, MD, PD, VD>
where
    R: Rng,
    MD: Distribution<f64>,
    PD: Distribution<f64>,
    VD: Distribution<f64>,
{
    pub fn new(mass_distr: MD, position_distr: PD, velocity_distr: VD, rng: R) -> Self {
        Self {
            rng,
            mass_distr,
            position_distr,
            velocity_distr,
        }
    }
}

impl<R: Rng> DistrBodyCreator<R, Shifted<Weibull<f64>>, Normal<f64>, Normal<f64>> {
    /// Weibull masses, positions from `N(0, 10)` and velocities from `N(0, 0.5)`.
    pub fn reference(rng: R) -> Self {
        Self::new(
            mass_distribution(),
            Normal::new(0., POSITION_STD_DEV).expect("valid position deviation"),
            Normal::new(0., VELOCITY_STD_DEV).expect("valid velocity deviation"),
            rng,
        )
    }
}

impl ReferenceCreator<StdRng> {
    /// Seed a single generator for the whole run, from entropy if no seed is given.
    pub fn seeded(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                trace!("seeding body generator with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => {
                trace!("seeding body generator from entropy");
                StdRng::from_entropy()
            }
        };
        Self::reference(rng)
    }
}

impl<R, MD, PD, VD> BodyCreator for DistrBodyCreator<R, MD, PD, VD>
where
    R: Rng,
    MD: Distribution<f64>,
    PD: Distribution<f64>,
    VD: Distribution<f64>,
{
    fn create_body(&mut self) -> Body {
        let rng = &mut self.rng;

        let m = self.mass_distr.sample(rng);
        let pos = Vector2::new(
            self.position_distr.sample(rng),
            self.position_distr.sample(rng),
        );
        let vel = Vector2::new(
            self.velocity_distr.sample(rng),
            self.velocity_distr.sample(rng),
        );

        Body::new(m, pos, vel)
    }
}
