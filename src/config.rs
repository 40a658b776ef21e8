//! Run parameters and lenient parsing of their textual form.
//!
//! Every parameter has a default. A value that cannot be parsed is reported
//! as a [`ConfigError`] and replaced by the default, so a bad argument never
//! aborts a run.

use std::{error::Error, fmt};

use log::warn;

use crate::gravity::G;

pub const DEFAULT_BODIES: usize = 10;
pub const DEFAULT_ITERATIONS: usize = 100;
pub const DEFAULT_TIME_STEP: f64 = 1.;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The value does not start with a number.
    Invalid { name: &'static str, value: String },
    /// The value starts with a number but has more characters after it.
    TrailingCharacters { name: &'static str, value: String },
    /// The number does not fit the parameter.
    OutOfRange { name: &'static str, value: String },
    /// A count was negative.
    Negative { name: &'static str, value: String },
}

impl ConfigError {
    /// Name of the parameter the value was given for.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ConfigError::Invalid { name, .. }
            | ConfigError::TrailingCharacters { name, .. }
            | ConfigError::OutOfRange { name, .. }
            | ConfigError::Negative { name, .. } => name,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { name, value } => write!(f, "Invalid number for {name}: {value}"),
            ConfigError::TrailingCharacters { name, value } => {
                write!(f, "Trailing characters after number for {name}: {value}")
            }
            ConfigError::OutOfRange { name, value } => {
                write!(f, "Number out of range for {name}: {value}")
            }
            ConfigError::Negative { name, value } => {
                write!(f, "Negative count for {name}: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Parse a non-negative count.
pub fn parse_count(name: &'static str, value: &str) -> Result<usize, ConfigError> {
    let s = value.trim();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let value = value.to_string();

    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(ConfigError::Invalid { name, value });
    }
    if digits < unsigned.len() {
        return Err(ConfigError::TrailingCharacters { name, value });
    }

    match unsigned.parse::<usize>() {
        Err(_) => Err(ConfigError::OutOfRange { name, value }),
        Ok(n) if negative && n != 0 => Err(ConfigError::Negative { name, value }),
        Ok(n) => Ok(n),
    }
}

/// Parse a finite real number, such as the time step or the gravitational constant.
///
/// A negative time step runs the simulation backwards.
pub fn parse_real(name: &'static str, value: &str) -> Result<f64, ConfigError> {
    let s = value.trim();
    match s.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        Ok(_) => Err(ConfigError::OutOfRange {
            name,
            value: value.to_string(),
        }),
        Err(_) => {
            let has_number_prefix = s
                .char_indices()
                .skip(1)
                .any(|(i, _)| s[..i].parse::<f64>().is_ok());
            if has_number_prefix {
                Err(ConfigError::TrailingCharacters {
                    name,
                    value: value.to_string(),
                })
            } else {
                Err(ConfigError::Invalid {
                    name,
                    value: value.to_string(),
                })
            }
        }
    }
}

/// Parameters of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub bodies: usize,
    pub iterations: usize,
    pub time_step: f64,
    /// Gravitational constant used by the force computation.
    pub gravity: f64,
    /// Seed for the body generator. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bodies: DEFAULT_BODIES,
            iterations: DEFAULT_ITERATIONS,
            time_step: DEFAULT_TIME_STEP,
            gravity: G,
            seed: None,
        }
    }
}

impl Config {
    /// Build a configuration from the textual body count, iteration count,
    /// time step and gravitational constant. Missing values use the defaults;
    /// invalid ones are logged, returned and replaced by the defaults.
    pub fn from_args(
        bodies: Option<&str>,
        iterations: Option<&str>,
        time_step: Option<&str>,
        gravity: Option<&str>,
    ) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        let mut recover = |result: Result<(), ConfigError>| {
            if let Err(e) = result {
                warn!("{e}, using the default");
                errors.push(e);
            }
        };

        if let Some(value) = bodies {
            recover(parse_count("bodies", value).map(|n| config.bodies = n));
        }
        if let Some(value) = iterations {
            recover(parse_count("iterations", value).map(|n| config.iterations = n));
        }
        if let Some(value) = time_step {
            recover(parse_real("time step", value).map(|dt| config.time_step = dt));
        }
        if let Some(value) = gravity {
            recover(parse_real("gravity", value).map(|g| config.gravity = g));
        }

        (config, errors)
    }

    #[must_use]
    pub fn summation(&self) -> crate::DirectSummation {
        crate::DirectSummation::new(self.gravity)
    }

    /// Create the bodies from the reference distributions and set up the run.
    #[cfg(feature = "randomization")]
    #[must_use]
    pub fn simulation(&self) -> crate::Simulation {
        use crate::creator::{BodyCreator, ReferenceCreator};

        let bodies = ReferenceCreator::seeded(self.seed).create_bodies(self.bodies);
        crate::Simulation::new(bodies, self.time_step, self.iterations).summation(self.summation())
    }
}
