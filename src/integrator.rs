use nalgebra::Vector2;

use crate::Body;

/// Advance a body by one explicit Euler step of size `time_step`.
///
/// The velocity is updated first and the new velocity moves the position.
/// The force accumulator is consumed and left at zero.
pub fn euler_step(body: &mut Body, time_step: f64) {
    let acc = *body.force() / body.mass();
    *body.velocity_mut() += acc * time_step;

    let v = *body.velocity();
    *body.position_mut() += v * time_step;

    *body.force_mut() = Vector2::zeros();
}

/// Integrate every body independently.
pub fn integrate(bodies: &mut [Body], time_step: f64) {
    for body in bodies {
        euler_step(body, time_step);
    }
}
