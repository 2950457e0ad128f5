use crate::config::{require_finite, BrownianConfig};
use crate::error::MdError;
use crate::rng::Engine;
use crate::system::System;
use crate::vector::Vector3;
use tracing::trace;

/// Overdamped (BAOAB-limit) Brownian dynamics.
///
/// `callback`, if given, is invoked with the 1-based step index after
/// each step completes.
pub fn simulate_brownian(
    system: &mut System,
    config: &BrownianConfig,
    engine: &mut Engine,
    mut callback: Option<&mut dyn FnMut(u64, &System)>,
) -> Result<(), MdError> {
    require_finite(config.temperature, "temperature")?;
    require_finite(config.timestep, "timestep")?;
    require_finite(config.spacestep, "spacestep")?;

    let n = system.particle_count();
    let mut force = vec![Vector3::zeros(); n];
    let mut w_prev = vec![Vector3::zeros(); n];

    for step in 1..=config.steps {
        force.iter_mut().for_each(|f| *f = Vector3::zeros());
        system.accumulate_force(&mut force);

        let dt = if config.spacestep > 0.0 {
            adaptive_timestep(system, &force, config)
        } else {
            config.timestep
        };

        let mobilities = system.view_mobilities().to_vec();
        let positions = system.view_positions_mut();
        for i in 0..n {
            let mu_dt = dt * mobilities[i];
            let sigma = (2.0 * config.temperature * mu_dt).max(0.0).sqrt();
            let w_new = sigma * engine.sample_normal3();
            positions[i] += mu_dt * force[i];
            positions[i] += 0.5 * (w_new + w_prev[i]);
            w_prev[i] = w_new;
        }

        if let Some(cb) = callback.as_deref_mut() {
            cb(step, system);
        }
    }

    Ok(())
}

/// Solves, per particle, `a·Δt² + b·Δt − c = 0` with `a = μ²‖F‖²`,
/// `b = 2.55·μ·T`, `c = spacestep²`, using the numerically stable form
/// `Δt = 2c / (b + √(b² + 4ac))` (avoids the cancellation the naive
/// `(-b + √(b²+4ac)) / 2a` form suffers as `a → 0`). Returns the minimum
/// root across all particles, clamped above by `config.timestep`.
fn adaptive_timestep(system: &System, force: &[Vector3], config: &BrownianConfig) -> f64 {
    let c = config.spacestep * config.spacestep;
    let mut min_dt = config.timestep;
    for (mobility, f) in system.view_mobilities().iter().zip(force.iter()) {
        let a = mobility * mobility * f.norm_squared();
        let b = 2.55 * mobility * config.temperature;
        let root = if b == 0.0 && a == 0.0 {
            config.timestep
        } else {
            2.0 * c / (b + (b * b + 4.0 * a * c).sqrt())
        };
        if root < min_dt {
            min_dt = root;
        }
    }
    trace!(dt = min_dt, "adaptive brownian timestep");
    min_dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forcefield::PointSourceForcefield;
    use crate::potential::Harmonic;
    use crate::system::ParticleData;
    use crate::vector::Point3;

    #[test]
    fn zero_temperature_is_deterministic_descent() {
        let mut system = System::new();
        system.add_particle(ParticleData {
            position: Point3::new(1.0, 0.0, 0.0),
            ..Default::default()
        });
        system.add_forcefield(PointSourceForcefield::new(Point3::origin(), Harmonic { k: 1.0 }));

        let config = BrownianConfig {
            temperature: 0.0,
            timestep: 0.01,
            spacestep: 0.0,
            steps: 50,
            seed: 1,
        };
        let mut engine = Engine::seed_from_u64(config.seed);
        simulate_brownian(&mut system, &config, &mut engine, None).unwrap();
        assert!(system.view_positions()[0].x.abs() < 1.0);
        assert!(system.view_positions()[0].x > 0.0);
    }

    #[test]
    fn callback_receives_one_based_step_index() {
        let mut system = System::new();
        system.add_particle(ParticleData::default());
        let config = BrownianConfig {
            temperature: 0.0,
            timestep: 0.01,
            spacestep: 0.0,
            steps: 3,
            seed: 1,
        };
        let mut engine = Engine::seed_from_u64(config.seed);
        let mut seen = Vec::new();
        let mut cb = |step: u64, _: &System| seen.push(step);
        simulate_brownian(&mut system, &config, &mut engine, Some(&mut cb)).unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn nonfinite_temperature_errors() {
        let mut system = System::new();
        let config = BrownianConfig {
            temperature: f64::NAN,
            timestep: 0.01,
            spacestep: 0.0,
            steps: 1,
            seed: 1,
        };
        let mut engine = Engine::seed_from_u64(1);
        assert!(simulate_brownian(&mut system, &config, &mut engine, None).is_err());
    }
}
