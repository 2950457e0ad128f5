//! End-to-end scenarios exercising a full particle/force-field/integrator
//! stack through the public API, as opposed to the unit tests embedded
//! next to each module.

use approx::assert_abs_diff_eq;
use micromd::bx::Bx;
use micromd::forcefield::{
    BondedPairwiseForcefield, Composite, PointSourceForcefield, SphereSurfaceForcefield,
};
use micromd::grid::SpatialGrid;
use micromd::integrate::{simulate_brownian, simulate_newtonian};
use micromd::potential::{Constant, Harmonic, Spring};
use micromd::system::{ParticleData, System};
use micromd::vector::{Point3, Vector3};
use micromd::{BrownianConfig, Engine, NewtonianConfig};
use std::collections::BTreeSet;

#[test]
fn harmonic_relaxation_stays_bounded_with_low_energy_drift() {
    let mut system = System::new();
    system.add_particle(ParticleData {
        position: Point3::new(1.0, 0.0, 0.0),
        ..Default::default()
    });
    system.add_forcefield(PointSourceForcefield::new(Point3::origin(), Harmonic { k: 1.0 }));

    let config = NewtonianConfig {
        timestep: 0.001,
        steps: 10_000,
    };
    let e0 = system.compute_energy();

    let mut max_radius = 0.0f64;
    let mut track = |_step: u64, system: &System| {
        let r = system.view_positions()[0].coords.norm();
        if r > max_radius {
            max_radius = r;
        }
    };
    simulate_newtonian(&mut system, &config, Some(&mut track)).unwrap();

    let e1 = system.compute_energy();
    assert!(max_radius <= 1.001, "max radius {max_radius} exceeded bound");
    assert!((e1 - e0).abs() / e0 < 0.005, "energy drift exceeded 0.5%");
}

#[test]
fn bonded_pair_relaxes_to_spring_equilibrium() {
    let mut system = System::new();
    system.add_particle(ParticleData {
        position: Point3::new(0.0, 0.0, 0.0),
        ..Default::default()
    });
    system.add_particle(ParticleData {
        position: Point3::new(3.0, 0.0, 0.0),
        ..Default::default()
    });

    let bonded = BondedPairwiseForcefield::new(Spring { k: 1.0, b: 1.0 });
    bonded.add_bonded_pair(0, 1);
    system.add_forcefield(bonded);

    let config = BrownianConfig {
        temperature: 0.0,
        timestep: 0.01,
        spacestep: 0.0,
        steps: 1000,
        seed: 1,
    };
    let mut engine = Engine::seed_from_u64(config.seed);
    simulate_brownian(&mut system, &config, &mut engine, None).unwrap();

    let separation = (system.view_positions()[1] - system.view_positions()[0]).norm();
    assert_abs_diff_eq!(separation, 1.0, epsilon = 0.01);
}

#[test]
fn neighbor_list_search_is_superset_of_brute_force() {
    let mut seed = 7u64;
    let mut next = || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        (seed >> 11) as f64 / (1u64 << 53) as f64
    };

    let mut points = Vec::new();
    for _ in 0..1000 {
        points.push(Point3::new(next() * 0.9, next() * 1.0, next() * 1.1));
    }
    let bx = Bx::periodic(Vector3::new(0.9, 1.0, 1.1), points.len());
    let dcut = 0.3;

    let grid = SpatialGrid::build(&points, &bx, dcut);
    let mut found = Vec::new();
    grid.search(dcut, &mut found);
    let found: BTreeSet<_> = found.into_iter().collect();

    let mut expected = BTreeSet::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if bx.shortest_displacement(&points[i], &points[j]).norm() < dcut {
                expected.insert((i, j));
            }
        }
    }
    assert!(expected.is_subset(&found), "every brute-force pair must appear");
}

#[test]
fn composite_energy_is_sum_of_components() {
    let mut system = System::new();
    system.add_particle(ParticleData::default());

    let mut composite = Composite::new();
    composite.push(PointSourceForcefield::new(Point3::origin(), Constant { e: 1.0 }));
    composite.push(PointSourceForcefield::new(Point3::origin(), Harmonic { k: 2.0 }));
    system.add_forcefield(composite);

    assert_eq!(system.compute_potential_energy(), 1.0);
}

#[test]
fn adaptive_brownian_step_matches_closed_form_bound() {
    let mut system = System::new();
    system.add_particle(ParticleData::default());

    let config = BrownianConfig {
        temperature: 1.0,
        timestep: 1.0,
        spacestep: 0.01,
        steps: 1,
        seed: 1,
    };
    let mut engine = Engine::seed_from_u64(config.seed);
    let before = system.view_positions()[0];
    simulate_brownian(&mut system, &config, &mut engine, None).unwrap();
    let after = system.view_positions()[0];

    // zero force means the adaptive step solves to spacestep²/(2.55·μ·T)
    let expected_dt = config.spacestep * config.spacestep / (2.55 * 1.0 * 1.0);
    assert_abs_diff_eq!(expected_dt, 3.921_568_627_450_98e-5, epsilon = 1e-9);

    // displacement is driven entirely by the random-walk term at this dt;
    // generously bounded well above its expected magnitude
    let sigma = (2.0 * config.temperature * expected_dt).sqrt();
    assert!((after - before).norm() < 10.0 * sigma);
}

#[test]
fn sphere_reaction_force_matches_projection_sum() {
    let mut system = System::new();
    let points = [
        Point3::new(0.9, 0.0, 0.0),
        Point3::new(0.0, 0.7, 0.0),
        Point3::new(0.0, 0.0, 0.5),
    ];
    for p in points {
        system.add_particle(ParticleData {
            position: p,
            ..Default::default()
        });
    }

    let surface = SphereSurfaceForcefield::new(Point3::origin(), 1.0, Harmonic { k: 1.0 }, Harmonic { k: 1.0 });
    let mut out = vec![Vector3::zeros(); 3];
    micromd::forcefield::ForceField::accumulate_force(&surface, &system, &mut out);
    assert!(out.iter().all(|f| f.norm() > 0.0), "inward potential must exert nonzero force here");

    let mut expected = 0.0;
    for (f, p) in out.iter().zip(points.iter()) {
        let r = p - Point3::origin();
        expected -= f.dot(&r) / r.norm();
    }
    assert_abs_diff_eq!(surface.reaction_force(), expected, epsilon = 1e-6);
}
