//! Aggregates per-particle attributes and a composite force field; exposes
//! the energy/force reduction every integrator drives.

use crate::attribute::{AttributeTable, AttributeTag};
use crate::forcefield::ForceField;
use crate::vector::{Point3, Vector3};
use std::rc::Rc;
use tracing::debug;

/// Initial values for a newly added particle. `Default` matches the
/// intrinsic attributes' documented defaults (mass 1, mobility 1, position
/// origin, velocity zero).
#[derive(Debug, Clone, Copy)]
pub struct ParticleData {
    pub mass: f64,
    pub mobility: f64,
    pub position: Point3,
    pub velocity: Vector3,
}

impl Default for ParticleData {
    fn default() -> Self {
        ParticleData {
            mass: 1.0,
            mobility: 1.0,
            position: Point3::origin(),
            velocity: Vector3::zeros(),
        }
    }
}

/// A read-only snapshot of one particle's intrinsic attributes, bundled
/// with its index. All fields are `Copy`, so this borrows nothing from the
/// system and stays valid across subsequent mutation.
#[derive(Debug, Clone, Copy)]
pub struct ParticleRef {
    pub index: usize,
    pub mass: f64,
    pub mobility: f64,
    pub position: Point3,
    pub velocity: Vector3,
}

pub struct System {
    masses: Vec<f64>,
    mobilities: Vec<f64>,
    positions: Vec<Point3>,
    velocities: Vec<Vector3>,
    attributes: AttributeTable,
    force_fields: Vec<Rc<dyn ForceField>>,
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

impl System {
    pub fn new() -> Self {
        System {
            masses: Vec::new(),
            mobilities: Vec::new(),
            positions: Vec::new(),
            velocities: Vec::new(),
            attributes: AttributeTable::new(),
            force_fields: Vec::new(),
        }
    }

    /// Appends one particle, extending every column (intrinsic and
    /// user-defined) by one default/given-valued element.
    pub fn add_particle(&mut self, data: ParticleData) -> usize {
        let index = self.masses.len();
        self.masses.push(data.mass);
        self.mobilities.push(data.mobility);
        self.positions.push(data.position);
        self.velocities.push(data.velocity);
        self.attributes.resize(self.masses.len());
        index
    }

    pub fn particle_count(&self) -> usize {
        self.masses.len()
    }

    pub fn particles(&self) -> impl Iterator<Item = ParticleRef> + '_ {
        (0..self.particle_count()).map(move |i| ParticleRef {
            index: i,
            mass: self.masses[i],
            mobility: self.mobilities[i],
            position: self.positions[i],
            velocity: self.velocities[i],
        })
    }

    pub fn view_masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn view_masses_mut(&mut self) -> &mut [f64] {
        &mut self.masses
    }

    pub fn view_mobilities(&self) -> &[f64] {
        &self.mobilities
    }

    pub fn view_mobilities_mut(&mut self) -> &mut [f64] {
        &mut self.mobilities
    }

    pub fn view_positions(&self) -> &[Point3] {
        &self.positions
    }

    pub fn view_positions_mut(&mut self) -> &mut [Point3] {
        &mut self.positions
    }

    pub fn view_velocities(&self) -> &[Vector3] {
        &self.velocities
    }

    pub fn view_velocities_mut(&mut self) -> &mut [Vector3] {
        &mut self.velocities
    }

    /// Creates the column for a user-defined attribute `Tag` if absent.
    pub fn add_attribute<Tag: AttributeTag>(&mut self) {
        self.attributes.require::<Tag>();
    }

    pub fn view<Tag: AttributeTag>(&self) -> &[Tag::Value] {
        self.attributes.view::<Tag>()
    }

    pub fn view_mut<Tag: AttributeTag>(&mut self) -> &mut [Tag::Value] {
        self.attributes.view_mut::<Tag>()
    }

    /// Clones `ff` into the system as an owned force field; the caller
    /// retains no handle to mutate it further.
    pub fn add_forcefield<F: ForceField + 'static>(&mut self, ff: F) {
        debug!(index = self.force_fields.len(), "registering owned force field");
        self.force_fields.push(Rc::new(ff));
    }

    /// Registers a force field the caller already holds as a shared
    /// handle, so external code can keep mutating it (via its own interior
    /// mutability) after registration.
    pub fn add_forcefield_rc(&mut self, ff: Rc<dyn ForceField>) {
        debug!(index = self.force_fields.len(), "registering shared force field");
        self.force_fields.push(ff);
    }

    pub fn compute_kinetic_energy(&self) -> f64 {
        self.masses
            .iter()
            .zip(self.velocities.iter())
            .map(|(m, v)| 0.5 * m * v.norm_squared())
            .sum()
    }

    /// Sum of every registered force field's `energy`, in registration
    /// order (the sum is associative to floating-point roundoff, so order
    /// only matters for bitwise reproducibility, not correctness).
    pub fn compute_potential_energy(&self) -> f64 {
        self.force_fields.iter().map(|ff| ff.energy(self)).sum()
    }

    pub fn compute_energy(&self) -> f64 {
        self.compute_kinetic_energy() + self.compute_potential_energy()
    }

    /// Zeros are NOT applied here; callers own the scratch buffer and
    /// decide when to clear it. Adds every registered force field's
    /// contribution, in registration order.
    pub fn accumulate_force(&self, out: &mut [Vector3]) {
        assert_eq!(out.len(), self.particle_count(), "force buffer size mismatch");
        for ff in &self.force_fields {
            ff.accumulate_force(self, out);
        }
    }
}
