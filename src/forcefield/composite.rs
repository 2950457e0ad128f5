use super::ForceField;
use crate::system::System;
use crate::vector::Vector3;

/// Dynamic collection of force fields evaluated as one. Prefer the tuple
/// `impl ForceField` below when the set of component fields is known at
/// compile time and static dispatch is worth the monomorphization; reach
/// for `Composite` when fields are assembled at runtime (e.g. a variable
/// number of bonded segments).
pub struct Composite {
    components: Vec<Box<dyn ForceField>>,
}

impl Composite {
    pub fn new() -> Self {
        Composite { components: Vec::new() }
    }

    pub fn push(&mut self, ff: impl ForceField + 'static) {
        self.components.push(Box::new(ff));
    }
}

impl Default for Composite {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceField for Composite {
    fn energy(&self, system: &System) -> f64 {
        self.components.iter().map(|ff| ff.energy(system)).sum()
    }

    fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
        for ff in &self.components {
            ff.accumulate_force(system, out);
        }
    }
}

macro_rules! impl_composite_tuple {
    ($($name:ident),+) => {
        impl<$($name: ForceField),+> ForceField for ($($name,)+) {
            fn energy(&self, system: &System) -> f64 {
                #[allow(non_snake_case)]
                let ($($name,)+) = self;
                let mut total = 0.0;
                $(total += $name.energy(system);)+
                total
            }

            fn accumulate_force(&self, system: &System, out: &mut [Vector3]) {
                #[allow(non_snake_case)]
                let ($($name,)+) = self;
                $($name.accumulate_force(system, out);)+
            }
        }
    };
}

impl_composite_tuple!(A, B);
impl_composite_tuple!(A, B, C);
impl_composite_tuple!(A, B, C, D);
impl_composite_tuple!(A, B, C, D, E);
