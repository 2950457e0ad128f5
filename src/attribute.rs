//! Columnar store of per-particle attributes, keyed by a compile-time tag
//! type rather than the C++ sources' static type-hash counter.
//!
//! Replaces that counter with an explicit registry keyed by
//! [`std::any::TypeId`] of the tag type. The four intrinsic attributes
//! (mass, mobility, position, velocity) live as first-class fields on
//! [`crate::system::System`] for inner-loop efficiency — this table backs
//! only user-defined attributes.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// A marker type identifying one attribute column and its value type.
pub trait AttributeTag: 'static {
    type Value: Clone + 'static;

    fn default_value() -> Self::Value;
}

trait ColumnOps {
    fn resize(&mut self, new_len: usize);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Column<T> {
    data: Vec<T>,
    default: T,
}

impl<T: Clone + 'static> ColumnOps for Column<T> {
    fn resize(&mut self, new_len: usize) {
        self.data.resize(new_len, self.default.clone());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Columnar store. All columns are kept the same length as
/// [`AttributeTable::size`]; a lookup with an unregistered key is a
/// programming error and panics.
#[derive(Default)]
pub struct AttributeTable {
    len: usize,
    columns: HashMap<TypeId, Box<dyn ColumnOps>>,
}

impl AttributeTable {
    pub fn new() -> Self {
        AttributeTable {
            len: 0,
            columns: HashMap::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.len
    }

    /// Resizes every column to `n`, filling new slots with each column's
    /// default value. Any previously returned `view`/`view_mut` slice is
    /// invalidated by this call.
    pub fn resize(&mut self, n: usize) {
        self.len = n;
        for column in self.columns.values_mut() {
            column.resize(n);
        }
    }

    /// Creates the column for `Tag` if absent, pre-filled to the current
    /// size with `Tag::default_value()`. Idempotent.
    pub fn require<Tag: AttributeTag>(&mut self) {
        let len = self.len;
        self.columns.entry(TypeId::of::<Tag>()).or_insert_with(|| {
            Box::new(Column {
                data: vec![Tag::default_value(); len],
                default: Tag::default_value(),
            })
        });
    }

    /// Read-only view of `Tag`'s column. Panics if `Tag` was never
    /// `require`d — an unregistered key is a programming error.
    pub fn view<Tag: AttributeTag>(&self) -> &[Tag::Value] {
        let column = self
            .columns
            .get(&TypeId::of::<Tag>())
            .expect("unregistered attribute key");
        &column
            .as_any()
            .downcast_ref::<Column<Tag::Value>>()
            .expect("attribute tag/value type mismatch")
            .data
    }

    /// Mutable view of `Tag`'s column. Panics if `Tag` was never
    /// `require`d.
    pub fn view_mut<Tag: AttributeTag>(&mut self) -> &mut [Tag::Value] {
        let column = self
            .columns
            .get_mut(&TypeId::of::<Tag>())
            .expect("unregistered attribute key");
        &mut column
            .as_any_mut()
            .downcast_mut::<Column<Tag::Value>>()
            .expect("attribute tag/value type mismatch")
            .data
    }

    pub fn is_registered<Tag: AttributeTag>(&self) -> bool {
        self.columns.contains_key(&TypeId::of::<Tag>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ChargeTag;
    impl AttributeTag for ChargeTag {
        type Value = f64;
        fn default_value() -> f64 {
            0.0
        }
    }

    #[test]
    fn new_attribute_backfills_default_for_existing_particles() {
        let mut table = AttributeTable::new();
        table.resize(3);
        table.require::<ChargeTag>();
        assert_eq!(table.view::<ChargeTag>(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn resize_appends_default_to_existing_column() {
        let mut table = AttributeTable::new();
        table.require::<ChargeTag>();
        table.resize(2);
        table.view_mut::<ChargeTag>()[0] = 5.0;
        table.resize(3);
        assert_eq!(table.view::<ChargeTag>(), &[5.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "unregistered attribute key")]
    fn unregistered_lookup_panics() {
        let table = AttributeTable::new();
        table.view::<ChargeTag>();
    }
}
