use crate::entity::EntityId;
use crate::storage::Storage;
use std::fmt::Debug;

/// The closed set of component tables a game declares.
///
/// A game owns one struct with a [`Storage`] field per component type and
/// implements this trait for it; [`Component`] ties each type to its field.
pub trait ComponentSet: Default {
    /// Runtime tag naming one component type, for dynamic per-kind queries.
    type Kind: Copy + Eq + Debug;

    /// Drop every component attached to `id`.
    fn remove_entity(&mut self, id: EntityId);

    fn contains_kind(&self, id: EntityId, kind: Self::Kind) -> bool;

    fn clear(&mut self);
}

/// A value type stored in one table of the component set `S`.
pub trait Component<S: ComponentSet>: Sized + 'static {
    const KIND: S::Kind;

    fn storage(set: &S) -> &Storage<Self>;

    fn storage_mut(set: &mut S) -> &mut Storage<Self>;
}

/// A required set of component types, written as a tuple.
pub trait Query<S: ComponentSet> {
    fn matches(set: &S, id: EntityId) -> bool;
}

macro_rules! impl_query {
    ($($name:ident),+) => {
        impl<S: ComponentSet, $($name: Component<S>),+> Query<S> for ($($name,)+) {
            fn matches(set: &S, id: EntityId) -> bool {
                $($name::storage(set).contains(id))&&+
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);

/// Implements [`Component`] for a type stored in a named field of a set.
///
/// ```ignore
/// component!(GameComponents, Transform, transform, Kind::Transform);
/// ```
#[macro_export]
macro_rules! component {
    ($set:ty, $ty:ty, $field:ident, $kind:expr) => {
        impl $crate::Component<$set> for $ty {
            const KIND: <$set as $crate::ComponentSet>::Kind = $kind;

            fn storage(set: &$set) -> &$crate::Storage<Self> {
                &set.$field
            }

            fn storage_mut(set: &mut $set) -> &mut $crate::Storage<Self> {
                &mut set.$field
            }
        }
    };
}
