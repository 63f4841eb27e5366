use crate::components::{Component, ComponentIndex, Tag, TagIndex};
use crate::data_structures::BitSet;
use std::fmt::{Debug, Formatter};

/// The set of [component](Component) types an archetype carries.
///
/// Two sets with the same members are identical regardless of the order the members were added in.
#[derive(Default, Copy, Clone, Hash, Eq, PartialEq)]
pub struct ComponentTypes {
	bits: BitSet,
}

/// The set of [tags](Tag) an archetype carries.
#[derive(Default, Copy, Clone, Hash, Eq, PartialEq)]
pub struct Tags {
	bits: BitSet,
}

macro_rules! impl_index_set {
    ($set: ident, $index: ident, $member: ident, $member_index: ident, $trait: ident, $get_index: ident) => {
        impl $set {
            pub const fn new() -> Self {
                Self { bits: BitSet::new() }
            }

            /// Returns the set containing every member of the tuple `S`.
            pub fn of<S: $trait>() -> Self {
                S::$get_index()
            }

            #[inline(always)]
            pub fn with<T: $member>(self) -> Self {
                self.with_index(T::$member_index())
            }

            #[inline(always)]
            pub fn without<T: $member>(self) -> Self {
                self.without_index(T::$member_index())
            }

            #[inline(always)]
            pub fn contains<T: $member>(&self) -> bool {
                self.contains_index(T::$member_index())
            }

            #[inline(always)]
            pub fn with_index(mut self, index: $index) -> Self {
                self.bits.set(index.value(), true);
                self
            }

            #[inline(always)]
            pub fn without_index(mut self, index: $index) -> Self {
                self.bits.set(index.value(), false);
                self
            }

            #[inline(always)]
            pub fn set_index(&mut self, index: $index, value: bool) {
                self.bits.set(index.value(), value);
            }

            #[inline(always)]
            pub fn contains_index(&self, index: $index) -> bool {
                self.bits.get(index.value())
            }

            /// Iterate the members in ascending index order.
            pub fn iter(&self) -> impl Iterator<Item = $index> {
                self.bits.iter().map($index::from_value)
            }

            pub fn len(&self) -> usize {
                self.bits.count()
            }

            pub fn is_empty(&self) -> bool {
                self.bits.is_empty()
            }

            pub fn clear(&mut self) {
                self.bits.clear();
            }

            pub fn is_subset_of(&self, other: &Self) -> bool {
                self.bits.is_subset_of(&other.bits)
            }

            pub fn union(&self, other: &Self) -> Self {
                Self { bits: self.bits.union(&other.bits) }
            }

            pub fn intersection(&self, other: &Self) -> Self {
                Self { bits: self.bits.intersection(&other.bits) }
            }

            pub const fn bits(&self) -> &BitSet {
                &self.bits
            }
        }

        impl FromIterator<$index> for $set {
            fn from_iter<I: IntoIterator<Item = $index>>(iter: I) -> Self {
                Self { bits: iter.into_iter().map(|i| i.value()).collect() }
            }
        }

        impl Debug for $set {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.debug_set().entries(self.iter().map(|i| i.name())).finish()
            }
        }
    };
}

impl_index_set!(ComponentTypes, ComponentIndex, Component, component_index, ComponentSet, component_types);
impl_index_set!(Tags, TagIndex, Tag, tag_index, TagSet, tags);

impl ComponentTypes {
	/// The position of the column for `index` in an archetype with these types.
	#[inline(always)]
	pub(crate) fn rank(&self, index: ComponentIndex) -> usize {
		self.bits.rank(index.value())
	}
}

/// A tuple of [Component] types, e.g. `(Position, Rotation)`.
pub trait ComponentSet {
	fn component_types() -> ComponentTypes;
}

/// A tuple of [Tag] types, e.g. `(Enemy, Frozen)`.
pub trait TagSet {
	fn tags() -> Tags;
}

impl ComponentSet for () {
	fn component_types() -> ComponentTypes {
		ComponentTypes::new()
	}
}

impl TagSet for () {
	fn tags() -> Tags {
		Tags::new()
	}
}

macro_rules! impl_sets {
    ($($t: ident),*) => {
        impl<$($t: Component),*> ComponentSet for ($($t,)*) {
            fn component_types() -> ComponentTypes {
                ComponentTypes::new()$(.with_index($t::component_index()))*
            }
        }

        impl<$($t: Tag),*> TagSet for ($($t,)*) {
            fn tags() -> Tags {
                Tags::new()$(.with_index($t::tag_index()))*
            }
        }
    };
}

impl_sets!(T0);
impl_sets!(T0, T1);
impl_sets!(T0, T1, T2);
impl_sets!(T0, T1, T2, T3);
impl_sets!(T0, T1, T2, T3, T4);
impl_sets!(T0, T1, T2, T3, T4, T5);
impl_sets!(T0, T1, T2, T3, T4, T5, T6);
impl_sets!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_sets!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_sets!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_sets!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_sets!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
