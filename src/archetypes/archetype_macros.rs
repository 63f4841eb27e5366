/// Get or create the [Archetype](crate::archetypes::Archetype) holding the listed
/// [components](crate::components::Component) and, optionally, [tags](crate::components::Tag).
///
/// ```ignore
/// let moving = archetype!(store, [Position, Velocity]);
/// let frozen = archetype!(store, [Position], [Frozen]);
/// ```
#[macro_export]
macro_rules! archetype {
    ($store: expr, [$($t: ty),*]) => {
		$crate::archetype!($store, [$($t),*], [])
	};
    ($store: expr, [$($t: ty),*], [$($g: ty),*]) => {
		$store.get_archetype(
			$crate::components::ComponentTypes::new()$(.with::<$t>())*,
			$crate::components::Tags::new()$(.with::<$g>())*,
		)
	};
}
