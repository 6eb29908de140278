//! Strongly-typed Gmsh entity ids.
//!
//! Gmsh numbers nodes and elements from 1. These newtypes keep the
//! 1-based ids apart from the 0-based grid indices they are derived from,
//! and keep node ids apart from element ids.

use std::fmt;

/// Macro to generate 1-based id newtypes with common functionality.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// The first id (1).
            pub const FIRST: Self = Self(1);

            /// Create an id from its 1-based value.
            ///
            /// # Panics
            /// Panics if `id` is zero.
            #[inline]
            pub const fn new(id: usize) -> Self {
                assert!(id > 0, "Gmsh ids start at 1");
                Self(id)
            }

            /// Id of the entity stored at `position` (0-based) in its list.
            #[inline]
            pub const fn from_position(position: usize) -> Self {
                Self(position + 1)
            }

            /// Raw 1-based value, as written to the mesh file.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// 0-based position of the entity in its list.
            #[inline]
            pub const fn position(self) -> usize {
                self.0 - 1
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(id: $name) -> usize {
                id.0
            }
        }
    };
}

define_id!(
    /// Node id in a Gmsh mesh.
    ///
    /// # Example
    ///
    /// ```
    /// use p3d2gmsh::types::NodeId;
    ///
    /// let node = NodeId::from_position(0);
    /// assert_eq!(node.get(), 1);
    /// assert_eq!(node.to_string(), "1");
    /// ```
    NodeId
);

define_id!(
    /// Element id in a Gmsh mesh.
    ///
    /// # Example
    ///
    /// ```
    /// use p3d2gmsh::types::ElementId;
    ///
    /// let elem = ElementId::new(3);
    /// assert_eq!(elem.position(), 2);
    /// ```
    ElementId
);
