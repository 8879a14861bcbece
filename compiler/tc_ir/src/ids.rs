//! Arena indices and list ranges for the flat syntax tree.

use std::fmt;

macro_rules! define_id {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => { $(
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for "no node".
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}::INVALID", stringify!($name))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }
    )* };
}

define_id!(
    /// Index into the expression arena.
    ExprId,
    /// Index into the statement arena.
    StmtId,
);

/// Defines compact `start..start+len` ranges into one of the arena's flat
/// side tables.
macro_rules! define_range {
    ($($name:ident),* $(,)?) => { $(
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        #[repr(C)]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            pub const EMPTY: Self = Self { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                Self { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }

            /// Exclusive end offset.
            #[inline]
            pub const fn end(&self) -> u32 {
                self.start + self.len
            }

            #[inline]
            pub fn to_range(&self) -> ::std::ops::Range<usize> {
                self.start as usize..self.end() as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}..{})", stringify!($name), self.start, self.end())
            }
        }
    )* };
}

define_range!(
    ExprRange,
    StmtRange,
    PropRange,
    DeclRange,
    ParamRange,
    CatchRange,
);

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{CatchRange, ExprId, StmtRange};
    crate::static_assert_size!(ExprId, 4);
    crate::static_assert_size!(StmtRange, 8);
    crate::static_assert_size!(CatchRange, 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_ids_debug() {
        assert!(!ExprId::INVALID.is_valid());
        assert_eq!(format!("{:?}", ExprId::INVALID), "ExprId::INVALID");
        assert_eq!(format!("{:?}", StmtId::new(7)), "StmtId(7)");
        assert_eq!(ExprId::default(), ExprId::INVALID);
    }

    #[test]
    fn range_bounds() {
        let r = CatchRange::new(3, 2);
        assert_eq!(r.end(), 5);
        assert_eq!(r.to_range(), 3..5);
        assert!(!r.is_empty());
        assert!(StmtRange::EMPTY.is_empty());
        assert_eq!(format!("{r:?}"), "CatchRange(3..5)");
    }
}
