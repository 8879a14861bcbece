//! Stack growth for recursive tree passes.
//!
//! The parser, validator, desugarer and printer all recurse once per level
//! of nesting. Sources with thousands of nested blocks or parenthesized
//! expressions would overflow a thread's default stack, so each recursive
//! entry point runs inside [`ensure_sufficient_stack`].
//!
//! On native targets the stack is extended with `stacker`; on wasm the
//! closure runs directly.

/// Grow when less than this much stack is left.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const GROW_BY: usize = 1024 * 1024;

/// Run `f`, first moving to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::ensure_sufficient_stack;

    /// Depth of a nested `[[[...]]]` string, computed recursively.
    fn nesting_depth(s: &[u8]) -> usize {
        ensure_sufficient_stack(|| match s {
            [b'[', inner @ .., b']'] => 1 + nesting_depth(inner),
            _ => 0,
        })
    }

    #[test]
    fn test_value_passes_through() {
        assert_eq!(ensure_sufficient_stack(|| "caught"), "caught");
    }

    #[test]
    fn test_shallow_nesting() {
        assert_eq!(nesting_depth(b"[[[]]]"), 3);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let depth = 50_000;
        let mut text = "[".repeat(depth);
        text.push_str(&"]".repeat(depth));
        assert_eq!(nesting_depth(text.as_bytes()), depth);
    }
}
