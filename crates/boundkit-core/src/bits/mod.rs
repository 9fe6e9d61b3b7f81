//! Power-of-two predicates and bit-ceiling arithmetic.
//!
//! The ceiling (smallest power of two `>= n`) is used for sizing
//! allocations: capacity growth in hash tables and ring buffers. Three
//! interchangeable strategies compute it: the builtin round-up intrinsic,
//! a leading-zero-count path, and a portable bit-smear cascade. Which one
//! runs is decided once per process, at first use; all of them must produce
//! bit-identical results for every input, and the conformance sweep in the
//! harness crate holds them to that.
//!
//! Contract shared by every strategy:
//! - `0` maps to `1` (defined floor, not an error).
//! - Inputs above the largest representable power of two map to `0`, the
//!   overflow sentinel. `0` is never a legitimate ceiling, so it doubles
//!   as the one non-error failure signal in this module.

use std::sync::OnceLock;

/// Largest power of two representable in the native word.
pub const MAX_POWER: usize = (usize::MAX >> 1) + 1;

/// Signature shared by every bit-ceiling strategy.
pub type BitCeilFn = fn(usize) -> usize;

/// Every compiled strategy, named; drives the conformance sweep.
pub const STRATEGIES: &[(&str, BitCeilFn)] = &[
    ("intrinsic", bit_ceil_intrinsic),
    ("lzcnt", bit_ceil_lzcnt),
    ("smear", bit_ceil_smear),
];

/// True iff `n` is a power of two.
#[must_use]
pub const fn is_power_of_two(n: usize) -> bool {
    n != 0 && n & (n - 1) == 0
}

/// Rounds `n` up to the next power of two via the process-wide strategy.
///
/// See the module docs for the `0 -> 1` floor and the `0` overflow sentinel.
#[must_use]
pub fn bit_ceil(n: usize) -> usize {
    selected()(n)
}

/// Builtin round-up intrinsic path.
///
/// `checked_next_power_of_two` already defines `0 -> 1`; a `None` means the
/// ceiling would overflow the word.
#[must_use]
pub fn bit_ceil_intrinsic(n: usize) -> usize {
    n.checked_next_power_of_two().unwrap_or(0)
}

/// Leading-zero-count path: position of the highest set bit of `n - 1`
/// picks the exponent.
#[must_use]
pub fn bit_ceil_lzcnt(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    if n > MAX_POWER {
        return 0;
    }
    1usize << (usize::BITS - (n - 1).leading_zeros())
}

/// Portable bit-smear path: propagate the top set bit of `n - 1` into every
/// lower position, then add one.
#[must_use]
pub fn bit_ceil_smear(mut n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    if n > MAX_POWER {
        return 0;
    }
    n -= 1;
    n |= n >> 1;
    n |= n >> 2;
    n |= n >> 4;
    n |= n >> 8;
    n |= n >> 16;
    #[cfg(target_pointer_width = "64")]
    {
        n |= n >> 32;
    }
    n + 1
}

/// Returns the process-wide strategy, selected on first use and fixed for
/// the process lifetime.
///
/// Build features pin the choice: `force-smear` wins over `force-lzcnt`,
/// which wins over the default intrinsic path.
pub fn selected() -> BitCeilFn {
    static SELECTED: OnceLock<BitCeilFn> = OnceLock::new();
    *SELECTED.get_or_init(select)
}

/// Name of the strategy [`bit_ceil`] dispatches to, for reports.
#[must_use]
pub fn selected_name() -> &'static str {
    if cfg!(feature = "force-smear") {
        "smear"
    } else if cfg!(feature = "force-lzcnt") {
        "lzcnt"
    } else {
        "intrinsic"
    }
}

fn select() -> BitCeilFn {
    if cfg!(feature = "force-smear") {
        bit_ceil_smear
    } else if cfg!(feature = "force-lzcnt") {
        bit_ceil_lzcnt
    } else {
        bit_ceil_intrinsic
    }
}
