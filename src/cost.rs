//! Symbol classification and the substitution cost that drives the recurrence.
//!
//! Recognized bases are `A`, `C`, `G`, `T`, `U` and `N` in either case.
//! Anything else (gap markers, newlines, IUPAC ambiguity codes) is
//! *unrecognized* and aligns for free against any symbol.

/// Cost of inserting or deleting a single symbol.
pub const INDEL_COST: u32 = 2;

/// Classification of a single input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// A recognized base, stored in canonical (uppercase) form.
    Base(u8),
    /// Any byte outside the recognized alphabet.
    Unrecognized,
}

impl Symbol {
    #[inline]
    pub fn classify(byte: u8) -> Self {
        match byte.to_ascii_uppercase() {
            b @ (b'A' | b'C' | b'G' | b'T' | b'U' | b'N') => Symbol::Base(b),
            _ => Symbol::Unrecognized,
        }
    }

    /// True for `N`/`n`, the indeterminate nucleotide.
    #[inline]
    pub fn is_unknown(self) -> bool {
        matches!(self, Symbol::Base(b'N'))
    }
}

/// Substitution cost of aligning `x` against `y`, always 0 or 1.
///
/// An unknown base mismatching a known one costs the same as any other
/// mismatch.
#[inline]
pub fn substitution_cost(x: u8, y: u8) -> u32 {
    match (Symbol::classify(x), Symbol::classify(y)) {
        (Symbol::Base(a), Symbol::Base(b)) if a == b => 0,
        // N against anything else lands here too; it carries no extra penalty.
        (Symbol::Base(_), Symbol::Base(_)) => 1,
        _ => 0,
    }
}

/// One evaluation of the recurrence:
/// `min(diag + cost(x, y), up + 2, left + 2)`.
#[inline]
pub(crate) fn relax(diag: u32, up: u32, left: u32, x: u8, y: u8) -> u32 {
    let substitute = diag + substitution_cost(x, y);
    let delete = up + INDEL_COST;
    let insert = left + INDEL_COST;
    substitute.min(delete).min(insert)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_case_insensitive() {
        for (lower, upper) in [(b'a', b'A'), (b'c', b'C'), (b'g', b'G'), (b't', b'T'), (b'u', b'U')] {
            assert_eq!(Symbol::classify(lower), Symbol::Base(upper));
            assert_eq!(Symbol::classify(upper), Symbol::Base(upper));
        }
        assert!(Symbol::classify(b'n').is_unknown());
        assert!(Symbol::classify(b'N').is_unknown());
        assert!(!Symbol::classify(b'A').is_unknown());
    }

    #[test]
    fn unrecognized_symbols() {
        for b in [b'-', b'.', b'\n', b'R', b'x', 0u8, 0xFF] {
            assert_eq!(Symbol::classify(b), Symbol::Unrecognized);
        }
    }

    #[test]
    fn cost_table() {
        assert_eq!(substitution_cost(b'A', b'A'), 0);
        assert_eq!(substitution_cost(b'a', b'A'), 0);
        assert_eq!(substitution_cost(b'A', b'C'), 1);
        assert_eq!(substitution_cost(b'N', b'A'), 1);
        assert_eq!(substitution_cost(b'n', b'N'), 0);
        assert_eq!(substitution_cost(b'T', b'U'), 1);
        assert_eq!(substitution_cost(b'-', b'G'), 0);
        assert_eq!(substitution_cost(b'G', b'-'), 0);
        assert_eq!(substitution_cost(b'-', b'-'), 0);
    }

    #[test]
    fn cost_is_symmetric() {
        let alphabet = b"ACGTUNacgtun-X.";
        for &x in alphabet {
            for &y in alphabet {
                assert_eq!(substitution_cost(x, y), substitution_cost(y, x));
            }
        }
    }

    #[test]
    fn relax_picks_minimum() {
        assert_eq!(relax(0, 0, 0, b'A', b'A'), 0);
        assert_eq!(relax(5, 0, 9, b'A', b'C'), 2);
        assert_eq!(relax(3, 9, 9, b'A', b'C'), 4);
        assert_eq!(relax(9, 9, 1, b'A', b'C'), 3);
    }
}
