//! Preamble Scanner
//!
//! Finds where a transmission starts inside the symbols buffered since the
//! last noise boundary. The on-air preamble is 9 to 12 bits, but its first
//! bit is regularly lost to the receiver settling, so only the reliable
//! trailing eight symbols are matched.

use crate::constants::protocol::{PREAMBLE, PREAMBLE_LEN};
use crate::pulse::Symbol;

/// Index of the first occurrence of [`PREAMBLE`] in `symbols`
///
/// Scans from the oldest symbol forward and returns the lowest matching
/// start, or `None` when fewer than eight symbols are buffered or no
/// contiguous match exists.
pub fn scan(symbols: &[Symbol]) -> Option<usize> {
    if symbols.len() < PREAMBLE_LEN {
        return None;
    }
    symbols
        .windows(PREAMBLE_LEN)
        .position(|window| window == &PREAMBLE[..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::{LongOff as L, ShortOff as S};

    #[test]
    fn match_at_start() {
        assert_eq!(scan(&PREAMBLE), Some(0));
    }

    #[test]
    fn match_at_offset() {
        let mut symbols = [L; 20];
        symbols[7..15].copy_from_slice(&PREAMBLE);
        assert_eq!(scan(&symbols), Some(7));
    }

    #[test]
    fn match_at_tail() {
        let mut symbols = [L; 12];
        symbols[4..].copy_from_slice(&PREAMBLE);
        assert_eq!(scan(&symbols), Some(4));
    }

    #[test]
    fn lowest_index_wins() {
        let mut symbols = [L; 24];
        symbols[2..10].copy_from_slice(&PREAMBLE);
        symbols[14..22].copy_from_slice(&PREAMBLE);
        assert_eq!(scan(&symbols), Some(2));
    }

    #[test]
    fn extra_leading_one_is_skipped() {
        // Five leading ones: the match starts one symbol in
        let symbols = [S, S, S, S, S, L, S, L, L, S];
        assert_eq!(scan(&symbols), Some(1));
    }

    #[test]
    fn short_buffer_has_no_match() {
        assert_eq!(scan(&[]), None);
        assert_eq!(scan(&PREAMBLE[..7]), None);
    }

    #[test]
    fn broken_run_has_no_match() {
        // One flipped symbol inside the marker
        let symbols = [S, S, S, S, L, L, L, L, S, S];
        assert_eq!(scan(&symbols), None);
    }
}
