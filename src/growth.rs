/// Computes the capacity of the next heap buffer.
///
/// The decision is driven by the length the vector will have once the
/// pending operation completes, never by the current capacity. Below the
/// inline capacity no heap room is needed and `inline_cap` itself is
/// returned; past it the result is one and a half times the new length,
/// rounded down.
#[inline]
pub(crate) const fn next_capacity(inline_cap: usize, len: usize, additional: usize) -> usize {
    let Some(new_len) = len.checked_add(additional) else {
        panic!("length overflow when computing the next capacity");
    };
    if new_len <= inline_cap {
        inline_cap
    } else {
        new_len + (new_len >> 1)
    }
}

#[cfg(test)]
mod tests {
    use super::next_capacity;

    #[test]
    fn stays_at_the_inline_capacity_while_it_fits() {
        assert_eq!(next_capacity(16, 0, 0), 16);
        assert_eq!(next_capacity(16, 10, 6), 16);
        assert_eq!(next_capacity(4, 3, 1), 4);
        assert_eq!(next_capacity(4, 0, 4), 4);
    }

    #[test]
    fn grows_by_half_of_the_new_length_past_it() {
        assert_eq!(next_capacity(4, 4, 1), 7);
        assert_eq!(next_capacity(4, 6, 0), 9);
        assert_eq!(next_capacity(4, 4, 4), 12);
        assert_eq!(next_capacity(16, 16, 1), 25);
        assert_eq!(next_capacity(0, 0, 1), 1);
    }

    #[test]
    fn odd_new_lengths_round_down() {
        // floor(3 * 5 / 2) == 7, floor(3 * 7 / 2) == 10
        assert_eq!(next_capacity(4, 5, 0), 7);
        assert_eq!(next_capacity(4, 7, 0), 10);
    }
}
