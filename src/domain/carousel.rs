//! Index arithmetic for rotating banners.

/// Current slide of a rotating list.
///
/// The length is supplied on every step because the slide list lives in the
/// store and may change between ticks. With an empty list the index stays 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
}

impl Carousel {
    /// Starts at the first slide.
    #[must_use]
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// Current index, clamped into `0..len`.
    #[must_use]
    pub const fn current(&self, len: usize) -> usize {
        if len == 0 { 0 } else { self.index % len }
    }

    /// Moves forward one slide, wrapping to 0 after the last.
    pub const fn advance(&mut self, len: usize) {
        if len == 0 {
            self.index = 0;
        } else {
            self.index = (self.current(len) + 1) % len;
        }
    }

    /// Moves back one slide, wrapping to `len - 1` before the first.
    pub const fn retreat(&mut self, len: usize) {
        if len == 0 {
            self.index = 0;
        } else {
            self.index = (self.current(len) + len - 1) % len;
        }
    }

    /// Returns to the first slide.
    pub const fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(3, 0, 0 ; "no_steps")]
    #[test_case(3, 2, 2 ; "before_wrap")]
    #[test_case(3, 3, 0 ; "exact_wrap")]
    #[test_case(3, 7, 1 ; "several_laps")]
    #[test_case(1, 5, 0 ; "single_slide")]
    fn test_advance_k_times_is_k_mod_n(len: usize, steps: usize, expected: usize) {
        let mut carousel = Carousel::new();
        for _ in 0..steps {
            carousel.advance(len);
        }
        assert_eq!(carousel.current(len), expected);
        assert_eq!(expected, steps % len);
    }

    #[test]
    fn test_retreat_from_start_wraps_to_last() {
        let mut carousel = Carousel::new();
        carousel.retreat(4);
        assert_eq!(carousel.current(4), 3);
        carousel.retreat(4);
        assert_eq!(carousel.current(4), 2);
    }

    #[test]
    fn test_empty_list_stays_at_zero() {
        let mut carousel = Carousel::new();
        carousel.advance(0);
        carousel.retreat(0);
        assert_eq!(carousel.current(0), 0);
    }

    #[test]
    fn test_shrinking_list_clamps() {
        let mut carousel = Carousel::new();
        for _ in 0..4 {
            carousel.advance(5);
        }
        assert_eq!(carousel.current(2), 0);
        carousel.advance(2);
        assert_eq!(carousel.current(2), 1);
    }
}
