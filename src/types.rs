//! Small strongly-typed primitives shared by the sentence model and the layout.

use std::fmt;

/// 1-based position of a token in its sentence.
///
/// Token ids double as horizontal layout positions, so they are kept apart
/// from plain counts and pixel values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct WordId(pub usize);

impl WordId {
    /// Zero-based index into the sentence's token list.
    #[inline]
    pub fn index(self) -> usize {
        self.0 - 1
    }

    #[inline]
    pub fn raw(self) -> usize {
        self.0
    }

    /// The id one position to the right (used when a pseudo root is prepended).
    #[inline]
    pub fn shifted(self) -> WordId {
        WordId(self.0 + 1)
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// RGB colour with channels in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    /// Tag rows are drawn in this light grey.
    pub const GREY: Rgb = Rgb::new(0.7, 0.7, 0.7);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// `rgb(r,g,b)` with 0-255 integer channels.
    pub fn to_rgb_string(self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgb({},{},{})",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_id_index_is_zero_based() {
        assert_eq!(WordId(1).index(), 0);
        assert_eq!(WordId(5).index(), 4);
        assert_eq!(WordId(3).shifted(), WordId(4));
    }

    #[test]
    fn rgb_string() {
        assert_eq!(Rgb::BLACK.to_rgb_string(), "rgb(0,0,0)");
        assert_eq!(Rgb::WHITE.to_rgb_string(), "rgb(255,255,255)");
    }
}
