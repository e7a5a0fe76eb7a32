//! Odd-forced kernel sizes for the smoothing and thresholding stages.
//!
//! Every windowed operator in this crate (Gaussian blur, median blur,
//! adaptive mean thresholding) requires an odd window size so that the
//! window has a well-defined center pixel. [`Kernel`] encodes that
//! invariant in the type: both constructors produce an odd size, so the
//! raw operators never have to validate their input.

use serde::{Deserialize, Serialize};

/// An odd kernel (window) size, always ≥ 1.
///
/// Serialized as its raw size; an even size read back from
/// serialized form is rounded up to the next odd value on
/// deserialization, matching [`Kernel::force_odd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Kernel(u32);

impl Kernel {
    /// The 1×1 kernel. Every windowed operator treats it as identity.
    pub const IDENTITY: Self = Self(1);

    /// Largest radius whose size `2 * radius + 1` fits in a `u32`.
    pub const MAX_RADIUS: u32 = (u32::MAX - 1) / 2;

    /// Kernel of size `2 * radius + 1` — odd by construction.
    ///
    /// Radii above [`Self::MAX_RADIUS`] are capped there, keeping the
    /// size arithmetic in range (the capped size is `u32::MAX`, which
    /// is odd).
    #[must_use]
    pub const fn from_radius(radius: u32) -> Self {
        let radius = if radius > Self::MAX_RADIUS {
            Self::MAX_RADIUS
        } else {
            radius
        };
        Self(2 * radius + 1)
    }

    /// Round an arbitrary size up to the nearest odd value.
    ///
    /// Even sizes become `size + 1`; zero becomes 1. Supplying `2k`
    /// therefore behaves identically to supplying `2k + 1`.
    #[must_use]
    pub const fn force_odd(size: u32) -> Self {
        match size {
            0 => Self(1),
            n if n % 2 == 0 => Self(n + 1),
            n => Self(n),
        }
    }

    /// The window size (odd, ≥ 1).
    #[must_use]
    pub const fn size(self) -> u32 {
        self.0
    }

    /// The window radius: `(size - 1) / 2`.
    #[must_use]
    pub const fn radius(self) -> u32 {
        (self.0 - 1) / 2
    }

    /// Whether this is the 1×1 identity kernel.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        self.0 == 1
    }
}

impl From<u32> for Kernel {
    fn from(size: u32) -> Self {
        Self::force_odd(size)
    }
}

impl From<Kernel> for u32 {
    fn from(kernel: Kernel) -> Self {
        kernel.size()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_radius_is_always_odd() {
        for radius in 0..20 {
            let kernel = Kernel::from_radius(radius);
            assert_eq!(kernel.size() % 2, 1, "radius {radius} gave even size");
            assert_eq!(kernel.radius(), radius);
        }
    }

    #[test]
    fn from_radius_caps_instead_of_overflowing() {
        let huge = Kernel::from_radius(u32::MAX);
        assert_eq!(huge.size(), u32::MAX);
        assert_eq!(huge.size() % 2, 1);
        assert_eq!(huge.radius(), Kernel::MAX_RADIUS);

        // The largest in-range radius is exact, not capped.
        assert_eq!(Kernel::from_radius(Kernel::MAX_RADIUS).size(), u32::MAX);
        assert_eq!(
            Kernel::from_radius(Kernel::MAX_RADIUS),
            Kernel::from_radius(Kernel::MAX_RADIUS + 1),
        );
    }

    #[test]
    fn force_odd_rounds_even_up() {
        assert_eq!(Kernel::force_odd(6), Kernel::force_odd(7));
        assert_eq!(Kernel::force_odd(6).size(), 7);
        assert_eq!(Kernel::force_odd(9).size(), 9);
    }

    #[test]
    fn force_odd_zero_is_identity() {
        assert_eq!(Kernel::force_odd(0), Kernel::IDENTITY);
        assert!(Kernel::force_odd(0).is_identity());
    }

    #[test]
    fn radius_zero_is_identity() {
        assert!(Kernel::from_radius(0).is_identity());
        assert!(!Kernel::from_radius(1).is_identity());
    }

    #[test]
    fn serde_round_trip_preserves_size() {
        let kernel = Kernel::force_odd(9);
        let json = serde_json::to_string(&kernel).unwrap();
        assert_eq!(json, "9");
        let back: Kernel = serde_json::from_str(&json).unwrap();
        assert_eq!(kernel, back);
    }

    #[test]
    fn serde_forces_even_sizes_odd() {
        let kernel: Kernel = serde_json::from_str("8").unwrap();
        assert_eq!(kernel.size(), 9);
    }
}
