use serde::Serialize;
use std::fmt;
use std::ops::Add;

/// Clockwise rotation in quarter turns.
///
/// Both operations on this type are defined by lookup tables over the four
/// values, never by arithmetic on the degree count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "i32")]
pub enum RotationAngle {
    #[default]
    Rotation0,
    Rotation90,
    Rotation180,
    Rotation270,
}

/// `COMPOSE[a][b]` is `a` followed by `b`, indexed by quarter turns.
#[rustfmt::skip]
const COMPOSE: [[RotationAngle; 4]; 4] = {
    use RotationAngle::*;
    [
        [Rotation0,   Rotation90,  Rotation180, Rotation270],
        [Rotation90,  Rotation180, Rotation270, Rotation0  ],
        [Rotation180, Rotation270, Rotation0,   Rotation90 ],
        [Rotation270, Rotation0,   Rotation90,  Rotation180],
    ]
};

/// Display space and image space disagree on which way is up, so an angle
/// measured from the top maps to `180 - θ` on the other side.
const INVERT: [RotationAngle; 4] = [
    RotationAngle::Rotation180,
    RotationAngle::Rotation90,
    RotationAngle::Rotation0,
    RotationAngle::Rotation270,
];

impl RotationAngle {
    /// All four values in quarter-turn order.
    pub const ALL: [Self; 4] = [
        Self::Rotation0,
        Self::Rotation90,
        Self::Rotation180,
        Self::Rotation270,
    ];

    fn index(self) -> usize {
        match self {
            Self::Rotation0 => 0,
            Self::Rotation90 => 1,
            Self::Rotation180 => 2,
            Self::Rotation270 => 3,
        }
    }

    /// Clockwise degrees (0, 90, 180 or 270).
    pub fn degrees(self) -> i32 {
        match self {
            Self::Rotation0 => 0,
            Self::Rotation90 => 90,
            Self::Rotation180 => 180,
            Self::Rotation270 => 270,
        }
    }

    /// Parse a multiple of 90 degrees, normalising into `[0, 360)`.
    ///
    /// Returns `None` for angles that are not quarter turns.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Self::Rotation0),
            90 => Some(Self::Rotation90),
            180 => Some(Self::Rotation180),
            270 => Some(Self::Rotation270),
            _ => None,
        }
    }

    /// Apply `self`, then `other`. Wraps at 360°.
    pub fn compose(self, other: Self) -> Self {
        COMPOSE[self.index()][other.index()]
    }

    /// Convert between display space and image space.
    ///
    /// The conversion is its own inverse, so the same call maps in both
    /// directions.
    pub fn invert(self) -> Self {
        INVERT[self.index()]
    }

    /// Whether the display's vertical axis runs opposite to the image's at
    /// this rotation. True for the two sideways values.
    pub fn is_inverted(self) -> bool {
        matches!(self, Self::Rotation90 | Self::Rotation270)
    }
}

impl Add for RotationAngle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.compose(rhs)
    }
}

impl From<RotationAngle> for i32 {
    fn from(rotation: RotationAngle) -> Self {
        rotation.degrees()
    }
}

impl fmt::Display for RotationAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_with_half_turn_twice_is_identity() {
        for r in RotationAngle::ALL {
            let half = RotationAngle::Rotation180;
            assert_eq!(r.compose(half).compose(half), r, "{r}");
        }
    }

    #[test]
    fn invert_is_an_involution() {
        for r in RotationAngle::ALL {
            assert_eq!(r.invert().invert(), r, "{r}");
        }
    }

    #[test]
    fn invert_swaps_upright_and_upside_down() {
        assert_eq!(RotationAngle::Rotation0.invert(), RotationAngle::Rotation180);
        assert_eq!(RotationAngle::Rotation180.invert(), RotationAngle::Rotation0);
        assert_eq!(RotationAngle::Rotation90.invert(), RotationAngle::Rotation90);
        assert_eq!(RotationAngle::Rotation270.invert(), RotationAngle::Rotation270);
    }

    #[test]
    fn compose_matches_degree_sum() {
        for a in RotationAngle::ALL {
            for b in RotationAngle::ALL {
                let expected = RotationAngle::from_degrees(a.degrees() + b.degrees()).unwrap();
                assert_eq!(a.compose(b), expected, "{a} + {b}");
                assert_eq!(a + b, expected);
            }
        }
    }

    #[test]
    fn rotation0_is_neutral() {
        for r in RotationAngle::ALL {
            assert_eq!(r.compose(RotationAngle::Rotation0), r);
            assert_eq!(RotationAngle::Rotation0.compose(r), r);
        }
    }

    #[test]
    fn only_sideways_rotations_are_inverted() {
        assert!(!RotationAngle::Rotation0.is_inverted());
        assert!(RotationAngle::Rotation90.is_inverted());
        assert!(!RotationAngle::Rotation180.is_inverted());
        assert!(RotationAngle::Rotation270.is_inverted());
    }

    #[test]
    fn from_degrees_normalises_and_rejects_partial_turns() {
        assert_eq!(RotationAngle::from_degrees(0), Some(RotationAngle::Rotation0));
        assert_eq!(RotationAngle::from_degrees(450), Some(RotationAngle::Rotation90));
        assert_eq!(RotationAngle::from_degrees(-90), Some(RotationAngle::Rotation270));
        assert_eq!(RotationAngle::from_degrees(360), Some(RotationAngle::Rotation0));
        assert_eq!(RotationAngle::from_degrees(45), None);
    }

    #[test]
    fn serialises_as_degrees() {
        let json = serde_json::to_value(RotationAngle::Rotation270).unwrap();
        assert_eq!(json, 270);
    }
}
