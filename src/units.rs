//! Length units used throughout layout. Everything is converted to [Pt] (1/72 inch)
//! before it reaches the PDF writer.

use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

/// A length in PDF points (1/72 of an inch)
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Sum,
    Deref,
    DerefMut,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, From, Into)]
pub struct Mm(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, From, Into)]
pub struct In(pub f32);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Self {
        Pt(mm.0 * 72.0 / 25.4)
    }
}

impl From<In> for Pt {
    fn from(inches: In) -> Self {
        Pt(inches.0 * 72.0)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Self {
        Mm(pt.0 * 25.4 / 72.0)
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// Ratio of two lengths, kept as a [Pt] so scale factors chain with `*`
impl Div<Pt> for Pt {
    type Output = Pt;

    fn div(self, rhs: Pt) -> Pt {
        Pt(self.0 / rhs.0)
    }
}

impl Mul<Pt> for Pt {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self.0 * rhs.0)
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

impl Pt {
    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

/// Shorthand for `Pt::from(Mm(value))`, which the style tables use a lot
pub fn mm(value: f32) -> Pt {
    Mm(value).into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn millimetres_convert_to_points() {
        let a4_width: Pt = Mm(210.0).into();
        assert!((a4_width.0 - 595.2756).abs() < 0.01);
        assert_eq!(mm(25.4), Pt(72.0));
    }

    #[test]
    fn inches_convert_to_points() {
        let half: Pt = In(0.5).into();
        assert_eq!(half, Pt(36.0));
    }

    #[test]
    fn arithmetic_stays_in_points() {
        let mut x = Pt(10.0);
        x += Pt(5.0);
        x -= Pt(1.0);
        assert_eq!(x * 2.0, Pt(28.0));
        assert_eq!(x / 2.0, Pt(7.0));
        assert_eq!(-x, Pt(-14.0));
        let total: Pt = vec![Pt(1.0), Pt(2.0), Pt(3.0)].into_iter().sum();
        assert_eq!(total, Pt(6.0));
    }
}
