//! Paper sizes, in portrait orientation (width ≤ height). Use
//! [`PageOrientation`](crate::pagesize::PageOrientation) to flip them.
//!
//! ```
//! use letterpress::pagesize::{A4, PageOrientation};
//!
//! let (width, height) = A4.landscape();
//! assert!(width > height);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn a4_is_about_595_by_842() {
        assert!((A4.0 .0 - 595.276).abs() < 0.01);
        assert!((A4.1 .0 - 841.89).abs() < 0.01);
        assert_eq!(A4.landscape().portrait(), A4);
    }
}
