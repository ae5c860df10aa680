use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::{mm, Pt};

/// Space left blank around the edges of a page. Pages use the margins for their
/// `ContentBox`, stories and canvases keep their content inside them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::symmetric(value, value)
    }

    /// `vertical` at the top and bottom, `horizontal` at the sides
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }

    /// 25 mm at the sides and 30 mm top and bottom, the generous margins of a formal letter
    /// or paper
    pub fn academic() -> Margins {
        Margins::symmetric(mm(30.0), mm(25.0))
    }

    /// 16 mm all round, for dense single-page documents like a CV
    pub fn compact() -> Margins {
        Margins::all(mm(16.0))
    }

    /// The part of a `size` page inside the margins
    pub fn content_box(&self, size: PageSize) -> Rect {
        let (width, height) = size;
        Rect {
            x1: self.left,
            y1: self.bottom,
            x2: width - self.right,
            y2: height - self.top,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pagesize;

    #[test]
    fn academic_margins() {
        let margins = Margins::academic();
        assert!((margins.left.0 - 70.866).abs() < 0.01);
        assert!((margins.top.0 - 85.039).abs() < 0.01);
        assert_eq!(margins.left, margins.right);
    }

    #[test]
    fn content_box_is_inset_by_the_margins() {
        let content = Margins::compact().content_box(pagesize::A4);
        assert!((content.width().0 - (pagesize::A4.0 - mm(32.0)).0).abs() < 0.001);
        assert_eq!(content.y1, mm(16.0));
        assert_eq!(Margins::empty().content_box(pagesize::A4).x1, Pt(0.0));
    }
}
