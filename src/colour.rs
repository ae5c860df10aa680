/// A fill or stroke colour, expressed in the RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Parse a CSS-style `#rrggbb` (or `rrggbb`) string. Returns [None] for anything else.
    pub fn from_hex(hex: &str) -> Option<Colour> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Colour::new_rgb_bytes(channel(0)?, channel(2)?, channel(4)?))
    }

    /// The colour as 8-bit RGB, which is what raster images are built from
    pub fn to_rgb_bytes(self) -> [u8; 3] {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        match self {
            Colour::RGB { r, g, b } => [byte(r), byte(g), byte(b)],
            Colour::Grey { g } => [byte(g); 3],
        }
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
    /// `#1a1a1a`, almost black, for body text
    pub const INK: Colour = Colour::RGB {
        r: 26.0 / 255.0,
        g: 26.0 / 255.0,
        b: 26.0 / 255.0,
    };
    /// `#4a4a4a`, dark grey, for metadata lines and captions
    pub const SLATE: Colour = Colour::RGB {
        r: 74.0 / 255.0,
        g: 74.0 / 255.0,
        b: 74.0 / 255.0,
    };
    /// `#999999`, used for placeholder labels
    pub const SILVER: Colour = Colour::RGB {
        r: 153.0 / 255.0,
        g: 153.0 / 255.0,
        b: 153.0 / 255.0,
    };
}
