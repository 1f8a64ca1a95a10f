// File: crates/statgraph-core/src/color.rs
// Summary: RGBA color type and CSS-style color parsing for series and axis ink.

/// 8-bit straight-alpha color, independent of any rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb`, `#rrggbbaa`, `#rgb` or a basic CSS color name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => named(&s.to_ascii_lowercase()),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Rgba::opaque(nib(0)?, nib(1)?, nib(2)?))
        }
        6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: byte(6)? }),
        _ => None,
    }
}

fn named(name: &str) -> Option<Rgba> {
    let c = match name {
        "black" => Rgba::BLACK,
        "white" => Rgba::opaque(255, 255, 255),
        "red" => Rgba::opaque(255, 0, 0),
        "green" => Rgba::opaque(0, 128, 0),
        "blue" => Rgba::opaque(0, 0, 255),
        "orange" => Rgba::opaque(255, 165, 0),
        "gray" | "grey" => Rgba::opaque(128, 128, 128),
        "steelblue" => Rgba::opaque(70, 130, 180),
        "transparent" => Rgba::TRANSPARENT,
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Rgba::parse("#e7231d"), Some(Rgba::opaque(0xe7, 0x23, 0x1d)));
        assert_eq!(Rgba::parse("#fff"), Some(Rgba::opaque(255, 255, 255)));
        assert_eq!(Rgba::parse("#00000080"), Some(Rgba { r: 0, g: 0, b: 0, a: 0x80 }));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(Rgba::parse("Red"), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(Rgba::parse(" steelblue "), Some(Rgba::opaque(70, 130, 180)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Rgba::parse("#12345"), None);
        assert_eq!(Rgba::parse("#gggggg"), None);
        assert_eq!(Rgba::parse("chartreuse-ish"), None);
    }
}
