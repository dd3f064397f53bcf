//! Color type used by the rasterizer.
//!
//! Colors are plain 8-bit RGBA. The rasterizer does no blending: a color
//! with `a == 0` is skipped, anything else overwrites the target pixel.

/// RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Transparent black, the value of a cleared pixel.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new_opaque(0, 0, 0);
    pub const WHITE: Self = Self::new_opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// A color with zero alpha is never drawn.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(c: [u8; 4]) -> Self {
        Self::from_array(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent() {
        assert!(Rgba8::TRANSPARENT.is_transparent());
        assert!(Rgba8::new(255, 0, 0, 0).is_transparent());
        assert!(!Rgba8::new(0, 0, 0, 1).is_transparent());
        assert_eq!(Rgba8::default(), Rgba8::TRANSPARENT);
    }

    #[test]
    fn test_array_conversion() {
        let c = Rgba8::new(10, 20, 30, 40);
        assert_eq!(c.to_array(), [10, 20, 30, 40]);
        assert_eq!(Rgba8::from([10, 20, 30, 40]), c);
    }

    #[test]
    fn test_opaque() {
        let c = Rgba8::new_opaque(1, 2, 3);
        assert_eq!(c.a, 255);
        assert_eq!(Rgba8::WHITE.to_array(), [255; 4]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_channels() {
        let c: Rgba8 = serde_json::from_str(r#"{"r":255,"g":0,"b":0,"a":255}"#).unwrap();
        assert_eq!(c, Rgba8::new_opaque(255, 0, 0));
        let bad: Result<Rgba8, _> = serde_json::from_str(r#"{"r":256,"g":0,"b":0,"a":255}"#);
        assert!(bad.is_err());
    }
}
