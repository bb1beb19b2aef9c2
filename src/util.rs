use rgb::ComponentMap as _;

use crate::geometry::FloatType;

/// Linear-space RGB color with channels in domain units (clamped to [0, 1]
/// only at the buffer boundary).
pub type Color = rgb::RGB<FloatType>;

pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};

pub trait ColorExt {
    /// Channel-wise product, used for BSDF attenuation.
    fn attenuate(self, other: Color) -> Color;

    /// Clamps every channel to [0, 1].
    fn clamped(self) -> Color;

    /// Pure gamma post-process, `c' = c^(1/gamma)`.
    fn gamma_corrected(self, gamma: FloatType) -> Color;
}

impl ColorExt for Color {
    fn attenuate(self, other: Color) -> Color {
        Color {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
        }
    }

    fn clamped(self) -> Color {
        self.map(|c| c.clamp(0.0, 1.0))
    }

    fn gamma_corrected(self, gamma: FloatType) -> Color {
        self.map(|c| c.powf(1.0 / gamma))
    }
}

/// Formats a count with thousands separators, e.g. `1234567` -> `"1,234,567"`.
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
