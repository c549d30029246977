//! HSLA colors as used by the field palette

/// Color in CSS HSL notation
///
/// `h` is in degrees, `s`, `l` and `a` are fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }

    /// Gamma-encoded sRGB components, same result as a CSS `hsla()` string
    pub fn to_srgba(self) -> [f32; 4] {
        let chroma = self.s * self.l.min(1.0 - self.l);
        let channel = |n: f32| {
            let k = (n + self.h / 30.0) % 12.0;
            self.l - chroma * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
        };

        [channel(0.0), channel(8.0), channel(4.0), self.a]
    }

    /// Linear components for an sRGB render target; alpha is not converted
    pub fn to_linear_rgba(self) -> [f32; 4] {
        let [r, g, b, a] = self.to_srgba();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
    }
}

/// Standard sRGB transfer function (IEC 61966-2-1)
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
