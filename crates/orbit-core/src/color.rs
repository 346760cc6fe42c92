use crate::constants::CREDIBILITY_STOPS;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Channels as 0..1 floats.
    pub fn to_f32(self) -> [f32; 3] {
        self.0.map(|c| c as f32 / 255.0)
    }

    /// Rec. 709 relative luminance, 0..1.
    pub fn luminance(self) -> f32 {
        let [r, g, b] = self.to_f32();
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    pub fn hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Map `t` in 0..1 onto the lightcyan → blue → darkblue scale.
///
/// Stops are evenly spaced and interpolated in RGB; every channel is
/// non-increasing along the scale so darker always means more credible.
/// Out-of-range input is clamped.
pub fn credibility_scale(t: f32) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let spans = (CREDIBILITY_STOPS.len() - 1) as f32;
    let pos = t * spans;
    let i = (pos.floor() as usize).min(CREDIBILITY_STOPS.len() - 2);
    let local = pos - i as f32;
    let (a, b) = (CREDIBILITY_STOPS[i], CREDIBILITY_STOPS[i + 1]);
    let mut out = [0u8; 3];
    for c in 0..3 {
        let v = a[c] as f32 + (b[c] as f32 - a[c] as f32) * local;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    Rgb(out)
}

/// Color for a credibility percentage.
pub fn credibility_color(credibility_percent: u8) -> Rgb {
    credibility_scale(credibility_percent as f32 / 100.0)
}
