use color::{Oklch, OpaqueColor, Srgb};
use peniko::Color;

pub const TEXT: Color = Color::from_rgb8(32, 32, 32);
pub const AXIS: Color = Color::from_rgb8(128, 128, 128);
pub const GRID: Color = Color::from_rgb8(222, 222, 222);
pub const BACKGROUND: Color = Color::WHITE;

/// Series colors, walked around the hue circle at constant lightness.
pub const SERIES: LinearPalette =
  LinearPalette::new(OpaqueColor::new([0.6, 0.13, 250.0]), OpaqueColor::new([0.6, 0.13, 30.0]));

pub struct LinearPalette {
  start: OpaqueColor<Oklch>,
  end:   OpaqueColor<Oklch>,
}

impl LinearPalette {
  pub const fn new(start: OpaqueColor<Oklch>, end: OpaqueColor<Oklch>) -> Self {
    Self { start, end }
  }

  pub fn sample(&self, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    self.start.lerp(self.end, t, color::HueDirection::Shorter).convert::<Srgb>().with_alpha(1.0)
  }

  /// Color for the `index`th series, cycling through `SLOTS` evenly spaced hues.
  pub fn nth(&self, index: usize) -> Color {
    const SLOTS: usize = 6;
    self.sample((index % SLOTS) as f32 / (SLOTS - 1) as f32)
  }
}
