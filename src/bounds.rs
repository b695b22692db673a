use kurbo::{Affine, Point};

/// A rectangle in either data or viewport space. Viewport ranges may be
/// inverted (`min > max`), which is how the y axis is flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
  pub x: Range,
  pub y: Range,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl Bounds {
  pub const fn new(x: Range, y: Range) -> Self { Bounds { x, y } }

  /// Bounds of the points with both coordinates finite, or `None` if there
  /// are none.
  pub fn from_points(points: &[Point]) -> Option<Self> {
    let finite = || points.iter().filter(|p| p.x.is_finite() && p.y.is_finite());
    let x = Range::from_values(finite().map(|p| p.x))?;
    let y = Range::from_values(finite().map(|p| p.y))?;
    Some(Bounds { x, y })
  }

  pub const fn expand_by(self, fract: f64) -> Self {
    Bounds { x: self.x.expand_by(fract), y: self.y.expand_by(fract) }
  }

  pub fn union(&self, other: Bounds) -> Bounds {
    Bounds { x: self.x.union(other.x), y: self.y.union(other.y) }
  }

  pub fn nonsingular(self) -> Self { Bounds { x: self.x.nonsingular(), y: self.y.nonsingular() } }

  /// Maps this rectangle onto `viewport`, corner to corner.
  pub(crate) fn transform_to(&self, viewport: Bounds) -> Affine {
    let scale_x = viewport.x.size() / self.x.size();
    let scale_y = viewport.y.size() / self.y.size();
    let translate_x = viewport.x.min - self.x.min * scale_x;
    let translate_y = viewport.y.min - self.y.min * scale_y;

    Affine::new([scale_x, 0.0, 0.0, scale_y, translate_x, translate_y])
  }
}

impl Range {
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }
  pub const fn size(&self) -> f64 { self.max - self.min }

  /// The smallest range holding every finite value.
  pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
    values.into_iter().filter(|v| v.is_finite()).fold(None, |range, v| match range {
      None => Some(Range::new(v, v)),
      Some(r) => Some(Range::new(r.min.min(v), r.max.max(v))),
    })
  }

  pub const fn expand(self, amount: f64) -> Self {
    Range {
      min: self.min - amount * self.size().signum(),
      max: self.max + amount * self.size().signum(),
    }
  }
  pub const fn expand_by(self, fract: f64) -> Self { self.expand(self.size().abs() * fract) }

  pub const fn contains(&self, value: &f64) -> bool {
    (*value >= self.min && *value <= self.max) || (*value <= self.min && *value >= self.max)
  }

  pub fn union(&self, other: Range) -> Range {
    Range { min: self.min.min(other.min), max: self.max.max(other.max) }
  }

  /// Widens a zero-size range around its value so it can be mapped and ticked.
  pub fn nonsingular(self) -> Self {
    if self.size() != 0.0 {
      return self;
    }
    let pad = if self.min == 0.0 { 1.0 } else { self.min.abs() * 0.1 };
    Range::new(self.min - pad, self.max + pad)
  }

  /// Tick positions inside this range, spaced on a 1/2/2.5/5 x 10^k step so
  /// that roughly `count` of them fit.
  pub fn nice_ticks(&self, count: u32) -> NiceTicksIter {
    let (lo, hi) = if self.min <= self.max { (self.min, self.max) } else { (self.max, self.min) };
    let step = (hi - lo) / f64::from(count.max(1));
    if !step.is_finite() || step <= 0.0 {
      return NiceTicksIter::empty();
    }

    let k = step.log10().floor();
    let base = step / 10f64.powf(k);

    let nice_base = match base {
      b if b <= 1.0 => 1.0,
      b if b <= 2.0 => 2.0,
      b if b <= 2.5 => 2.5,
      b if b <= 5.0 => 5.0,
      _ => 10.0,
    };

    let step = nice_base * 10f64.powf(k);
    // 2.5 needs one more decimal than its magnitude suggests.
    let extra = if nice_base == 2.5 { 1 } else { 0 };
    let precision = (-(k as i32) + extra).max(0) as usize;

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    NiceTicksIter { index: first, last, step, precision }
  }
}

pub struct NiceTicksIter {
  index:     i64,
  last:      i64,
  step:      f64,
  precision: usize,
}

impl NiceTicksIter {
  fn empty() -> Self { NiceTicksIter { index: 1, last: 0, step: 0.0, precision: 0 } }

  /// Decimal places needed to print the ticks of this iterator.
  pub fn precision(&self) -> usize { self.precision }
}

impl Iterator for NiceTicksIter {
  type Item = f64;
  fn next(&mut self) -> Option<Self::Item> {
    if self.index > self.last {
      return None;
    }
    let p = 10f64.powi(self.precision as i32);
    let value = (self.index as f64 * self.step * p).round() / p;
    self.index += 1;
    Some(value)
  }
}
