//! Change detection for tween parameters.
//!
//! A track captures the parameter fields it was built from and compares them against the live
//! parameters on every loop. Floats compare approximately, so values recomputed each frame that
//! still describe the same configuration do not force a rebuild.

/// Smallest positive subnormal `f32`.
const SMALLEST_SUBNORMAL: f32 = 1.401_298_5e-45;

/// Approximate float equality: relative tolerance of `1e-6` with an absolute floor of eight
/// smallest subnormals, so any change away from zero is a change.
#[inline]
pub fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(SMALLEST_SUBNORMAL * 8.0)
}

pub trait Approx {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl Approx for f32 {
    fn approx_eq(&self, other: &Self) -> bool {
        approximately(*self, *other)
    }
}

impl Approx for bool {
    fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: Approx, const N: usize> Approx for [T; N] {
    fn approx_eq(&self, other: &Self) -> bool {
        self.iter().zip(other.iter()).all(|(a, b)| a.approx_eq(b))
    }
}

impl<A: Approx, B: Approx> Approx for (A, B) {
    fn approx_eq(&self, other: &Self) -> bool {
        self.0.approx_eq(&other.0) && self.1.approx_eq(&other.1)
    }
}

/// Last captured field set of one track.
#[derive(Debug, Clone)]
pub struct SnapshotCache<T> {
    last: Option<T>,
}

impl<T> Default for SnapshotCache<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: Approx + Clone> SnapshotCache<T> {
    /// True when nothing was captured yet or any field drifted past tolerance.
    pub fn has_changed(&self, current: &T) -> bool {
        match &self.last {
            Some(snapshot) => !snapshot.approx_eq(current),
            None => true,
        }
    }

    pub fn capture(&mut self, current: T) {
        self.last = Some(current);
    }

    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
