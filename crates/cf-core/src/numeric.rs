use crate::CfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Tolerances for comparing simulated times and volumes.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CfError::NonFinite { what, value: v })
    }
}

/// Sorted, deduplicated copy of `values` (NaN-free input assumed).
pub fn sorted_unique(values: impl IntoIterator<Item = Real>) -> Vec<Real> {
    let mut out: Vec<Real> = values.into_iter().collect();
    out.sort_by(|a, b| a.total_cmp(b));
    out.dedup();
    out
}
