use std::convert::Infallible;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

/// How neighbor lookups that fall outside the grid are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BoundaryRepr", into = "BoundaryRepr")]
pub enum BoundaryPolicy {
    /// Out-of-range neighbors read as this value
    Fixed(u8),
    /// Toroidal wrap-around on every axis
    Wrap,
    /// Out-of-range components are clamped to the nearest edge cell
    Clamp,
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        BoundaryPolicy::Fixed(0)
    }
}

impl BoundaryPolicy {
    /// Resolve one coordinate component against an axis of length `size`.
    /// `None` means the lookup is out of bound (only possible with `Fixed`).
    #[inline]
    pub fn resolve(&self, candidate: isize, size: usize) -> Option<usize> {
        let n = size as isize;
        if (0..n).contains(&candidate) {
            return Some(candidate as usize);
        }
        match self {
            BoundaryPolicy::Fixed(_) => None,
            BoundaryPolicy::Wrap => Some(candidate.rem_euclid(n) as usize),
            BoundaryPolicy::Clamp => Some(candidate.clamp(0, n - 1) as usize),
        }
    }

    /// Resolve `cell + offset` on every axis. A single failing axis makes the
    /// whole neighbor out of bound.
    #[inline]
    pub fn resolve_coord<const D: usize>(
        &self,
        cell: &[usize; D],
        offset: &[isize; D],
        dims: &[usize; D],
    ) -> Option<[usize; D]> {
        let mut resolved = [0; D];
        for d in 0..D {
            resolved[d] = self.resolve(cell[d] as isize + offset[d], dims[d])?;
        }
        Some(resolved)
    }

    /// Fixed policy from any integer, truncated the way a cell buffer stores it
    pub fn from_int(value: i64) -> Self {
        BoundaryPolicy::Fixed(value as u8)
    }

    /// Value read for an out-of-bound neighbor
    pub const fn fixed_value(&self) -> u8 {
        match self {
            BoundaryPolicy::Fixed(value) => *value,
            _ => 0,
        }
    }
}

impl From<u8> for BoundaryPolicy {
    fn from(value: u8) -> Self {
        BoundaryPolicy::Fixed(value)
    }
}

impl From<i32> for BoundaryPolicy {
    fn from(value: i32) -> Self {
        BoundaryPolicy::from_int(value.into())
    }
}

impl From<i64> for BoundaryPolicy {
    fn from(value: i64) -> Self {
        BoundaryPolicy::from_int(value)
    }
}

/// `"wrap"`, `"clamp"` or an integer; anything else becomes `Fixed(0)`.
impl FromStr for BoundaryPolicy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(if s.eq_ignore_ascii_case("wrap") {
            BoundaryPolicy::Wrap
        } else if s.eq_ignore_ascii_case("clamp") {
            BoundaryPolicy::Clamp
        } else if let Ok(value) = s.parse::<i64>() {
            BoundaryPolicy::from_int(value)
        } else {
            warn!("unknown out-of-bound value {:?}, using 0", s);
            BoundaryPolicy::Fixed(0)
        })
    }
}

impl From<&str> for BoundaryPolicy {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(policy) => policy,
            Err(never) => match never {},
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum BoundaryRepr {
    Value(i64),
    Keyword(String),
}

impl From<BoundaryRepr> for BoundaryPolicy {
    fn from(repr: BoundaryRepr) -> Self {
        match repr {
            BoundaryRepr::Value(value) => BoundaryPolicy::from_int(value),
            BoundaryRepr::Keyword(keyword) => BoundaryPolicy::from(keyword.as_str()),
        }
    }
}

impl From<BoundaryPolicy> for BoundaryRepr {
    fn from(policy: BoundaryPolicy) -> Self {
        match policy {
            BoundaryPolicy::Fixed(value) => BoundaryRepr::Value(value.into()),
            BoundaryPolicy::Wrap => BoundaryRepr::Keyword("wrap".to_owned()),
            BoundaryPolicy::Clamp => BoundaryRepr::Keyword("clamp".to_owned()),
        }
    }
}
