//! Boundary and growth predicates
//!
//! Both tests read the same entropy statistic, applied to different
//! neighbour sets. High entropy outside a candidate marks a phrase edge;
//! low entropy to the right means the candidate has a predictable
//! continuation worth growing into. The two are independent and may hold
//! together.

use super::adjacency::Adjacent;
use crate::types::ExtractorConfig;

/// Default entropy above which a side is a phrase boundary
pub const BOUNDARY_THRESHOLD: f64 = 0.5;
/// Default entropy below which a candidate is extended
pub const SHIFT_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub boundary: f64,
    pub shift: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            boundary: BOUNDARY_THRESHOLD,
            shift: SHIFT_THRESHOLD,
        }
    }
}

impl Thresholds {
    pub fn new(boundary: f64, shift: f64) -> Self {
        Self { boundary, shift }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(config.boundary_threshold, config.shift_threshold)
    }

    /// The neighbours on this side are diverse enough to end a phrase.
    pub fn is_boundary(&self, adjacent: &Adjacent) -> bool {
        adjacent.entropy > self.boundary
    }

    /// The neighbours on this side are predictable enough to grow into.
    pub fn is_phrase(&self, adjacent: &Adjacent) -> bool {
        adjacent.entropy < self.shift
    }
}
