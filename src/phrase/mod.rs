//! Entropy-boundary phrase extraction
//!
//! - [`adjacency`]: neighbour collection and entropy statistics
//! - [`boundary`]: boundary and growth predicates
//! - [`candidate`]: pooled candidate and phrase records
//! - [`extraction`]: the breadth-first driver and convenience entry points

pub mod adjacency;
pub mod boundary;
pub mod candidate;
pub mod extraction;
