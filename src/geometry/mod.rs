//! Geometry utilities for mesh-probe.
//!
//! This module provides helpers for evaluating per-cell quality measures,
//! centroids and distances from explicit vertex coordinates.

pub mod quality;
