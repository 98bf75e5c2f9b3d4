//! The simulated point set and its grid construction.
//!
//! Points sit on a regular grid that covers the viewport plus one cell of
//! overscan on every edge, each anchored at a jittered base position. The
//! set is rebuilt wholesale whenever the viewport changes: no point
//! survives a regeneration.

use crate::config::{GridConfig, MIN_SPACING};
use crate::prng::RandomSource;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::{debug, warn};

/// Upper bound on points in one field.
pub const MAX_POINTS: usize = 1 << 18;

/// Drawable area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One simulated point.
///
/// Only `position` and `velocity` change after construction; the anchor,
/// phase, size, drift speed and amplitude are fixed until the next
/// regeneration replaces the point.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub position: DVec2,
    pub velocity: DVec2,
    base: DVec2,
    phase: DVec2,
    size: f64,
    drift_speed: f64,
    amplitude: f64,
}

impl Point {
    /// Creates a point at rest on its base position.
    pub fn new(base: DVec2, phase: DVec2, size: f64, amplitude: f64, drift_speed: f64) -> Self {
        Self {
            position: base,
            velocity: DVec2::ZERO,
            base,
            phase,
            size,
            drift_speed,
            amplitude,
        }
    }

    /// Jittered grid anchor the drift wave oscillates around.
    pub fn base(&self) -> DVec2 {
        self.base
    }

    /// Independent x/y phase offsets in [0, 2π).
    pub fn phase(&self) -> DVec2 {
        self.phase
    }

    /// Radius in pixels.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn drift_speed(&self) -> f64 {
        self.drift_speed
    }

    /// Drift radius in pixels.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

/// Dimensions of the covering grid for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub spacing: f64,
    pub columns: usize,
    pub rows: usize,
}

impl GridLayout {
    /// Cells run from `-spacing` up to (excluding) `extent + spacing` on each axis.
    ///
    /// Spacing is never below [`MIN_SPACING`]. If the grid would exceed
    /// [`MAX_POINTS`] cells the spacing is doubled until it fits.
    pub fn for_viewport(viewport: Viewport, grid: &GridConfig) -> Self {
        let requested = grid.spacing_for(viewport.width).max(MIN_SPACING);
        let mut layout = Self::with_spacing(viewport, requested);
        while layout.len() > MAX_POINTS {
            layout = Self::with_spacing(viewport, layout.spacing * 2.0);
        }
        if layout.spacing != requested {
            warn!(
                requested,
                spacing = layout.spacing,
                "grid too dense for viewport, spacing coarsened"
            );
        }
        layout
    }

    fn with_spacing(viewport: Viewport, spacing: f64) -> Self {
        Self {
            spacing,
            columns: cells_along(viewport.width, spacing),
            rows: cells_along(viewport.height, spacing),
        }
    }

    /// Total cell count, one point per cell.
    pub fn len(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unjittered coordinate of cell (`column`, `row`).
    pub fn cell(&self, column: usize, row: usize) -> DVec2 {
        DVec2::new(
            -self.spacing + column as f64 * self.spacing,
            -self.spacing + row as f64 * self.spacing,
        )
    }
}

fn cells_along(extent: u32, spacing: f64) -> usize {
    ((extent as f64 + 2.0 * spacing) / spacing).ceil() as usize
}

/// The full point collection, stored row-major by grid cell.
#[derive(Debug, Clone, Default)]
pub struct PointField {
    points: Vec<Point>,
    viewport: Viewport,
    layout: Option<GridLayout>,
}

impl PointField {
    /// An empty field; call [`regenerate`](Self::regenerate) to populate it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards every point and builds a fresh grid for `viewport`.
    ///
    /// Each cell gets one point with a jittered base, a random size,
    /// independent phases, a random amplitude, and a drift speed derived
    /// from its size. A zero-sized viewport still yields the overscan
    /// cells.
    pub fn regenerate<R: RandomSource + ?Sized>(
        &mut self,
        viewport: Viewport,
        grid: &GridConfig,
        rng: &mut R,
    ) {
        let layout = GridLayout::for_viewport(viewport, grid);
        let mut points = Vec::with_capacity(layout.len());

        for row in 0..layout.rows {
            for column in 0..layout.columns {
                let jitter = DVec2::new(
                    rng.next_range(-grid.jitter, grid.jitter),
                    rng.next_range(-grid.jitter, grid.jitter),
                );
                let size = rng.next_range(grid.size_min, grid.size_max);
                let phase = DVec2::new(rng.next_range(0.0, TAU), rng.next_range(0.0, TAU));
                let amplitude = grid.amplitude_base + rng.next_f64() * grid.amplitude_range;
                let drift_speed = grid.drift_base + size * grid.drift_per_size;

                points.push(Point::new(
                    layout.cell(column, row) + jitter,
                    phase,
                    size,
                    amplitude,
                    drift_speed,
                ));
            }
        }

        debug!(
            width = viewport.width,
            height = viewport.height,
            spacing = layout.spacing,
            points = points.len(),
            "regenerated point field"
        );

        self.points = points;
        self.viewport = viewport;
        self.layout = Some(layout);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Viewport of the most recent regeneration.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Layout of the most recent regeneration, `None` before the first.
    pub fn layout(&self) -> Option<GridLayout> {
        self.layout
    }
}
