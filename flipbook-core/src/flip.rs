/// Page turn geometry: splits a turning page into vertical strips, each with
/// its own [`Matrix`], and reports the projected horizontal extent of the page
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::projection;

/// Upper bound on the strip count of a turning page.
pub const MAX_POLYGONS: usize = 1024;

/// Layout and look of a two-page spread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipConfig {
    pub page_width: f64,
    pub page_height: f64,
    /// Width of the whole view; the spine sits at its center.
    pub view_width: f64,
    /// Perspective distance applied around the spine.
    pub perspective: f64,
    /// Number of strips a turning page is split into.
    pub polygons: usize,
    /// Maximum curl of a page mid-turn, in degrees.
    pub max_angle: f64,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            page_width: 400.0,
            page_height: 560.0,
            view_width: 800.0,
            perspective: 2400.0,
            polygons: 10,
            max_angle: 45.0,
        }
    }
}

impl FlipConfig {
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("view_width", self.view_width),
            ("perspective", self.perspective),
        ];
        for (name, v) in sizes {
            if !(v.is_finite() && v > 0.0) {
                return Err(Error::config(format!(
                    "{name} must be a positive number, got {v}"
                )));
            }
        }
        if self.polygons == 0 {
            return Err(Error::config("polygons must be at least 1"));
        }
        if self.polygons > MAX_POLYGONS {
            return Err(Error::config(format!(
                "polygons must be at most {MAX_POLYGONS}, got {}",
                self.polygons
            )));
        }
        if !self.max_angle.is_finite() {
            return Err(Error::config("max_angle must be finite"));
        }
        Ok(())
    }

    fn spine(&self) -> f64 {
        self.view_width / 2.0
    }
}

/// Direction the turning page travels in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipDirection {
    /// Right-hand page turns over onto the left (forward).
    Left,
    /// Left-hand page turns over onto the right (backward).
    Right,
}

/// Which side of the turning sheet is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
}

/// One strip of a turning page.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub index: usize,
    pub matrix: Matrix,
    /// Strip width in page pixels.
    pub width: f64,
    /// Horizontal offset of this strip's slice of the page image.
    pub texture_offset: f64,
    pub z_index: i32,
    /// Projected x of the strip's left and right edges.
    pub x0: f64,
    pub x1: f64,
    pub visible: bool,
}

impl Polygon {
    /// The strip's `matrix3d(...)` declaration.
    pub fn transform(&self) -> String {
        self.matrix.to_string()
    }
}

/// Running min/max of projected x, ignoring non-finite values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min_x: f64,
    max_x: f64,
}

impl Bounds {
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
        }
    }

    /// Returns false if `x` was rejected as degenerate.
    pub fn include(&mut self, x: f64) -> bool {
        if !x.is_finite() {
            return false;
        }
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        true
    }

    pub fn get(&self) -> Option<(f64, f64)> {
        (self.min_x <= self.max_x).then_some((self.min_x, self.max_x))
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

/// All strips of one face at one moment of a turn.
#[derive(Debug, Clone)]
pub struct FlipFrame {
    pub progress: f64,
    pub direction: FlipDirection,
    pub face: Face,
    pub polygons: Vec<Polygon>,
    bounds: Bounds,
}

impl FlipFrame {
    /// Projected `(min_x, max_x)` of the face, `None` if every edge was
    /// degenerate.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.bounds.get()
    }
}

/// Computes page turn frames for a validated [`FlipConfig`].
#[derive(Debug, Clone)]
pub struct PageFlip {
    config: FlipConfig,
}

impl PageFlip {
    pub fn new(config: FlipConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FlipConfig {
        &self.config
    }

    /// Build the strips of `face` at `progress` (clamped to `[0, 1]`).
    pub fn polygons(&self, progress: f64, direction: FlipDirection, face: Face) -> FlipFrame {
        let cfg = &self.config;
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        // The front face starts on the side the page leaves from; the back
        // face ends on the other side. Pages on the left are anchored at
        // their right edge (the spine).
        let origin_right = matches!(
            (direction, face),
            (FlipDirection::Left, Face::Back) | (FlipDirection::Right, Face::Front)
        );
        let page_x = if origin_right {
            cfg.spine() - cfg.page_width
        } else {
            cfg.spine()
        };
        let turned = match face {
            Face::Front => progress,
            Face::Back => 1.0 - progress,
        };
        let spine_sign = if origin_right { 1.0 } else { -1.0 };
        let rotation = spine_sign * turned * 180.0;

        let mut page = Matrix::new();
        page.translate(cfg.spine(), 0.0)
            .perspective(cfg.perspective)
            .translate(-cfg.spine(), 0.0)
            .translate(page_x, 0.0);
        if origin_right {
            page.translate(cfg.page_width, 0.0)
                .rotate_y(rotation)
                .translate(-cfg.page_width, 0.0);
        } else {
            page.rotate_y(rotation);
        }

        // Curl is zero at rest and peaks halfway through the turn. The back
        // face is the same sheet seen from behind, so it bends the other way.
        let bend_sign = match face {
            Face::Front => 1.0,
            Face::Back => -1.0,
        };
        let curl = (progress * PI).sin() * cfg.max_angle.to_radians();
        let n = cfg.polygons;
        let strip_width = cfg.page_width / n as f64;
        let strip_curl = curl / n as f64;

        // Offset of each strip's spine-side edge, along the page and lifted
        // off it. Each strip turns one more curl step than the previous one.
        let mut offsets = Vec::with_capacity(n);
        let (mut along, mut lift) = (0.0, 0.0);
        for step in 0..n {
            offsets.push((along, lift));
            let angle = strip_curl * step as f64;
            along += strip_width * angle.cos();
            lift += strip_width * angle.sin();
        }

        let mut bounds = Bounds::empty();
        let mut polygons = Vec::with_capacity(n);
        for index in 0..n {
            // Strips are numbered left to right; bending accumulates from the
            // spine outwards.
            let from_spine = if origin_right { n - 1 - index } else { index };
            let angle = (strip_curl * from_spine as f64).to_degrees();
            let (along, lift) = offsets[from_spine];
            let z = bend_sign * lift;

            let mut matrix = page.clone();
            if origin_right {
                matrix
                    .translate3d(cfg.page_width - along, 0.0, z)
                    .rotate_y(bend_sign * angle)
                    .translate(-strip_width, 0.0);
            } else {
                matrix
                    .translate3d(along, 0.0, z)
                    .rotate_y(-bend_sign * angle);
            }

            let x0 = matrix.project(0.0);
            let x1 = matrix.project(strip_width);
            let left_ok = bounds.include(x0);
            let right_ok = bounds.include(x1);
            if !(left_ok && right_ok) {
                warn!(index, x0, x1, "strip projects to a degenerate position");
            }

            polygons.push(Polygon {
                index,
                visible: !projection::backface_is_hidden(&matrix),
                matrix,
                width: strip_width,
                texture_offset: strip_width * index as f64,
                z_index: z.abs().round() as i32,
                x0,
                x1,
            });
        }

        debug!(
            progress,
            ?direction,
            ?face,
            strips = n,
            bounds = ?bounds.get(),
            "computed flip frame"
        );

        FlipFrame {
            progress,
            direction,
            face,
            polygons,
            bounds,
        }
    }
}
