/// ASCII rasterizer for terminal rendering of page turns
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use flipbook_core::projection::project_point;
use flipbook_core::{FlipConfig, Polygon};
use nalgebra::Point3;
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Character used for the resting pages underneath the turning one.
const PAGE_CHAR: char = '.';

/// Depth of resting pages; anything on the turning sheet is nearer.
const RESTING_DEPTH: f64 = 1.0;

/// ASCII renderer that rasterizes page strips to terminal characters.
///
/// The view is stretched to fill the buffer; row 0 is left free for the
/// status line.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    scale_x: f64,
    scale_y: f64,
    depth_buffer: Vec<f64>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize, config: &FlipConfig) -> Self {
        let size = width * height;
        let rows = height.saturating_sub(1).max(1);
        Self {
            width,
            height,
            scale_x: width as f64 / config.view_width,
            scale_y: rows as f64 / config.page_height,
            depth_buffer: vec![f64::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
        self.char_buffer.fill(' ');
    }

    fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale_x, 1.0 + y * self.scale_y)
    }

    /// Fill a flat, resting page spanning `x0..x1` in view pixels.
    pub fn render_resting_page(&mut self, x0: f64, x1: f64, page_height: f64) {
        let (left, top) = self.to_screen(x0, 0.0);
        let (right, bottom) = self.to_screen(x1, page_height);
        let quad = [
            (left, top, RESTING_DEPTH),
            (right, top, RESTING_DEPTH),
            (right, bottom, RESTING_DEPTH),
            (left, bottom, RESTING_DEPTH),
        ];
        self.rasterize_triangle(&[quad[0], quad[1], quad[2]], PAGE_CHAR);
        self.rasterize_triangle(&[quad[0], quad[2], quad[3]], PAGE_CHAR);
    }

    pub fn render_polygons(&mut self, polygons: &[Polygon], page_height: f64) {
        for polygon in polygons.iter().filter(|p| p.visible) {
            self.render_polygon(polygon, page_height);
        }
    }

    fn render_polygon(&mut self, polygon: &Polygon, page_height: f64) {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(polygon.width, 0.0, 0.0),
            Point3::new(polygon.width, page_height, 0.0),
            Point3::new(0.0, page_height, 0.0),
        ];

        // Project corners to screen space
        let mut screen = Vec::with_capacity(4);
        for corner in &corners {
            let p = project_point(&polygon.matrix, corner);
            if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
                return; // Degenerate strip
            }
            let (x, y) = self.to_screen(p.x, p.y);
            // Larger z is nearer the viewer
            screen.push((x, y, -p.z));
        }

        // Strips facing the viewer head-on are brightest
        let width = polygon.x1 - polygon.x0;
        let brightness = if polygon.width > 0.0 {
            (width.abs() / polygon.width).min(1.0)
        } else {
            0.0
        };
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f64) as usize;
        let char_index = char_index.clamp(1, LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        self.rasterize_triangle(&[screen[0], screen[1], screen[2]], character);
        self.rasterize_triangle(&[screen[0], screen[2], screen[3]], character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f64, f64, f64); 3], character: char) {
        let [v0, v1, v2] = *coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                    let idx = y as usize * self.width + x as usize;
                    if depth < self.depth_buffer[idx] {
                        self.depth_buffer[idx] = depth;
                        self.char_buffer[idx] = character;
                    }
                }
            }
        }
    }

    /// Character at a cell, for inspection.
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipbook_core::{Face, FlipDirection, PageFlip};

    fn config() -> FlipConfig {
        FlipConfig {
            page_width: 40.0,
            page_height: 20.0,
            view_width: 80.0,
            polygons: 4,
            ..FlipConfig::default()
        }
    }

    #[test]
    fn test_barycentric_inside_and_degenerate() {
        let w = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!(w.0 > 0.0 && w.1 > 0.0 && w.2 > 0.0);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 0.0)).is_none());
    }

    #[test]
    fn test_resting_page_fills_half() {
        let mut renderer = AsciiRenderer::new(80, 21, &config());
        renderer.render_resting_page(0.0, 40.0, 20.0);
        assert_eq!(renderer.cell(10, 10), Some(PAGE_CHAR));
        assert_eq!(renderer.cell(60, 10), Some(' '));
        // status line stays empty
        assert_eq!(renderer.cell(10, 0), Some(' '));
    }

    #[test]
    fn test_flat_strips_cover_resting_page() {
        let config = config();
        let flip = PageFlip::new(config.clone()).unwrap();
        let frame = flip.polygons(0.0, FlipDirection::Left, Face::Front);

        let mut renderer = AsciiRenderer::new(80, 21, &config);
        renderer.render_resting_page(40.0, 80.0, 20.0);
        renderer.render_polygons(&frame.polygons, config.page_height);
        assert_eq!(renderer.cell(60, 10), Some('@'));
        assert_eq!(renderer.cell(20, 10), Some(' '));
    }

    #[test]
    fn test_clear() {
        let mut renderer = AsciiRenderer::new(10, 5, &config());
        renderer.render_resting_page(0.0, 80.0, 20.0);
        renderer.clear();
        assert!(renderer.char_buffer.iter().all(|c| *c == ' '));
    }
}
