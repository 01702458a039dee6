/// Flipbook Web - WASM bindings for the page turn transform engine
///
/// Exposes [`flipbook_core::Matrix`] to JavaScript under the `Matrix` API the
/// flipbook view layer calls, and writes transforms straight onto elements.

use flipbook_core::{Face, FlipConfig, FlipDirection, Matrix, PageFlip};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// JavaScript handle around an owned [`Matrix`].
///
/// Composition methods mutate the receiver in place; JavaScript callers chain
/// by calling them one after another on the same handle.
#[wasm_bindgen(js_name = Matrix)]
pub struct WebMatrix {
    inner: Matrix,
}

#[wasm_bindgen(js_class = Matrix)]
impl WebMatrix {
    /// `new Matrix()` is the identity; `new Matrix(values)` copies 6 or 16
    /// numbers.
    #[wasm_bindgen(constructor)]
    pub fn new(values: Option<Vec<f64>>) -> Result<WebMatrix, JsValue> {
        let inner = match values {
            Some(values) => Matrix::try_from(values.as_slice()).map_err(to_js)?,
            None => Matrix::new(),
        };
        Ok(WebMatrix { inner })
    }

    /// Parse a `matrix(...)` or `matrix3d(...)` declaration.
    pub fn parse(text: &str) -> Result<WebMatrix, JsValue> {
        let inner = text.parse::<Matrix>().map_err(to_js)?;
        Ok(WebMatrix { inner })
    }

    #[wasm_bindgen(js_name = clone)]
    pub fn duplicate(&self) -> WebMatrix {
        WebMatrix {
            inner: self.inner.clone(),
        }
    }

    /// The 16 column-major values.
    #[wasm_bindgen(getter)]
    pub fn m(&self) -> Vec<f64> {
        self.inner.values().to_vec()
    }

    pub fn multiply(&mut self, other: &[f64]) -> Result<(), JsValue> {
        let other = Matrix::try_from(other).map_err(to_js)?;
        self.inner.multiply(other.as_ref());
        Ok(())
    }

    pub fn perspective(&mut self, depth: f64) {
        self.inner.perspective(depth);
    }

    pub fn translate(&mut self, x: f64, y: Option<f64>) {
        self.inner.translate(x, y.unwrap_or(0.0));
    }

    pub fn translate3d(&mut self, x: f64, y: f64, z: f64) {
        self.inner.translate3d(x, y, z);
    }

    #[wasm_bindgen(js_name = rotateY)]
    pub fn rotate_y(&mut self, degrees: f64) {
        self.inner.rotate_y(degrees);
    }

    /// Projected x of `(x, 0, 0)`; may be `Infinity` or `NaN`.
    #[wasm_bindgen(js_name = transformX)]
    pub fn transform_x(&self, x: f64) -> f64 {
        self.inner.project(x)
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_css(&self) -> String {
        self.inner.to_string()
    }

    /// Set `element.style.transform` to this matrix.
    #[wasm_bindgen(js_name = applyTo)]
    pub fn apply_to(&self, element: &HtmlElement) -> Result<(), JsValue> {
        element
            .style()
            .set_property("transform", &self.inner.to_string())
    }
}

/// Page turn geometry for the view layer.
#[wasm_bindgen(js_name = PageFlip)]
pub struct WebPageFlip {
    inner: PageFlip,
}

#[wasm_bindgen(js_class = PageFlip)]
impl WebPageFlip {
    /// Page and view sizes are required; the rest fall back to
    /// [`FlipConfig::default`].
    #[wasm_bindgen(constructor)]
    pub fn new(
        page_width: f64,
        page_height: f64,
        view_width: f64,
        perspective: Option<f64>,
        polygons: Option<usize>,
        max_angle: Option<f64>,
    ) -> Result<WebPageFlip, JsValue> {
        let defaults = FlipConfig::default();
        let config = FlipConfig {
            page_width,
            page_height,
            view_width,
            perspective: perspective.unwrap_or(defaults.perspective),
            polygons: polygons.unwrap_or(defaults.polygons),
            max_angle: max_angle.unwrap_or(defaults.max_angle),
        };
        let inner = PageFlip::new(config).map_err(to_js)?;
        Ok(WebPageFlip { inner })
    }

    /// Strip transforms of one face, in left-to-right order.
    pub fn transforms(&self, progress: f64, forward: bool, front: bool) -> Vec<String> {
        let frame = self.inner.polygons(progress, direction(forward), face(front));
        frame.polygons.iter().map(|p| p.transform()).collect()
    }

    /// `[min_x, max_x]` of one face, empty if the projection degenerated.
    pub fn bounds(&self, progress: f64, forward: bool, front: bool) -> Vec<f64> {
        self.inner
            .polygons(progress, direction(forward), face(front))
            .bounds()
            .map(|(min_x, max_x)| vec![min_x, max_x])
            .unwrap_or_default()
    }
}

fn direction(forward: bool) -> FlipDirection {
    if forward {
        FlipDirection::Left
    } else {
        FlipDirection::Right
    }
}

fn face(front: bool) -> Face {
    if front {
        Face::Front
    } else {
        Face::Back
    }
}

fn to_js(error: flipbook_core::Error) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_chain_matches_core() {
        let mut web = WebMatrix::new(None).unwrap();
        web.rotate_y(30.0);
        web.translate3d(0.0, 0.0, -200.0);
        web.perspective(800.0);

        let mut core = Matrix::new();
        core.rotate_y(30.0).translate3d(0.0, 0.0, -200.0).perspective(800.0);

        assert_eq!(web.transform_x(50.0), core.project(50.0));
        assert_eq!(web.to_css(), core.to_string());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = WebMatrix::new(Some(vec![1.0, 0.0, 0.0, 1.0, 5.0, 0.0])).unwrap();
        let mut copy = original.duplicate();
        copy.translate(10.0, None);
        assert_eq!(original.transform_x(0.0), 5.0);
        assert_eq!(copy.transform_x(0.0), 15.0);
    }

    #[test]
    fn test_flip_helpers() {
        let flip = WebPageFlip::new(400.0, 560.0, 800.0, None, Some(5), None).unwrap();
        assert_eq!(flip.transforms(0.3, true, true).len(), 5);
        let bounds = flip.bounds(0.0, true, true);
        assert_eq!(bounds.len(), 2);
        assert!((bounds[0] - 400.0).abs() < 1e-6);
    }
}
