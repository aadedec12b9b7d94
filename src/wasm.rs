use crate::error::VoronoiError;
use crate::point::Point;
use crate::voronoi::Voronoi;
use js_sys::Array;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

fn to_js(err: VoronoiError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Reads a JS array of number arrays, e.g. `[[1, 2], [0]]`.
fn parse_js_table(val: &JsValue, what: &str) -> Result<Vec<Vec<f64>>, JsValue> {
    let rows = val
        .dyn_ref::<Array>()
        .ok_or_else(|| JsValue::from_str(&format!("{what} must be an array of arrays")))?;
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let row = row
                .dyn_ref::<Array>()
                .ok_or_else(|| JsValue::from_str(&format!("{what} row {i} is not an array")))?;
            row.iter()
                .map(|v| {
                    v.as_f64().ok_or_else(|| {
                        JsValue::from_str(&format!("{what} row {i} holds a non-number"))
                    })
                })
                .collect()
        })
        .collect()
}

fn parse_js_adjacency(val: &JsValue) -> Result<Vec<Vec<usize>>, JsValue> {
    parse_js_table(val, "Adjacency")?
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            row.into_iter()
                .map(|v| {
                    if v >= 0.0 && v.fract() == 0.0 {
                        Ok(v as usize)
                    } else {
                        Err(JsValue::from_str(&format!(
                            "Adjacency row {i} holds {v}, not a site index"
                        )))
                    }
                })
                .collect()
        })
        .collect()
}

/// Discretized 3D Voronoi partition of a box.
#[wasm_bindgen(js_name = Voronoi)]
pub struct VoronoiWASM {
    inner: Voronoi,
}

#[wasm_bindgen(js_class = Voronoi)]
impl VoronoiWASM {
    #[wasm_bindgen(constructor)]
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64, z0: f64, z1: f64) -> Result<VoronoiWASM, JsValue> {
        Ok(VoronoiWASM {
            inner: Voronoi::new(x0, x1, y0, y1, z0, z1).map_err(to_js)?,
        })
    }

    pub fn add_site(&mut self, x: f64, y: f64, z: f64) { self.inner.add_site(Point::new(x, y, z)); }
    pub fn clear_sites(&mut self) { self.inner.clear_sites(); }
    pub fn random_sites(&mut self, count: usize) { self.inner.random_sites(count); }

    /// Clips every cell against the bisectors of all other sites.
    pub fn create_cells(&mut self) -> Result<(), JsValue> {
        self.inner.create_cells(None, None).map_err(to_js)
    }

    /// Clips each cell only against its listed neighbors, optionally with per-neighbor weights.
    pub fn create_cells_with(&mut self, adjacency: JsValue, weights: JsValue) -> Result<(), JsValue> {
        let adjacency = parse_js_adjacency(&adjacency)?;
        let weights = if weights.is_undefined() || weights.is_null() {
            None
        } else {
            Some(parse_js_table(&weights, "Weights")?)
        };
        self.inner
            .create_cells(Some(adjacency.as_slice()), weights.as_deref())
            .map_err(to_js)
    }

    pub fn relax(&mut self) -> Result<(), JsValue> { self.inner.relax().map_err(to_js) }

    pub fn count_grids(&self, index: usize, resolution: f64) -> Result<usize, JsValue> {
        self.inner.count_grids(index, resolution).map_err(to_js)
    }

    /// Lattice points of one cell as a flat `[x0, y0, z0, x1, ...]` array.
    pub fn get_grids(&self, index: usize, resolution: f64) -> Result<Vec<f64>, JsValue> {
        let points = self.inner.get_grids(index, resolution).map_err(to_js)?;
        Ok(points.iter().flat_map(|p| p.to_array()).collect())
    }

    pub fn count_all_grids(&self, resolution: f64) -> Result<usize, JsValue> {
        self.inner.count_all_grids(resolution).map_err(to_js)
    }

    pub fn volume(&self, index: usize) -> Result<f64, JsValue> {
        Ok(self.inner.cell(index).map_err(to_js)?.volume())
    }

    #[wasm_bindgen(getter)]
    pub fn count_sites(&self) -> usize { self.inner.count_sites() }
    #[wasm_bindgen(getter)]
    pub fn count_cells(&self) -> usize { self.inner.count_cells() }
    #[wasm_bindgen(getter)]
    pub fn sites(&self) -> Vec<f64> { self.inner.sites().iter().flat_map(|p| p.to_array()).collect() }
}
