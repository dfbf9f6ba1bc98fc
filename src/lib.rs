#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Geometry engine for a parametric family of seashell surfaces.
//!
//! [`shell`] holds the surface function, mesh generation, similarity scoring and
//! the guessing game. [`geom`] holds the generic mesh plumbing underneath. The
//! browser front end talks to [`ShellEngine`] (sandbox) and [`GameSession`]
//! (game) through `wasm-bindgen`.

pub mod geom;
pub mod shell;

use std::fmt;

use geom::{GeomContext, GeomMeshDiagnostics, ScaleRule};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use shell::{
    GameRound, Mismatch, ParameterError, ShellMesh, ShellMeshOptions, ShellParameter,
    ShellParameters, ShellPreset, shell_mesh_with_context,
};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not start rayon thread pool: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Mesh buffers handed to the renderer, flattened for typed arrays.
#[derive(Debug, Serialize)]
struct MeshExport<'a> {
    positions: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    normals: Option<&'a [f64]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uvs: Option<&'a [f64]>,
    indices: &'a [u32],
    wireframe: &'a [u32],
    diagnostics: DiagnosticsExport<'a>,
}

#[derive(Debug, Serialize)]
struct DiagnosticsExport<'a> {
    summary: String,
    degenerate_points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied_scale: Option<f64>,
    warnings: &'a [String],
}

impl<'a> MeshExport<'a> {
    fn new(mesh: &'a ShellMesh, diagnostics: &'a GeomMeshDiagnostics) -> Self {
        Self {
            positions: mesh.surface.positions_flat(),
            normals: mesh.surface.normals_flat(),
            uvs: mesh.surface.uvs_flat(),
            indices: &mesh.surface.indices,
            wireframe: &mesh.wireframe,
            diagnostics: DiagnosticsExport {
                summary: diagnostics.summary(),
                degenerate_points: diagnostics.degenerate_point_count,
                applied_scale: diagnostics.applied_scale,
                warnings: &diagnostics.warnings,
            },
        }
    }
}

/// Sandbox entry point: one editable shell and its mesh.
#[wasm_bindgen]
pub struct ShellEngine {
    params: ShellParameters,
    options: ShellMeshOptions,
    ctx: GeomContext,
    mesh: Option<(ShellMesh, GeomMeshDiagnostics)>,
}

#[wasm_bindgen]
impl ShellEngine {
    /// Starts with `shell1` at the default density.
    #[wasm_bindgen(constructor)]
    pub fn new() -> ShellEngine {
        ShellEngine {
            params: ShellParameters::preset(ShellPreset::Shell1),
            options: ShellMeshOptions::default(),
            ctx: GeomContext::new(),
            mesh: None,
        }
    }

    #[wasm_bindgen]
    pub fn set_divisions(&mut self, divisions: u32) {
        let divisions = divisions.max(1) as usize;
        if self.options.divisions != divisions {
            self.options.divisions = divisions;
            self.mesh = None;
        }
    }

    /// Accepts `largest` or `z`.
    #[wasm_bindgen]
    pub fn set_scale_rule(&mut self, rule: &str) -> Result<(), JsValue> {
        let rule: ScaleRule = rule.parse().map_err(|err: String| js_error(&err))?;
        if self.options.scale_rule != rule {
            self.options.scale_rule = rule;
            self.mesh = None;
        }
        Ok(())
    }

    #[wasm_bindgen]
    pub fn load_preset(&mut self, name: &str) -> Result<(), JsValue> {
        let preset: ShellPreset = name.parse().map_err(to_js_error)?;
        self.store_parameters(ShellParameters::preset(preset));
        Ok(())
    }

    /// Draws a new random shell. A seed makes the draw reproducible.
    #[wasm_bindgen]
    pub fn randomize(&mut self, seed: Option<u64>) {
        let params = match seed {
            Some(seed) => ShellParameters::random_with(&mut StdRng::seed_from_u64(seed)),
            None => ShellParameters::random(),
        };
        self.store_parameters(params);
    }

    #[wasm_bindgen]
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        let param: ShellParameter = name.parse().map_err(to_js_error)?;
        self.update_parameter(param, value).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn get_parameters(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.params).map_err(|err| JsError::new(&err.to_string()).into())
    }

    #[wasm_bindgen]
    pub fn set_parameters(&mut self, value: JsValue) -> Result<(), JsValue> {
        let params: ShellParameters = serde_wasm_bindgen::from_value(value)
            .map_err(|err| JsError::new(&err.to_string()))?;
        self.replace_parameters(params).map_err(to_js_error)
    }

    /// Regenerates the mesh if anything changed since the last call.
    #[wasm_bindgen]
    pub fn generate(&mut self) {
        let _ = self.ensure_mesh();
    }

    #[wasm_bindgen]
    pub fn positions(&mut self) -> Vec<f64> {
        self.ensure_mesh().0.surface.positions_flat().to_vec()
    }

    #[wasm_bindgen]
    pub fn normals(&mut self) -> Vec<f64> {
        self.ensure_mesh()
            .0
            .surface
            .normals_flat()
            .map(<[f64]>::to_vec)
            .unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn indices(&mut self) -> Vec<u32> {
        self.ensure_mesh().0.surface.indices.clone()
    }

    #[wasm_bindgen]
    pub fn wireframe(&mut self) -> Vec<u32> {
        self.ensure_mesh().0.wireframe.clone()
    }

    /// All buffers plus diagnostics in one object.
    #[wasm_bindgen]
    pub fn get_mesh(&mut self) -> Result<JsValue, JsValue> {
        let (mesh, diagnostics) = self.ensure_mesh();
        serde_wasm_bindgen::to_value(&MeshExport::new(mesh, diagnostics))
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    #[wasm_bindgen]
    pub fn diagnostics_summary(&mut self) -> String {
        self.ensure_mesh().1.summary()
    }
}

impl Default for ShellEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellEngine {
    #[must_use]
    pub fn parameters(&self) -> ShellParameters {
        self.params
    }

    /// Typed counterpart of [`set_parameter`](Self::set_parameter). No range check.
    pub fn update_parameter(&mut self, param: ShellParameter, value: f64) -> Result<(), ParameterError> {
        self.params.set(param, value)?;
        self.mesh = None;
        Ok(())
    }

    /// Swaps in a whole parameter set. Non-finite fields are rejected and leave the
    /// current shell untouched.
    pub fn replace_parameters(&mut self, params: ShellParameters) -> Result<(), ParameterError> {
        params.validate()?;
        self.store_parameters(params);
        Ok(())
    }

    fn store_parameters(&mut self, params: ShellParameters) {
        self.params = params;
        self.mesh = None;
    }

    /// Current mesh, generating it first when stale.
    pub fn mesh(&mut self) -> (&ShellMesh, &GeomMeshDiagnostics) {
        self.ensure_mesh()
    }

    /// Whether the next read will regenerate.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.mesh.is_none()
    }

    #[must_use]
    pub fn context(&self) -> &GeomContext {
        &self.ctx
    }

    fn ensure_mesh(&mut self) -> (&ShellMesh, &GeomMeshDiagnostics) {
        let (mesh, diagnostics) = self.mesh.get_or_insert_with(|| {
            let generated = shell_mesh_with_context(&self.params, &self.options, &mut self.ctx);
            debug_log!("generated {}: {}", self.params, generated.1.summary());
            generated
        });
        (&*mesh, &*diagnostics)
    }
}

/// Game entry point: a target shell and the player's guess.
#[wasm_bindgen]
pub struct GameSession {
    round: GameRound,
    options: ShellMeshOptions,
    ctx: GeomContext,
}

#[wasm_bindgen]
impl GameSession {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> GameSession {
        GameSession {
            round: new_round(seed),
            options: ShellMeshOptions::default(),
            ctx: GeomContext::new(),
        }
    }

    #[wasm_bindgen]
    pub fn new_round(&mut self, seed: Option<u64>) {
        self.round = new_round(seed);
    }

    #[wasm_bindgen]
    pub fn set_divisions(&mut self, divisions: u32) {
        self.options.divisions = divisions.max(1) as usize;
    }

    /// Moves one guess slider. Returns the stored (clamped) value.
    #[wasm_bindgen]
    pub fn set_guess(&mut self, name: &str, value: f64) -> Result<f64, JsValue> {
        let param: ShellParameter = name.parse().map_err(to_js_error)?;
        self.round.set_guess(param, value).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn is_won(&self) -> bool {
        self.round.is_won()
    }

    #[wasm_bindgen]
    pub fn distance(&self) -> f64 {
        self.round.distance()
    }

    #[wasm_bindgen]
    pub fn guess_parameters(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.round.guess())
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    #[wasm_bindgen]
    pub fn target_parameters(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.round.target())
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    #[wasm_bindgen]
    pub fn guess_mesh(&mut self) -> Result<JsValue, JsValue> {
        let params = *self.round.guess();
        self.mesh_value(&params)
    }

    #[wasm_bindgen]
    pub fn target_mesh(&mut self) -> Result<JsValue, JsValue> {
        let params = *self.round.target();
        self.mesh_value(&params)
    }

    /// First out-of-tolerance parameter, or `null` when the guess wins.
    #[wasm_bindgen]
    pub fn mismatch(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.round.mismatch())
            .map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl GameSession {
    #[must_use]
    pub fn round(&self) -> &GameRound {
        &self.round
    }

    #[must_use]
    pub fn current_mismatch(&self) -> Option<Mismatch> {
        self.round.mismatch()
    }

    /// Meshes the guess with the session's options and cache.
    pub fn guess_shell_mesh(&mut self) -> (ShellMesh, GeomMeshDiagnostics) {
        shell_mesh_with_context(self.round.guess(), &self.options, &mut self.ctx)
    }

    pub fn target_shell_mesh(&mut self) -> (ShellMesh, GeomMeshDiagnostics) {
        shell_mesh_with_context(self.round.target(), &self.options, &mut self.ctx)
    }

    fn mesh_value(&mut self, params: &ShellParameters) -> Result<JsValue, JsValue> {
        let (mesh, diagnostics) = shell_mesh_with_context(params, &self.options, &mut self.ctx);
        serde_wasm_bindgen::to_value(&MeshExport::new(&mesh, &diagnostics))
            .map_err(|err| JsError::new(&err.to_string()).into())
    }
}

fn new_round(seed: Option<u64>) -> GameRound {
    match seed {
        Some(seed) => GameRound::new_with(&mut StdRng::seed_from_u64(seed)),
        None => GameRound::new(),
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
