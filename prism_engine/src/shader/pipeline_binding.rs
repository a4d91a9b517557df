//! Pipeline binding
//!
//! Owns the backend pipeline drawing one shader program into one framebuffer.
//! The pipeline is created on the first `bind` and recreated on the next
//! `bind` after a state change or a shader reload.
//!
//! A binding subscribes to the asset changed notification of its asset cache.
//! When a watched source changes the program is recompiled right away. If that
//! fails, the binding switches to the error shader and records the error in
//! the shared `ShaderDiagnostics`, which only ever holds the error currently
//! blocking the program; a later successful reload switches back and clears it.
//! Only use after dispose is returned as an error from `bind`.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::asset::{AssetChangedNotifier, ShaderAssetCache, SubscriptionKey};
use crate::engine::Engine;
use crate::engine_err;
use crate::error::{Error, Result};
use crate::graphics_device::{
    self, ColorBlendState, CommandList, DepthStencilState, Framebuffer, GraphicsDevice, Pipeline,
    PipelineDesc, PipelineState, PrimitiveTopology, RasterizationState, Texture,
};
use crate::shader::builtin::ErrorShader;
use crate::shader::diagnostics::ShaderDiagnostics;
use crate::shader::program::ShaderProgram;
use crate::shader::uniform::Color;

const SOURCE: &str = "prism::PipelineBinding";

// ============================================================================
// Shared state
// ============================================================================

/// Everything the asset changed callback touches
struct BindingState {
    program: ShaderProgram,
    error_program: ShaderProgram,
    pipeline: Option<Arc<dyn Pipeline>>,
    pipeline_state: PipelineState,
    default_state: PipelineState,
    dirty: bool,
    use_error_shader: bool,
    disposed: bool,
}

fn lock_state(state: &Mutex<BindingState>) -> MutexGuard<'_, BindingState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Asset name a failed load is recorded under
fn failed_asset(error: &Error, fallback: &str) -> String {
    match error {
        Error::ShaderCompilation { name, .. } => name.clone(),
        _ => fallback.to_string(),
    }
}

impl BindingState {
    fn active_program(&self) -> &ShaderProgram {
        if self.use_error_shader { &self.error_program } else { &self.program }
    }

    fn on_asset_changed(&mut self, diagnostics: &ShaderDiagnostics, name: &str) {
        if self.disposed {
            return;
        }

        if self.error_program.watches(name) {
            if let Err(e) = self.error_program.reload_shaders() {
                crate::engine_error!(SOURCE, "Error shader '{}' failed to reload: {}", self.error_program.name(), e);
            }
            if self.use_error_shader {
                self.dirty = true;
            }
        }

        if !self.program.watches(name) {
            return;
        }

        match self.program.reload_shaders() {
            Ok(_) => {
                for watched in self.program.shader_names_to_watch() {
                    diagnostics.clear(watched);
                }
                if self.use_error_shader {
                    crate::engine_info!(SOURCE, "'{}' compiles again, leaving the error shader", self.program.name());
                }
                self.use_error_shader = false;
            }
            Err(e) => {
                crate::engine_error!(SOURCE,
                    "Reloading '{}' after '{}' changed failed, falling back to the error shader: {}",
                    self.program.name(), name, e);
                let failed = failed_asset(&e, name);
                for watched in self.program.shader_names_to_watch() {
                    if *watched != failed {
                        diagnostics.clear(watched);
                    }
                }
                diagnostics.record(&failed, &e.to_string());
                self.use_error_shader = true;
            }
        }

        // Rebuilt on the next bind, never mid-frame
        self.dirty = true;
    }

    fn create_pipeline(
        &mut self,
        framebuffer: &Arc<dyn Framebuffer>,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
        diagnostics: &ShaderDiagnostics,
    ) -> Result<()> {
        if !self.use_error_shader {
            if let Err(e) = self.program.shaders() {
                crate::engine_error!(SOURCE,
                    "'{}' failed to load, falling back to the error shader: {}", self.program.name(), e);
                diagnostics.record(&failed_asset(&e, &self.program.descriptor().vertex), &e.to_string());
                self.use_error_shader = true;
            }
        }

        let program = if self.use_error_shader { &mut self.error_program } else { &mut self.program };
        let shaders = program.shaders()?;

        let desc = PipelineDesc {
            vertex_shader: shaders.vertex,
            fragment_shader: shaders.fragment,
            vertex_layout: program.vertex_layout(),
            resource_layouts: program.backend_resource_layouts(),
            state: self.pipeline_state,
            color_target_count: framebuffer.color_target_count(),
            has_depth_target: framebuffer.depth_target().is_some(),
        };
        let pipeline = graphics_device::lock_device(graphics_device)?.create_pipeline(desc)?;

        crate::engine_debug!(SOURCE, "Pipeline created for '{}'", program.name());

        self.pipeline = Some(pipeline);
        self.dirty = false;
        Ok(())
    }
}

// ============================================================================
// PipelineBinding
// ============================================================================

pub struct PipelineBinding {
    state: Arc<Mutex<BindingState>>,
    framebuffer: Arc<dyn Framebuffer>,
    graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
    notifier: Arc<AssetChangedNotifier>,
    subscription: Option<SubscriptionKey>,
    diagnostics: Arc<ShaderDiagnostics>,
}

impl PipelineBinding {
    /// Bind `program` to `framebuffer`, with the error shader named by the engine config
    ///
    /// # Errors
    ///
    /// Backend errors while creating the error shader's resource layouts.
    pub fn new(
        program: ShaderProgram,
        framebuffer: Arc<dyn Framebuffer>,
        assets: &Arc<ShaderAssetCache>,
        diagnostics: Arc<ShaderDiagnostics>,
    ) -> Result<Self> {
        let error_program = ShaderProgram::new(
            ErrorShader::from_config(&Engine::config()),
            program.graphics_device().clone(),
            assets.clone(),
        )?;
        Ok(Self::with_error_program(program, error_program, framebuffer, assets, diagnostics))
    }

    /// Bind `program` to `framebuffer`, falling back to `error_program`
    pub fn with_error_program(
        program: ShaderProgram,
        error_program: ShaderProgram,
        framebuffer: Arc<dyn Framebuffer>,
        assets: &Arc<ShaderAssetCache>,
        diagnostics: Arc<ShaderDiagnostics>,
    ) -> Self {
        let graphics_device = program.graphics_device().clone();
        let state = Arc::new(Mutex::new(BindingState {
            program,
            error_program,
            pipeline: None,
            pipeline_state: PipelineState::default(),
            default_state: PipelineState::default(),
            dirty: false,
            use_error_shader: false,
            disposed: false,
        }));

        let notifier = assets.notifier().clone();
        let weak_state = Arc::downgrade(&state);
        let callback_diagnostics = diagnostics.clone();
        let subscription = notifier.subscribe(move |name| {
            if let Some(state) = weak_state.upgrade() {
                lock_state(&state).on_asset_changed(&callback_diagnostics, name);
            }
        });

        Self {
            state,
            framebuffer,
            graphics_device,
            notifier,
            subscription: Some(subscription),
            diagnostics,
        }
    }

    fn state(&self) -> MutexGuard<'_, BindingState> {
        lock_state(&self.state)
    }

    // ===== BINDING =====

    /// Select the framebuffer and the pipeline on `cmd`
    ///
    /// Creates the pipeline first if none exists or the state is dirty. A
    /// shader that fails to load is replaced by the error shader, never
    /// reported here.
    ///
    /// # Errors
    ///
    /// `Error::Disposed` if this binding or its framebuffer was disposed, or a
    /// backend error.
    pub fn bind(&self, cmd: &mut dyn CommandList) -> Result<()> {
        let mut state = self.state();

        if state.disposed {
            crate::engine_error!(SOURCE, "bind called on disposed binding of '{}'", state.program.name());
            return Err(Error::Disposed(format!("PipelineBinding '{}'", state.program.name())));
        }
        if self.framebuffer.is_disposed() {
            crate::engine_error!(SOURCE, "bind called with a disposed framebuffer ('{}')", state.program.name());
            return Err(Error::Disposed(format!("Framebuffer of PipelineBinding '{}'", state.program.name())));
        }

        if state.pipeline.is_none() || state.dirty {
            state.create_pipeline(&self.framebuffer, &self.graphics_device, &self.diagnostics)?;
        }

        let pipeline = state.pipeline.clone()
            .ok_or_else(|| engine_err!(SOURCE, "No pipeline after creation for '{}'", state.program.name()))?;
        cmd.set_framebuffer(&self.framebuffer)?;
        cmd.set_pipeline(&pipeline)
    }

    /// Run the asset changed handling for `name` directly
    pub fn on_shader_asset_changed(&self, name: &str) {
        self.state().on_asset_changed(&self.diagnostics, name);
    }

    // ===== PIPELINE STATE =====

    /// Override parts of the fixed-function state; `None` keeps the current value
    pub fn set_pipeline_state(
        &self,
        color_blend: Option<ColorBlendState>,
        depth_stencil: Option<DepthStencilState>,
        rasterization: Option<RasterizationState>,
        topology: Option<PrimitiveTopology>,
    ) {
        let mut state = self.state();
        if let Some(color_blend) = color_blend {
            state.pipeline_state.color_blend = color_blend;
        }
        if let Some(depth_stencil) = depth_stencil {
            state.pipeline_state.depth_stencil = depth_stencil;
        }
        if let Some(rasterization) = rasterization {
            state.pipeline_state.rasterization = rasterization;
        }
        if let Some(topology) = topology {
            state.pipeline_state.topology = topology;
        }
        state.dirty = true;
    }

    /// Remember the current state as the one `reset_pipeline_state` restores
    pub fn set_default_pipeline_state(&self) {
        let mut state = self.state();
        state.default_state = state.pipeline_state;
    }

    /// Restore the remembered default state
    ///
    /// Uniform values are not affected.
    pub fn reset_pipeline_state(&self) {
        let mut state = self.state();
        if state.pipeline_state != state.default_state {
            state.pipeline_state = state.default_state;
            state.dirty = true;
        }
    }

    pub fn pipeline_state(&self) -> PipelineState {
        self.state().pipeline_state
    }

    /// A pipeline exists and matches the current state
    pub fn is_pipeline_current(&self) -> bool {
        let state = self.state();
        state.pipeline.is_some() && !state.dirty
    }

    // ===== CLEARING =====

    /// Clear color target `index`
    pub fn clear(&self, cmd: &mut dyn CommandList, color: Color, index: u32) -> Result<()> {
        cmd.clear_color_target(index, color.to_array())
    }

    /// Clear every color target
    pub fn clear_all(&self, cmd: &mut dyn CommandList, color: Color) -> Result<()> {
        for index in 0..self.framebuffer.color_target_count() {
            cmd.clear_color_target(index, color.to_array())?;
        }
        Ok(())
    }

    pub fn clear_depth(&self, cmd: &mut dyn CommandList, depth: f32) -> Result<()> {
        cmd.clear_depth_stencil(depth)
    }

    /// Record and submit a command list clearing every target
    pub fn clear_targets(&self, color: Color, depth: f32) -> Result<()> {
        let mut cmd = graphics_device::lock_device(&self.graphics_device)?.create_command_list()?;

        cmd.begin()?;
        self.bind(cmd.as_mut())?;
        self.clear_all(cmd.as_mut(), color)?;
        if self.framebuffer.depth_target().is_some() {
            self.clear_depth(cmd.as_mut(), depth)?;
        }
        cmd.end()?;

        graphics_device::lock_device(&self.graphics_device)?.submit(&[cmd.as_ref()])
    }

    // ===== ACCESSORS =====

    pub fn framebuffer(&self) -> &Arc<dyn Framebuffer> {
        &self.framebuffer
    }

    pub fn framebuffer_texture(&self, index: u32) -> Option<Arc<dyn Texture>> {
        self.framebuffer.color_target(index)
    }

    pub fn framebuffer_depth_texture(&self) -> Option<Arc<dyn Texture>> {
        self.framebuffer.depth_target()
    }

    /// Name of the program currently drawn with
    pub fn active_shader(&self) -> String {
        self.state().active_program().name().to_string()
    }

    pub fn is_using_error_shader(&self) -> bool {
        self.state().use_error_shader
    }

    /// Run `f` with the program currently drawn with, e.g. to create
    /// resource managers matching the active pipeline
    pub fn with_active_program<R>(&self, f: impl FnOnce(&ShaderProgram) -> R) -> R {
        f(self.state().active_program())
    }

    pub fn diagnostics(&self) -> &Arc<ShaderDiagnostics> {
        &self.diagnostics
    }

    // ===== LIFECYCLE =====

    /// Unsubscribe and release the pipeline and compiled stages. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(key) = self.subscription.take() {
            self.notifier.unsubscribe(key);
        }

        let mut state = self.state();
        if state.disposed {
            return;
        }
        state.disposed = true;
        state.pipeline = None;
        state.program.dispose();
        state.error_program.dispose();

        crate::engine_debug!(SOURCE, "Binding of '{}' disposed", state.program.name());
    }

    /// `dispose`, then dispose the framebuffer as well
    pub fn dispose_with_framebuffer(&mut self) {
        self.dispose();
        self.framebuffer.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.state().disposed
    }
}

impl Drop for PipelineBinding {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "pipeline_binding_tests.rs"]
mod tests;
