//! Unit tests for PipelineBinding
//!
//! Shader sources live in a MemoryShaderLoader; a source containing `#error`
//! fails to compile on the MockGraphicsDevice.

use super::*;
use crate::asset::MemoryShaderLoader;
use crate::frame_lock::FrameLock;
use crate::graphics_device::mock_graphics_device::{MockCommandList, MockFramebuffer, MockGraphicsDevice};
use crate::graphics_device::{CullMode, BlendFactor};
use crate::shader::builtin::Generic2dShader;

static FRAME_LOCK: FrameLock = FrameLock::new();

const GOOD_FRAGMENT: &str = "//fragment\nvoid main() {}\n";
const BROKEN_FRAGMENT: &str = "//fragment\n#error missing semicolon\n";

struct Fixture {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    pipelines: Arc<Mutex<Vec<String>>>,
    submitted: Arc<Mutex<Vec<String>>>,
    sources: Arc<MemoryShaderLoader>,
    assets: Arc<ShaderAssetCache>,
    diagnostics: Arc<ShaderDiagnostics>,
}

impl Fixture {
    fn new() -> Self {
        let device = MockGraphicsDevice::new();
        let pipelines = device.created_pipelines.clone();
        let submitted = device.submitted.clone();
        let sources = Arc::new(
            MemoryShaderLoader::new()
                .with_source("vertex_generic_2d", "//vertex\nvoid main() {}\n")
                .with_source("frag_generic", GOOD_FRAGMENT)
                .with_source("vertex_error", "//vertex\nvoid main() {}\n")
                .with_source("frag_error", "//fragment\nvoid main() {}\n"),
        );
        let assets = ShaderAssetCache::with_frame_lock(sources.clone(), &FRAME_LOCK);
        Self {
            device: Arc::new(Mutex::new(device)),
            pipelines,
            submitted,
            sources,
            assets,
            diagnostics: Arc::new(ShaderDiagnostics::new()),
        }
    }

    fn binding_with(&self, framebuffer: Arc<dyn Framebuffer>) -> PipelineBinding {
        let program = ShaderProgram::new(Generic2dShader, self.device.clone(), self.assets.clone()).unwrap();
        let error_program = ShaderProgram::new(ErrorShader::default(), self.device.clone(), self.assets.clone()).unwrap();
        PipelineBinding::with_error_program(program, error_program, framebuffer, &self.assets, self.diagnostics.clone())
    }

    fn binding(&self) -> PipelineBinding {
        self.binding_with(Arc::new(MockFramebuffer::new(1, true)))
    }

    fn pipelines(&self) -> Vec<String> {
        self.pipelines.lock().unwrap().clone()
    }

    /// Edit a source and report the change like the file watcher would
    fn change_source(&self, name: &str, text: &str) {
        self.sources.insert(name, text);
        self.assets.source_changed(name);
    }
}

// ============================================================================
// BIND
// ============================================================================

#[test]
fn test_bind_creates_pipeline_lazily_once() {
    let fx = Fixture::new();
    let binding = fx.binding();
    assert!(fx.pipelines().is_empty());
    assert!(!binding.is_pipeline_current());

    let mut cmd = MockCommandList::new();
    binding.bind(&mut cmd).unwrap();
    binding.bind(&mut cmd).unwrap();

    assert_eq!(fx.pipelines(), vec!["vertex_generic_2d+frag_generic"]);
    assert_eq!(cmd.commands, vec!["set_framebuffer", "set_pipeline", "set_framebuffer", "set_pipeline"]);
    assert!(binding.is_pipeline_current());
    assert_eq!(binding.active_shader(), "Generic2D");
}

#[test]
fn test_default_pipeline_state() {
    let fx = Fixture::new();
    let state = fx.binding().pipeline_state();

    assert_eq!(state.color_blend, ColorBlendState::ALPHA_BLEND);
    assert_eq!(state.depth_stencil, DepthStencilState::DISABLED);
    assert_eq!(state.rasterization, RasterizationState::default());
    assert_eq!(state.topology, PrimitiveTopology::TriangleList);
}

#[test]
fn test_state_change_rebuilds_on_next_bind() {
    let fx = Fixture::new();
    let binding = fx.binding();
    let mut cmd = MockCommandList::new();
    binding.bind(&mut cmd).unwrap();

    binding.set_pipeline_state(None, Some(DepthStencilState::LESS_EQUAL_WRITE), None, None);
    assert!(!binding.is_pipeline_current());
    assert_eq!(binding.pipeline_state().color_blend, ColorBlendState::ALPHA_BLEND);
    assert_eq!(fx.pipelines().len(), 1);

    binding.bind(&mut cmd).unwrap();
    assert_eq!(fx.pipelines().len(), 2);
    assert_eq!(binding.pipeline_state().depth_stencil, DepthStencilState::LESS_EQUAL_WRITE);
}

#[test]
fn test_reset_restores_default_state() {
    let fx = Fixture::new();
    let binding = fx.binding();
    let additive = ColorBlendState::ADDITIVE;

    binding.set_pipeline_state(Some(additive), None, None, None);
    binding.set_default_pipeline_state();

    let no_cull = RasterizationState { cull_mode: CullMode::None, ..RasterizationState::default() };
    binding.set_pipeline_state(None, None, Some(no_cull), Some(PrimitiveTopology::LineList));
    binding.reset_pipeline_state();

    let state = binding.pipeline_state();
    assert_eq!(state.color_blend.dst_color_factor, BlendFactor::One);
    assert_eq!(state.rasterization.cull_mode, CullMode::Back);
    assert_eq!(state.topology, PrimitiveTopology::TriangleList);
}

// ============================================================================
// HOT RELOAD
// ============================================================================

#[test]
fn test_reload_failure_falls_back_and_recovers() {
    let fx = Fixture::new();
    let binding = fx.binding();
    let mut cmd = MockCommandList::new();
    binding.bind(&mut cmd).unwrap();

    // Broken edit: error shader, error recorded, rebuild deferred to bind
    fx.change_source("frag_generic", BROKEN_FRAGMENT);
    assert!(binding.is_using_error_shader());
    assert_eq!(binding.active_shader(), "Error");
    let error = fx.diagnostics.error("frag_generic").unwrap();
    assert!(!error.is_empty());
    assert_eq!(fx.pipelines().len(), 1);

    binding.bind(&mut cmd).unwrap();
    assert_eq!(fx.pipelines().last().unwrap(), "vertex_error+frag_error");

    // Fixed edit: original shader restored on the next bind
    fx.change_source("frag_generic", GOOD_FRAGMENT);
    assert!(!binding.is_using_error_shader());
    assert!(fx.diagnostics.is_empty());

    binding.bind(&mut cmd).unwrap();
    assert_eq!(fx.pipelines().last().unwrap(), "vertex_generic_2d+frag_generic");
    assert_eq!(fx.pipelines().len(), 3);
}

#[test]
fn test_fixed_stage_error_is_cleared_while_other_stage_fails() {
    let fx = Fixture::new();
    let binding = fx.binding();
    let broken_vertex = "//vertex\n#error missing semicolon\n";

    fx.change_source("vertex_generic_2d", broken_vertex);
    fx.change_source("frag_generic", BROKEN_FRAGMENT);
    assert!(fx.diagnostics.error("vertex_generic_2d").is_some());

    // Vertex compiles again, the fragment now blocks the program
    fx.change_source("vertex_generic_2d", "//vertex\nvoid main() {}\n");
    assert!(binding.is_using_error_shader());
    let errors = fx.diagnostics.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, "frag_generic");
    assert!(fx.diagnostics.error("vertex_generic_2d").is_none());

    fx.change_source("frag_generic", GOOD_FRAGMENT);
    assert!(!binding.is_using_error_shader());
    assert!(fx.diagnostics.is_empty());
}

#[test]
fn test_unwatched_asset_is_ignored() {
    let fx = Fixture::new();
    let binding = fx.binding();
    let mut cmd = MockCommandList::new();
    binding.bind(&mut cmd).unwrap();

    fx.change_source("frag_litgeneric", BROKEN_FRAGMENT);

    assert!(binding.is_pipeline_current());
    assert!(!binding.is_using_error_shader());
    assert!(fx.diagnostics.is_empty());
}

#[test]
fn test_successful_reload_marks_pipeline_dirty() {
    let fx = Fixture::new();
    let binding = fx.binding();
    let mut cmd = MockCommandList::new();
    binding.bind(&mut cmd).unwrap();

    fx.change_source("vertex_generic_2d", "//vertex\n// tweaked\n");
    assert!(!binding.is_pipeline_current());

    binding.bind(&mut cmd).unwrap();
    assert_eq!(fx.pipelines(), vec!["vertex_generic_2d+frag_generic", "vertex_generic_2d+frag_generic"]);
}

#[test]
fn test_initial_load_failure_uses_error_shader() {
    let fx = Fixture::new();
    fx.sources.insert("frag_generic", BROKEN_FRAGMENT);
    let binding = fx.binding();

    let mut cmd = MockCommandList::new();
    binding.bind(&mut cmd).unwrap();

    assert!(binding.is_using_error_shader());
    assert_eq!(fx.pipelines(), vec!["vertex_error+frag_error"]);
    assert!(fx.diagnostics.error("frag_generic").is_some());
    assert_eq!(binding.with_active_program(|program| program.resource_layouts().len()), 1);
}

#[test]
fn test_direct_change_notification() {
    let fx = Fixture::new();
    let binding = fx.binding();
    fx.sources.insert("frag_generic", BROKEN_FRAGMENT);
    fx.assets.unload("frag_generic");

    binding.on_shader_asset_changed("frag_generic");
    assert!(binding.is_using_error_shader());
}

// ============================================================================
// CLEARING / FRAMEBUFFER
// ============================================================================

#[test]
fn test_clear_commands() {
    let fx = Fixture::new();
    let binding = fx.binding_with(Arc::new(MockFramebuffer::new(3, true)));
    let mut cmd = MockCommandList::new();

    binding.clear(&mut cmd, Color::BLACK, 1).unwrap();
    binding.clear_all(&mut cmd, Color::CLEAR).unwrap();
    binding.clear_depth(&mut cmd, 1.0).unwrap();

    assert_eq!(cmd.commands, vec!["clear_color:1", "clear_color:0", "clear_color:1", "clear_color:2", "clear_depth:1"]);
}

#[test]
fn test_clear_targets_submits_one_list() {
    let fx = Fixture::new();
    let binding = fx.binding();
    binding.clear_targets(Color::BLACK, 1.0).unwrap();

    assert_eq!(*fx.submitted.lock().unwrap(), vec!["1".to_string()]);
    assert_eq!(fx.pipelines().len(), 1);
}

#[test]
fn test_framebuffer_textures() {
    let fx = Fixture::new();
    let binding = fx.binding_with(Arc::new(MockFramebuffer::new(2, false)));

    assert_eq!(binding.framebuffer_texture(1).unwrap().info().width, 64);
    assert!(binding.framebuffer_texture(2).is_none());
    assert!(binding.framebuffer_depth_texture().is_none());
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn test_dispose_is_idempotent_and_unsubscribes() {
    let fx = Fixture::new();
    let mut binding = fx.binding();
    assert_eq!(fx.assets.notifier().len(), 1);

    binding.dispose();
    binding.dispose();
    assert!(binding.is_disposed());
    assert!(fx.assets.notifier().is_empty());

    let mut cmd = MockCommandList::new();
    assert!(matches!(binding.bind(&mut cmd), Err(Error::Disposed(_))));
    assert!(cmd.commands.is_empty());
}

#[test]
fn test_disposed_framebuffer_fails_bind() {
    let fx = Fixture::new();
    let framebuffer: Arc<dyn Framebuffer> = Arc::new(MockFramebuffer::new(1, false));
    let mut binding = fx.binding_with(framebuffer.clone());

    framebuffer.dispose();
    let mut cmd = MockCommandList::new();
    assert!(matches!(binding.bind(&mut cmd), Err(Error::Disposed(_))));

    binding.dispose_with_framebuffer();
    assert!(binding.framebuffer().is_disposed());
}

#[test]
fn test_drop_unsubscribes() {
    let fx = Fixture::new();
    {
        let _binding = fx.binding();
        assert_eq!(fx.assets.notifier().len(), 1);
    }
    assert!(fx.assets.notifier().is_empty());
    fx.assets.source_changed("frag_generic");
}
