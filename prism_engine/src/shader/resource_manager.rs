//! Shader resource manager
//!
//! Owns the named uniforms and the named texture/sampler bindings one
//! resource layout needs, per shader stage. Uniforms are packed into one
//! buffer per stage; the buffers and the resource set are created lazily on
//! the first `bind` and rebuilt only when the schema or a bound resource
//! changes.
//!
//! Content errors (unknown names, duplicate declarations, type or size
//! mismatches, unset textures) are logged and the call is rejected, leaving
//! the manager unchanged. Only backend failures and use after dispose are
//! returned as errors.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::graphics_device::{
    self, Buffer, BufferDesc, BufferUsage, CommandList, GraphicsDevice, ResourceBinding,
    ResourceKind, ResourceSet, ResourceSetDesc, Sampler, ShaderStage, ShaderStages, Texture,
};
use crate::shader::layout::{sampler_name, ShaderResourceLayout};
use crate::shader::registry::{RegistryKey, SharedRegistry};
use crate::shader::uniform::{Uniform, UniformElement, UniformType, UniformValue};

const SOURCE: &str = "prism::ShaderResourceManager";

static NEXT_MANAGER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a resource manager, unique for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceManagerId(u64);

impl ResourceManagerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Expected type and stage of a uniform the shader declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformValidator {
    pub ty: UniformType,
    pub stage: ShaderStage,
}

impl UniformValidator {
    pub fn of<T: Uniform>(stage: ShaderStage) -> Self {
        Self { ty: T::uniform_type(), stage }
    }
}

/// Uniform name to expected type/stage
pub type UniformValidators = FxHashMap<String, UniformValidator>;

// ============================================================================
// Entries
// ============================================================================

/// A declared uniform
#[derive(Debug, Clone, PartialEq)]
pub struct UniformEntry {
    name: String,
    ty: UniformType,
    array_length: u32,
    offset: u64,
    size: u64,
    value: UniformValue,
}

impl UniformEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> UniformType {
        self.ty
    }

    /// Element count, 0 for scalars
    pub fn array_length(&self) -> u32 {
        self.array_length
    }

    /// Byte offset in the stage buffer
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Packed byte size, fixed at declaration
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn value(&self) -> &UniformValue {
        &self.value
    }
}

/// A texture or sampler bound by name
#[derive(Clone)]
pub enum BindableResource {
    Texture(Arc<dyn Texture>),
    Sampler(Arc<dyn Sampler>),
}

impl BindableResource {
    fn kind(&self) -> ResourceKind {
        match self {
            BindableResource::Texture(_) => ResourceKind::Texture,
            BindableResource::Sampler(_) => ResourceKind::Sampler,
        }
    }
}

struct BindableEntry {
    kind: ResourceKind,
    resource: Option<BindableResource>,
}

/// Everything one shader stage owns
#[derive(Default)]
struct StageResources {
    uniforms: Vec<UniformEntry>,
    uniform_index: FxHashMap<String, usize>,
    next_offset: u64,
    bindables: Vec<BindableEntry>,
    bindable_index: FxHashMap<String, usize>,
    buffer: Option<Arc<dyn Buffer>>,
}

impl StageResources {
    fn is_declared(&self, name: &str) -> bool {
        self.uniform_index.contains_key(name) || self.bindable_index.contains_key(name)
    }

    fn uniform(&self, name: &str) -> Option<&UniformEntry> {
        self.uniform_index.get(name).map(|&i| &self.uniforms[i])
    }

    fn bindable(&self, name: &str) -> Option<&BindableEntry> {
        self.bindable_index.get(name).map(|&i| &self.bindables[i])
    }

    /// Packed contents of every uniform, in offset order
    fn packed_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.next_offset as usize);
        for entry in &self.uniforms {
            entry.value.write_packed(&mut bytes);
        }
        bytes
    }
}

// ============================================================================
// ShaderResourceManager
// ============================================================================

/// Uniforms, textures and samplers for one resource layout
pub struct ShaderResourceManager {
    id: ResourceManagerId,
    name: String,
    graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
    layout: Arc<ShaderResourceLayout>,
    validators: Option<UniformValidators>,
    validate: bool,
    vertex: StageResources,
    fragment: StageResources,
    resource_set: Option<Arc<dyn ResourceSet>>,
    /// Buffers have been created at least once
    buffers_created: bool,
    /// A declaration was added after buffer creation: rebuild buffers and set
    schema_dirty: bool,
    /// A bound texture/sampler changed: rebuild the set only
    set_dirty: bool,
    disposed: bool,
    registration: Option<(SharedRegistry, RegistryKey)>,
}

impl ShaderResourceManager {
    /// Create an empty manager for `layout`
    ///
    /// Validation of declarations follows `Config::validate_uniforms` and only
    /// applies once validators are attached.
    pub fn new(
        name: &str,
        graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
        layout: Arc<ShaderResourceLayout>,
    ) -> Self {
        Self {
            id: ResourceManagerId::next(),
            name: name.to_string(),
            graphics_device,
            layout,
            validators: None,
            validate: Engine::config().validate_uniforms,
            vertex: StageResources::default(),
            fragment: StageResources::default(),
            resource_set: None,
            buffers_created: false,
            schema_dirty: false,
            set_dirty: false,
            disposed: false,
            registration: None,
        }
    }

    /// Check every uniform declaration against `validators`
    pub fn with_validators(mut self, validators: UniformValidators) -> Self {
        self.validators = Some(validators);
        self
    }

    pub fn set_validation_enabled(&mut self, enabled: bool) {
        self.validate = enabled;
    }

    /// Add this manager to `registry`; it is removed again on dispose
    pub fn register(&mut self, registry: &SharedRegistry) {
        if self.registration.is_some() {
            return;
        }
        match registry.lock() {
            Ok(mut lock) => {
                let key = lock.register(self.id, &self.name);
                self.registration = Some((registry.clone(), key));
            }
            Err(_) => crate::engine_error!(SOURCE, "Registry lock poisoned, '{}' not registered", self.name),
        }
    }

    pub fn id(&self) -> ResourceManagerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &Arc<ShaderResourceLayout> {
        &self.layout
    }

    pub fn registry_key(&self) -> Option<RegistryKey> {
        self.registration.as_ref().map(|(_, key)| *key)
    }

    fn stage(&self, stage: ShaderStage) -> &StageResources {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    fn stage_mut(&mut self, stage: ShaderStage) -> &mut StageResources {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        }
    }

    fn reject_if_disposed(&self, operation: &str, name: &str) -> bool {
        if self.disposed {
            crate::engine_error!(SOURCE, "{} '{}' on disposed manager '{}'", operation, name, self.name);
        }
        self.disposed
    }

    // ===== DECLARATION =====

    /// Declare a scalar uniform with a default value
    pub fn assign<T: Uniform>(&mut self, name: &str, stage: ShaderStage) -> bool {
        self.assign_value(name, stage, T::default())
    }

    /// Declare a scalar uniform with an initial value
    pub fn assign_value<T: Uniform>(&mut self, name: &str, stage: ShaderStage, value: T) -> bool {
        let value = value.into_value();
        if value.array_len().is_some() {
            crate::engine_error!(SOURCE, "Uniform '{}': use assign_array to declare arrays", name);
            return false;
        }
        self.declare_uniform(name, value.uniform_type(), 0, stage, value)
    }

    /// Declare an array uniform of `length` elements, initially all default
    pub fn assign_array<T: UniformElement>(&mut self, name: &str, length: u32, stage: ShaderStage) -> bool {
        if length == 0 {
            crate::engine_error!(SOURCE, "Array uniform '{}' must have at least one element", name);
            return false;
        }
        let ty = UniformType::array(T::KIND);
        self.declare_uniform(name, ty, length, stage, UniformValue::default_for(ty, length))
    }

    fn declare_uniform(
        &mut self,
        name: &str,
        ty: UniformType,
        array_length: u32,
        stage: ShaderStage,
        value: UniformValue,
    ) -> bool {
        if self.reject_if_disposed("assign", name) {
            return false;
        }

        // ========== VALIDATION ==========
        if self.stage(stage).is_declared(name) {
            crate::engine_error!(SOURCE,
                "Tried to assign '{}' in {:?} stage of '{}', but it is already assigned", name, stage, self.name);
            return false;
        }
        if !self.layout_has_uniform_buffer(stage) {
            crate::engine_error!(SOURCE,
                "Tried to assign uniform '{}' in {:?} stage of '{}', but its layout has no uniform buffer for that stage",
                name, stage, self.name);
            return false;
        }
        if !self.passes_validator(name, ty, stage) {
            return false;
        }

        let size = ty.packed_size(array_length);
        let stage_resources = self.stage_mut(stage);
        let offset = stage_resources.next_offset;
        stage_resources.next_offset += size;
        stage_resources.uniform_index.insert(name.to_string(), stage_resources.uniforms.len());
        stage_resources.uniforms.push(UniformEntry {
            name: name.to_string(),
            ty,
            array_length,
            offset,
            size,
            value,
        });

        if self.buffers_created {
            self.schema_dirty = true;
        }

        crate::engine_trace!(SOURCE, "'{}' assigned {} {} ({:?}) at offset {} size {}",
            self.name, ty, name, stage, offset, size);
        true
    }

    fn layout_has_uniform_buffer(&self, stage: ShaderStage) -> bool {
        self.layout
            .elements()
            .iter()
            .any(|element| element.kind == ResourceKind::UniformBuffer && element.stages.contains_stage(stage))
    }

    fn passes_validator(&self, name: &str, ty: UniformType, stage: ShaderStage) -> bool {
        let Some(validators) = self.validators.as_ref().filter(|_| self.validate) else {
            return true;
        };
        match validators.get(name) {
            None => {
                crate::engine_error!(SOURCE,
                    "Uniform '{}' is not declared by the shader of '{}'", name, self.name);
                false
            }
            Some(expected) if expected.ty != ty || expected.stage != stage => {
                crate::engine_error!(SOURCE,
                    "Uniform '{}' of '{}' must be {} in {:?} stage, got {} in {:?} stage",
                    name, self.name, expected.ty, expected.stage, ty, stage);
                false
            }
            Some(_) => true,
        }
    }

    /// Declare a texture slot
    pub fn assign_texture(&mut self, name: &str, stage: ShaderStage) -> bool {
        self.declare_bindable(name, ResourceKind::Texture, stage)
    }

    /// Declare a sampler slot
    pub fn assign_sampler(&mut self, name: &str, stage: ShaderStage) -> bool {
        self.declare_bindable(name, ResourceKind::Sampler, stage)
    }

    /// Declare texture `name` and sampler `name` + "Sampler"
    pub fn assign_texture_and_sampler(&mut self, name: &str, stage: ShaderStage) -> bool {
        let texture = self.assign_texture(name, stage);
        let sampler = self.assign_sampler(&sampler_name(name), stage);
        texture && sampler
    }

    fn declare_bindable(&mut self, name: &str, kind: ResourceKind, stage: ShaderStage) -> bool {
        if self.reject_if_disposed("assign", name) {
            return false;
        }
        if self.stage(stage).is_declared(name) {
            crate::engine_error!(SOURCE,
                "Tried to assign {:?} '{}' in {:?} stage of '{}', but it is already assigned", kind, name, stage, self.name);
            return false;
        }
        match self.layout.element(name) {
            None => {
                crate::engine_error!(SOURCE,
                    "Tried to assign {:?} '{}' in '{}', but its layout has no binding of that name", kind, name, self.name);
                return false;
            }
            Some((_, element)) if element.kind != kind || !element.stages.contains_stage(stage) => {
                crate::engine_error!(SOURCE,
                    "Tried to assign {:?} '{}' in {:?} stage of '{}', but the layout declares it as {:?} for {:?}",
                    kind, name, stage, self.name, element.kind, element.stages);
                return false;
            }
            Some(_) => {}
        }

        let stage_resources = self.stage_mut(stage);
        stage_resources.bindable_index.insert(name.to_string(), stage_resources.bindables.len());
        stage_resources.bindables.push(BindableEntry {
            kind,
            resource: None,
        });
        self.set_dirty = true;
        true
    }

    // ===== VALUES =====

    /// Replace the value of an assigned uniform
    ///
    /// Once buffers exist the entry's byte range is uploaded immediately,
    /// through `cmd` when given, otherwise directly. Before the first bind the
    /// value is only stored and uploaded with everything else at creation.
    /// Arrays must keep their declared length.
    pub fn set<T: Uniform>(
        &mut self,
        name: &str,
        value: T,
        stage: ShaderStage,
        cmd: Option<&mut dyn CommandList>,
    ) -> bool {
        if self.reject_if_disposed("set", name) {
            return false;
        }

        let value = value.into_value();
        let manager_name = &self.name;
        let stage_resources = self.stage(stage);

        // ========== VALIDATION ==========
        let Some(&index) = stage_resources.uniform_index.get(name) else {
            crate::engine_error!(SOURCE,
                "Tried to set uniform '{}' in {:?} stage of '{}', but it was never assigned", name, stage, manager_name);
            return false;
        };
        let entry = &stage_resources.uniforms[index];
        if value.uniform_type() != entry.ty {
            crate::engine_error!(SOURCE,
                "Uniform '{}' of '{}' is {}, cannot set a {}", name, manager_name, entry.ty, value.uniform_type());
            return false;
        }
        if value.packed_size() != entry.size {
            crate::engine_error!(SOURCE,
                "Uniform '{}' of '{}' holds {} bytes, got {} bytes. Resizing is an invalid operation",
                name, manager_name, entry.size, value.packed_size());
            return false;
        }

        let offset = entry.offset;
        let bytes = value.to_packed_bytes();
        let buffer = stage_resources.buffer.clone();
        self.stage_mut(stage).uniforms[index].value = value;

        if let Some(buffer) = buffer {
            let uploaded = match cmd {
                Some(cmd) => cmd.update_buffer(&buffer, offset, &bytes),
                None => buffer.update(offset, &bytes),
            };
            if let Err(e) = uploaded {
                crate::engine_error!(SOURCE, "Upload of '{}' in '{}' failed: {}", name, self.name, e);
                // Force a full re-upload on the next bind
                self.schema_dirty = true;
            }
        }
        true
    }

    /// Bind a texture to an assigned texture slot
    pub fn set_texture(&mut self, name: &str, texture: Arc<dyn Texture>, stage: ShaderStage) -> bool {
        self.set_bindable(name, BindableResource::Texture(texture), stage)
    }

    /// Bind a sampler to an assigned sampler slot
    pub fn set_sampler(&mut self, name: &str, sampler: Arc<dyn Sampler>, stage: ShaderStage) -> bool {
        self.set_bindable(name, BindableResource::Sampler(sampler), stage)
    }

    /// Bind texture `name` and sampler `name` + "Sampler"
    pub fn set_texture_and_sampler(
        &mut self,
        name: &str,
        texture: Arc<dyn Texture>,
        sampler: Arc<dyn Sampler>,
        stage: ShaderStage,
    ) -> bool {
        let texture = self.set_texture(name, texture, stage);
        let sampler = self.set_sampler(&sampler_name(name), sampler, stage);
        texture && sampler
    }

    fn set_bindable(&mut self, name: &str, resource: BindableResource, stage: ShaderStage) -> bool {
        if self.reject_if_disposed("set", name) {
            return false;
        }

        let Some(&index) = self.stage(stage).bindable_index.get(name) else {
            crate::engine_error!(SOURCE,
                "Tried to set {:?} '{}' in {:?} stage of '{}', but it was never assigned",
                resource.kind(), name, stage, self.name);
            return false;
        };

        let entry = &mut self.stage_mut(stage).bindables[index];
        if entry.kind != resource.kind() {
            let declared = entry.kind;
            crate::engine_error!(SOURCE, "'{}' is declared as {:?}, cannot set a {:?}", name, declared, resource.kind());
            return false;
        }
        entry.resource = Some(resource);
        self.set_dirty = true;
        true
    }

    /// Last value set, or the type's default when unassigned or of another type
    pub fn get<T: Uniform>(&self, name: &str, stage: ShaderStage) -> T {
        self.stage(stage)
            .uniform(name)
            .and_then(|entry| T::from_value(&entry.value))
            .unwrap_or_default()
    }

    /// Texture currently bound to `name`
    pub fn texture(&self, name: &str, stage: ShaderStage) -> Option<Arc<dyn Texture>> {
        match self.stage(stage).bindable(name)?.resource.as_ref()? {
            BindableResource::Texture(texture) => Some(texture.clone()),
            BindableResource::Sampler(_) => None,
        }
    }

    /// Sampler currently bound to `name`
    pub fn sampler(&self, name: &str, stage: ShaderStage) -> Option<Arc<dyn Sampler>> {
        match self.stage(stage).bindable(name)?.resource.as_ref()? {
            BindableResource::Sampler(sampler) => Some(sampler.clone()),
            BindableResource::Texture(_) => None,
        }
    }

    pub fn uniform(&self, name: &str, stage: ShaderStage) -> Option<&UniformEntry> {
        self.stage(stage).uniform(name)
    }

    /// Declared uniforms of `stage`, in offset order
    pub fn uniforms(&self, stage: ShaderStage) -> &[UniformEntry] {
        &self.stage(stage).uniforms
    }

    /// Total packed size of `stage`'s uniforms
    pub fn buffer_size(&self, stage: ShaderStage) -> u64 {
        self.stage(stage).next_offset
    }

    pub fn is_schema_dirty(&self) -> bool {
        self.schema_dirty
    }

    pub fn is_set_dirty(&self) -> bool {
        self.set_dirty
    }

    // ===== BINDING =====

    /// Attach this manager's resource set to `cmd` at `slot`
    ///
    /// Creates buffers on first use (uploading every value), then creates the
    /// resource set if none exists or a binding changed. If a declared texture
    /// or sampler has never been set, set creation is skipped and logged and
    /// the previous set, if any, stays attached.
    ///
    /// # Errors
    ///
    /// `Error::Disposed` after dispose, or a backend error.
    pub fn bind(&mut self, cmd: &mut dyn CommandList, slot: u32) -> Result<()> {
        if self.disposed {
            crate::engine_error!(SOURCE, "bind called on disposed manager '{}'", self.name);
            return Err(Error::Disposed(self.to_string()));
        }

        if !self.buffers_created || self.schema_dirty {
            self.create_buffers()?;
        }
        if self.resource_set.is_none() || self.set_dirty {
            self.create_resource_set()?;
        }

        match &self.resource_set {
            Some(set) => cmd.set_resource_set(slot, set),
            None => {
                crate::engine_warn!(SOURCE, "'{}' has no resource set to bind at slot {}", self.name, slot);
                Ok(())
            }
        }
    }

    fn create_buffers(&mut self) -> Result<()> {
        for stage in ShaderStage::ALL {
            let buffer = self.build_buffer(stage)?;
            if let Some(buffer) = &buffer {
                buffer.update(0, &self.stage(stage).packed_bytes())?;
            }
            self.stage_mut(stage).buffer = buffer;
        }

        self.buffers_created = true;
        self.schema_dirty = false;
        self.set_dirty = true;

        crate::engine_debug!(SOURCE, "'{}' buffers created (vertex {} bytes, fragment {} bytes)",
            self.name, self.vertex.next_offset, self.fragment.next_offset);
        Ok(())
    }

    /// A stage without uniforms has no buffer
    fn build_buffer(&self, stage: ShaderStage) -> Result<Option<Arc<dyn Buffer>>> {
        let resources = self.stage(stage);
        if resources.uniforms.is_empty() {
            return Ok(None);
        }

        let buffer = graphics_device::lock_device(&self.graphics_device)?.create_buffer(BufferDesc {
            name: format!("{}:{:?}", self.name, stage),
            size: resources.next_offset,
            usage: BufferUsage::Uniform,
        })?;
        Ok(Some(buffer))
    }

    fn uniform_buffer_for(&self, stages: ShaderStages) -> Option<Arc<dyn Buffer>> {
        let vertex = stages.contains_stage(ShaderStage::Vertex).then(|| self.vertex.buffer.clone()).flatten();
        vertex.or_else(|| stages.contains_stage(ShaderStage::Fragment).then(|| self.fragment.buffer.clone()).flatten())
    }

    fn bindable_for(&self, name: &str, stages: ShaderStages) -> Option<&BindableEntry> {
        ShaderStage::ALL
            .into_iter()
            .filter(|stage| stages.contains_stage(*stage))
            .find_map(|stage| self.stage(stage).bindable(name))
    }

    fn create_resource_set(&mut self) -> Result<()> {
        let mut bindings = Vec::with_capacity(self.layout.len());
        let mut unbound = Vec::new();

        for element in self.layout.elements() {
            let binding = match element.kind {
                ResourceKind::UniformBuffer => {
                    if element.stages.contains(ShaderStages::VERTEX_FRAGMENT)
                        && self.vertex.buffer.is_some()
                        && self.fragment.buffer.is_some()
                    {
                        crate::engine_error!(SOURCE,
                            "Uniform buffer '{}' of '{}' spans both stages but both stages have uniforms. Only the vertex buffer is bound",
                            element.name, self.name);
                    }
                    self.uniform_buffer_for(element.stages).map(ResourceBinding::UniformBuffer)
                }
                ResourceKind::Texture | ResourceKind::Sampler => {
                    match self.bindable_for(&element.name, element.stages).and_then(|e| e.resource.clone()) {
                        Some(BindableResource::Texture(t)) if element.kind == ResourceKind::Texture => Some(ResourceBinding::Texture(t)),
                        Some(BindableResource::Sampler(s)) if element.kind == ResourceKind::Sampler => Some(ResourceBinding::Sampler(s)),
                        _ => None,
                    }
                }
            };
            match binding {
                Some(binding) => bindings.push(binding),
                None => unbound.push(element.name.as_str()),
            }
        }

        if !unbound.is_empty() {
            crate::engine_error!(SOURCE,
                "Tried to create a resource set for '{}' with unbound resource(s) {:?}. They were assigned but never set",
                self.name, unbound);
            return Ok(());
        }

        let set = graphics_device::lock_device(&self.graphics_device)?.create_resource_set(ResourceSetDesc {
            layout: self.layout.backend().clone(),
            bindings,
        })?;
        self.resource_set = Some(set);
        self.set_dirty = false;
        Ok(())
    }

    // ===== LIFECYCLE =====

    /// Release buffers and the resource set and leave the registry. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.vertex.buffer = None;
        self.fragment.buffer = None;
        self.resource_set = None;

        if let Some((registry, key)) = self.registration.take() {
            if let Ok(mut lock) = registry.lock() {
                lock.unregister(key);
            }
        }

        crate::engine_debug!(SOURCE, "'{}' disposed", self.name);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for ShaderResourceManager {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Display for ShaderResourceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource Manager '{}' (disposed: {})", self.name, self.disposed)
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
