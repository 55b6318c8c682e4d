/// PortalRenderer — produces one composited frame per call.
///
/// Frame sequence:
/// 1. restore the write-mask baseline and clear color, depth and stencil
/// 2. with the stencil test on, run the view composer for every portal of
///    the current scene that has a resolvable destination, in scene order
/// 3. stencil test off, clear depth
/// 4. depth-only pre-pass with every portal shape, so portal surfaces
///    occlude the scene behind them
/// 5. draw the scene content plus the shapes of portals that were not
///    rendered through (they appear as ordinary opaque surfaces)
///
/// Depth is not cleared between portals: where silhouettes overlap, the
/// nearer destination content wins, and a later portal wins ties.

use crate::camera::{Camera, CameraSnapshot};
use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ClearFlags};
use crate::portal::{PortalViewComposer, StageObserver, STENCIL_MASK_ALL};
use crate::scene::{DrawItem, WorldRegistry};
use crate::{engine_bail, engine_debug, engine_error, engine_info, engine_trace, engine_warn};
use super::renderer_config::{RendererConfig, FrameStats, FrameStatus};

/// Per-frame scratch state, reused across frames.
#[derive(Default)]
pub struct FrameContext {
    /// Camera state captured at the start of the frame
    pub snapshot: Option<CameraSnapshot>,
    /// Counters for the frame in progress
    pub stats: FrameStats,
    batch: Vec<DrawItem>,
    shape: Vec<DrawItem>,
    opaque_portals: Vec<usize>,
}

impl FrameContext {
    fn begin(&mut self, snapshot: CameraSnapshot) {
        self.snapshot = Some(snapshot);
        self.stats = FrameStats::default();
        self.batch.clear();
        self.shape.clear();
        self.opaque_portals.clear();
    }
}

pub struct PortalRenderer<D: GraphicsDevice> {
    config: RendererConfig,
    device: Option<D>,
    composer: PortalViewComposer,
    context: FrameContext,
    logical_size: Option<(u32, u32)>,
}

impl<D: GraphicsDevice> PortalRenderer<D> {
    pub fn new(config: RendererConfig) -> Self {
        let composer = PortalViewComposer::new(config.stencil_reference);
        Self {
            config,
            device: None,
            composer,
            context: FrameContext::default(),
            logical_size: None,
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    // ===== LIFECYCLE =====

    /// Take ownership of a device. A size set before `init` is applied now.
    ///
    /// # Errors
    ///
    /// Returns an error if a device is already attached, or if the device
    /// rejects the initial state.
    pub fn init(&mut self, mut device: D) -> Result<()> {
        if self.device.is_some() {
            engine_bail!("portal3d::PortalRenderer", "Renderer already initialized");
        }
        if self.config.stencil_reference == 0 {
            return Err(Error::InitializationFailed(
                "stencil_reference must be non-zero".to_string()));
        }

        device.set_clear_color(self.config.clear_color)?;
        if let Some((width, height)) = self.logical_size {
            let (w, h) = self.config.physical_size(width, height);
            device.resize(w, h)?;
        }

        let (w, h) = device.size();
        engine_info!("portal3d::PortalRenderer", "Initialized ({}x{})", w, h);
        self.device = Some(device);
        Ok(())
    }

    /// Release the device. `render` becomes a no-op again.
    pub fn shutdown(&mut self) -> Option<D> {
        self.device.take()
    }

    pub fn is_ready(&self) -> bool {
        self.device.is_some()
    }

    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }

    pub fn device_mut(&mut self) -> Option<&mut D> {
        self.device.as_mut()
    }

    /// Observe the view composer stages (testing / diagnostics).
    pub fn set_stage_observer(&mut self, observer: Option<StageObserver>) {
        self.composer.set_stage_observer(observer);
    }

    /// Context of the last frame
    pub fn frame_context(&self) -> &FrameContext {
        &self.context
    }

    // ===== SIZE =====

    /// Record the logical drawable size and resize the device.
    ///
    /// Never draws. Before `init` the size is only recorded.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.logical_size = Some((width, height));
        let (w, h) = self.config.physical_size(width, height);
        if let Some(device) = self.device.as_mut() {
            device.resize(w, h)?;
            engine_debug!("portal3d::PortalRenderer", "Resized to {}x{} ({}x{} logical)", w, h, width, height);
        }
        Ok(())
    }

    /// Last logical size passed to `set_size`
    pub fn logical_size(&self) -> Option<(u32, u32)> {
        self.logical_size
    }

    // ===== FRAME =====

    /// Render `current_scene` as seen by `camera`.
    ///
    /// The camera's matrices are updated (if auto-update is on) and are
    /// identical to that state on return.
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if `current_scene` is not in the registry;
    /// device errors are propagated. A device error while composing a
    /// portal view leaves the stencil test off and color and depth writes on.
    pub fn render(
        &mut self,
        registry: &WorldRegistry,
        current_scene: &str,
        camera: &mut Camera,
    ) -> Result<FrameStatus> {
        let Self { config, device, composer, context, .. } = self;

        let Some(device) = device.as_mut() else {
            engine_trace!("portal3d::PortalRenderer", "No device, frame skipped");
            return Ok(FrameStatus::NotReady);
        };

        let Some(scene) = registry.scene(current_scene) else {
            engine_error!("portal3d::PortalRenderer", "Scene '{}' not found", current_scene);
            return Err(Error::InvalidResource(format!("Scene '{}' not found", current_scene)));
        };

        camera.update_matrix_world();
        let snapshot = CameraSnapshot::capture(camera);
        context.begin(snapshot);
        context.stats.portals_in_scene = scene.portal_count() as u32;

        // Baseline and full clear
        device.set_color_write(true)?;
        device.set_depth_write(true)?;
        device.set_stencil_write_mask(STENCIL_MASK_ALL)?;
        device.clear(ClearFlags::all())?;

        device.set_stencil_test(true)?;
        device.set_stencil_write_mask(STENCIL_MASK_ALL)?;

        // Views through portals
        let frustum = camera.frustum();
        for (index, portal) in scene.portals().iter().enumerate() {
            let Some(target) = portal.destination_ref().and_then(|r| registry.resolve(&r)) else {
                engine_debug!("portal3d::PortalRenderer", "Portal '{}' unresolved", portal.name());
                context.stats.portals_unresolved += 1;
                context.opaque_portals.push(index);
                continue;
            };

            if config.cull_offscreen_portals && !frustum.intersects_aabb(&portal.world_bounds()) {
                context.stats.portals_culled += 1;
                continue;
            }

            context.shape.clear();
            portal.shape().extend_transformed_into(portal.matrix(), &mut context.shape);

            match composer.compose(device, camera, &snapshot, portal, &context.shape, target) {
                Ok(()) => {
                    context.stats.portals_rendered += 1;
                    context.stats.draw_calls += 2;
                }
                Err(Error::SingularMatrix) => {
                    engine_warn!("portal3d::PortalRenderer",
                        "Portal '{}' skipped: singular transform", portal.name());
                    context.stats.portals_singular += 1;
                    context.opaque_portals.push(index);
                }
                Err(Error::DegenerateProjection) => {
                    engine_warn!("portal3d::PortalRenderer",
                        "Portal '{}' skipped: degenerate projection", portal.name());
                    context.stats.portals_degenerate += 1;
                    context.opaque_portals.push(index);
                }
                Err(e) => {
                    if let Err(cleanup) = restore_baseline(device) {
                        engine_warn!("portal3d::PortalRenderer",
                            "Baseline not restored after failed portal '{}': {}", portal.name(), cleanup);
                    }
                    return Err(e);
                }
            }
        }

        device.set_stencil_test(false)?;
        device.clear(ClearFlags::DEPTH)?;

        // Depth pre-pass: portal shapes occlude what lies behind them
        context.batch.clear();
        for portal in scene.portals() {
            portal.shape().extend_transformed_into(portal.matrix(), &mut context.batch);
        }
        if !context.batch.is_empty() {
            device.set_color_write(false)?;
            device.set_depth_write(true)?;
            device.draw(&context.batch, camera.world_inverse(), camera.projection())?;
            context.stats.draw_calls += 1;
        }
        device.set_color_write(true)?;

        // Scene content and portals drawn as plain surfaces
        context.batch.clear();
        context.batch.extend_from_slice(scene.content().items());
        for &index in &context.opaque_portals {
            if let Some(portal) = scene.portal(index) {
                portal.shape().extend_transformed_into(portal.matrix(), &mut context.batch);
            }
        }
        device.draw(&context.batch, camera.world_inverse(), camera.projection())?;
        context.stats.draw_calls += 1;

        engine_trace!("portal3d::PortalRenderer", "Frame done: {:?}", context.stats);
        Ok(FrameStatus::Rendered(context.stats))
    }
}

/// Stencil test off, color and depth writes on.
fn restore_baseline<D: GraphicsDevice>(device: &mut D) -> Result<()> {
    device.set_stencil_test(false)?;
    device.set_color_write(true)?;
    device.set_depth_write(true)
}

#[cfg(test)]
#[path = "portal_renderer_tests.rs"]
mod tests;
