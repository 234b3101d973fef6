use crate::config::SketchConfig;
use crate::error::{ConfigError, ExportError};
use crate::event::{EventHandler, SketchEvent};
use crate::export::ExportCompositor;
use crate::input::InputEvent;
use crate::renderer::{Frame, Renderer};
use crate::session::SessionController;
use crate::surface::Surface;
use crate::tools::RotationSampler;

/// The drawing core wired together: session controller, on-screen surface,
/// render pipeline and export compositor.
///
/// After every input the queued notifications are drained in order; each one
/// repaints the surface from the fully applied state and is then passed on to
/// subscribed handlers.
#[derive(Debug)]
pub struct Sketchpad {
    controller: SessionController,
    surface: Surface,
    renderer: Renderer,
    compositor: ExportCompositor,
    revision: u64,
}

impl Sketchpad {
    /// Validate `config` and build a sketchpad with its first marker preset selected
    pub fn new(config: &SketchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut controller = SessionController::new();
        if let Some((_, marker)) = config.marker_tools()?.into_iter().next() {
            controller = controller.with_marker(marker);
        }

        let renderer = Renderer::new(config.background_color(), config.ink_color());
        let mut surface = Surface::new(config.canvas_width, config.canvas_height).ok_or(
            ConfigError::InvalidCanvasSize {
                width: config.canvas_width,
                height: config.canvas_height,
            },
        )?;
        renderer.repaint(&mut surface, &Frame::default());
        Ok(Self {
            controller,
            surface,
            renderer,
            compositor: ExportCompositor::new(
                config.canvas_width,
                config.canvas_height,
                config.export_scale,
            ),
            revision: 0,
        })
    }

    pub fn with_rotation_sampler(mut self, sampler: RotationSampler) -> Self {
        self.controller = self.controller.with_rotation_sampler(sampler);
        self
    }

    /// Apply one input. Returns the encoded PNG for [`InputEvent::Export`], `None` otherwise.
    pub fn handle(&mut self, input: InputEvent) -> Result<Option<Vec<u8>>, ExportError> {
        if let InputEvent::Export = input {
            return self.export_png().map(Some);
        }

        self.controller.handle(input);
        self.flush();
        Ok(None)
    }

    fn flush(&mut self) {
        for event in self.controller.take_events() {
            self.repaint();
            self.controller.bus().notify(event);
        }
    }

    fn repaint(&mut self) {
        let frame = Frame {
            committed: self.controller.history().snapshot(),
            in_progress: self.controller.in_progress(),
            preview: self.controller.preview(),
        };
        self.renderer.repaint(&mut self.surface, &frame);
        self.revision += 1;
    }

    /// Register a handler that is notified after each repaint
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.controller.bus().subscribe(handler);
    }

    /// Register a closure that is notified after each repaint
    pub fn on_event(&self, handler: impl FnMut(&SketchEvent) + Send + 'static) {
        self.subscribe(Box::new(handler));
    }

    /// Committed drawing at export scale, ignoring the in-progress stroke and preview
    pub fn export_surface(&self) -> Result<Surface, ExportError> {
        self.compositor
            .compose(&self.renderer, self.controller.history().snapshot())
    }

    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        self.compositor
            .export_png(&self.renderer, self.controller.history().snapshot())
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Number of repaints so far; changes whenever the surface may have changed
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
