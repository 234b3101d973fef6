#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod drawable;
pub mod error;
pub mod event;
pub mod export;
pub mod glyph;
pub mod history;
pub mod input;
pub mod preview;
pub mod renderer;
pub mod session;
pub mod shared;
pub mod sketchpad;
pub mod stamp;
pub mod stroke;
pub mod surface;
pub mod tools;

pub use app::SketchApp;
pub use config::SketchConfig;
pub use drawable::Drawable;
pub use error::{ConfigError, ExportError};
pub use event::{EventBus, EventHandler, SketchEvent};
pub use export::ExportCompositor;
pub use history::HistoryLog;
pub use input::InputEvent;
pub use preview::Preview;
pub use renderer::{Frame, Renderer};
pub use session::{SessionController, SessionState};
pub use shared::SharedSketchpad;
pub use sketchpad::Sketchpad;
pub use stamp::Stamp;
pub use stroke::Stroke;
pub use surface::Surface;
pub use tools::{ActiveTool, MarkerTool, RotationSampler, StampChoice};
