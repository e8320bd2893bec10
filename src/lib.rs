#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod color;
pub mod components;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod panels;
pub mod persistence;
pub mod renderer;
pub mod session;
pub mod state;
pub mod status;
pub mod stroke;
pub mod tools;
pub mod util;

pub use app::PaintApp;
pub use canvas::{Canvas, Surface};
pub use config::CanvasConfig;
pub use error::{PaintError, PaintResult};
pub use input::{InputEvent, InputLocation};
pub use renderer::Renderer;
pub use session::{LoadOutcome, PaintSession};
pub use state::EditorState;
pub use stroke::{Point, StrokeEvent, StrokeStore};
pub use tools::{ToolControls, ToolKind, ToolState};
