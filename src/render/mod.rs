pub mod canvas;
pub mod console;
pub mod palette;
pub mod pipeline;
pub mod renderer;

pub use canvas::{Canvas, CanvasError, TerminalCanvas};
pub use console::ConsoleBuffer;
pub use palette::Palette;
pub use pipeline::{
    CharacterRepainter, Cropper, FullBoardCropper, ObservationPipeline, Repainter, WindowCropper,
};
pub use renderer::{BOARD_GUTTER, Renderer, Screen, format_score};
