//! Status line presentation: rotate and marquee modes.

mod display_engine;
mod display_model;
mod format;
mod marquee;
mod sink;

pub use display_engine::DisplayEngine;
pub use display_model::{DisplayMode, RenderOutput, StyledRun, TextColor};
pub use format::{loading_text, quote_color, quote_text, render_rotate};
pub use marquee::MarqueeBuffer;
pub use sink::{MockRenderSink, RenderSink};
