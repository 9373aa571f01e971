pub mod settings;
pub mod view;

pub use settings::{RenderSettings, RenderTuning};
pub use view::View;
