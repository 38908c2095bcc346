pub mod projection;
pub mod renderer;
pub mod road;

pub use renderer::ComboRoad;
