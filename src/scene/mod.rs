pub mod camera;
pub mod graph;
pub mod lighting;
pub mod mesh;
pub mod renderer;
pub mod world;

pub use world::DriveScene;
