mod demo;
mod grid;
mod pyramid;

pub use demo::create_demo_scene;
pub use grid::{create_spread_strip, create_triangle_grid};
pub use pyramid::create_pyramid_object;
