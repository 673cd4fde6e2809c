pub mod camera;
pub mod config;
pub mod depth;
pub mod driver;
pub mod grid;
pub mod host;
pub mod output;
pub mod scene;
