//! Tidekeeper library - a breathing sea with a raft and a robot on it

pub mod avatar;
pub mod camera;
pub mod caption;
pub mod cli;
pub mod controller;
pub mod followers;
pub mod input;
pub mod ocean;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod shapes;
pub mod timer;
