pub mod about;
pub mod button;
pub mod frames_grid;
pub mod settings;
