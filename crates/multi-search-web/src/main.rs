//! Multi-Search web dashboard
//!
//! One query box, one tile per engine of the selected profile.

mod app;
mod components;
mod download;
mod logging;
mod storage;

fn main() {
    logging::init();
    yew::Renderer::<app::App>::new().render();
}
