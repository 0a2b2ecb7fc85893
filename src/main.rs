mod bridge;
mod components;
mod constants;
mod error;
mod model;
mod platform;
mod state;
mod util;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    yew::Renderer::<App>::new().render();
}
