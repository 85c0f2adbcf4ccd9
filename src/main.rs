//! Sticker Board Frontend Entry Point

mod app;
mod components;
mod context;
mod persistence;
mod probe;
mod storage;
mod ui_state;

use app::App;
use leptos::prelude::*;

/// Replays the last log lines after the panic message, so the console shows
/// what the board was doing when it died
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        console_error_panic_hook::hook(info);
        let lines = rolling_logger::recent_lines();
        web_sys::console::error_1(&format!("last {} log line(s):\n{}", lines.len(), lines.join("\n")).into());
    }));
}

fn main() {
    install_panic_hook();
    if let Err(err) = rolling_logger::init_logger("StickerBoard", log::LevelFilter::Debug, 500) {
        web_sys::console::warn_1(&format!("logger already installed: {}", err).into());
    }
    mount_to_body(App);
}
