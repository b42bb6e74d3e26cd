pub mod animation;
pub mod color;
pub mod config;
pub mod emulator;
pub mod error;
pub mod layout;
pub mod led_spiral;
pub mod location;
pub mod poller;
pub mod presets;
pub mod server;
pub mod strip;
