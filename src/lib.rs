pub mod cli;
pub mod config;
pub mod drivers;
pub mod fixup;
pub mod hid;
pub mod udev;
