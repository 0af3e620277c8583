//! Platform layer
//!
//! Browser glue for:
//! - Held keys (`keyboard`, plain Rust so it runs under `cargo test`)
//! - The modal dialog (`dialog`, wasm only)

pub mod keyboard;

#[cfg(target_arch = "wasm32")]
pub mod dialog;

pub use keyboard::KeyState;

#[cfg(target_arch = "wasm32")]
pub use dialog::DomDialog;
