//! Error types
//!
//! Gameplay itself never fails; only loading a configuration and booting the
//! browser build can.

use thiserror::Error;

/// A configuration document could not be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown variant `{0}` (expected `classic` or `wide`)")]
    UnknownVariant(String),

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("canvas width {width} is narrower than one {tile}px lane")]
    NoLanes { width: u32, tile: f32 },

    #[error("key binding for {0} is empty")]
    EmptyKey(&'static str),
}

/// Fatal start-up failures of the browser build
#[derive(Debug, Error)]
pub enum BootError {
    #[error("no global window")]
    NoWindow,

    #[error("no document on window")]
    NoDocument,

    #[error("element #{0} not found")]
    MissingElement(&'static str),

    #[error("element #{0} has the wrong type")]
    WrongElementType(&'static str),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("surface is not compatible with the adapter")]
    IncompatibleSurface,

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
