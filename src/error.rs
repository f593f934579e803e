//! Error types for aquasplash.
//!
//! [`SplashError`] covers the animation core (generation, progress values and
//! configuration). [`GpuError`] and [`ViewerError`] cover the paint loop.

/// Errors raised by the animation core.
#[derive(Debug, thiserror::Error)]
pub enum SplashError {
    /// A generation count or controller duration was out of contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A progress value outside `[0, 1]` (or NaN) was supplied.
    #[error("Invalid progress {0}: expected a value in [0, 1]")]
    InvalidProgress(f32),
    /// A configuration preset failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Failed to read a configuration file.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse a configuration file.
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// The adapter reports no usable format for the window surface.
    #[error("The GPU adapter cannot present to this window")]
    UnsupportedSurface,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors that can occur when running the viewer.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Failed to create event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The splash configuration was rejected.
    #[error(transparent)]
    Config(#[from] SplashError),
}
