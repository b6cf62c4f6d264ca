use snafu::Snafu;

pub type Result<T, E = RenderError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum StateError {
    #[snafu(display("No suitable graphics adapter was found"))]
    Adapter { source: wgpu::RequestAdapterError },

    #[snafu(display("The graphics device could not be acquired"))]
    Device { source: wgpu::RequestDeviceError },

    #[snafu(display("The window surface could not be created"))]
    CreateSurface { source: wgpu::CreateSurfaceError },

    #[snafu(display("The surface reports no usable texture formats"))]
    IncompatibleSurface,
}

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum RenderError {
    #[snafu(display("Failed to set up the graphics state"))]
    State { source: StateError },

    #[snafu(display("Couldn't acquire a surface texture"))]
    Surface { source: wgpu::SurfaceError },
}
