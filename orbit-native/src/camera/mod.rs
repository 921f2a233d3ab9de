mod uniform;

pub use uniform::CameraUniform;
