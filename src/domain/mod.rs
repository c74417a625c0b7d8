pub mod downscaler;
pub mod input_source;
pub mod resize_params;
pub mod upload_variants;

// --- public re-exports ---
pub use downscaler::{target_dimensions, DownscaleError, Downscaler, EncodedImage};
pub use resize_params::{BoundingBox, ConfigError, Quality, ResampleFilter, ResizeTarget};
pub use upload_variants::{prepare_upload, UploadPresets, UploadVariants};
