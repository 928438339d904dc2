pub const DEFAULT_PORT: u16 = 3003;

// storage layout
pub const IMAGES_PREFIX: &str = "images";
pub const DEFAULT_S3_ENDPOINT: &str = "https://storage.googleapis.com";
pub const DEFAULT_S3_REGION: &str = "auto";
pub const DEFAULT_PUBLIC_STORAGE_HOST: &str = "storage.googleapis.com";

// transcoding
pub const DEFAULT_MAX_WIDTH: u32 = 1440;
pub const DEFAULT_JPEG_QUALITY: u8 = 80;
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";
// 1440 x ~69k; upscaling a thin strip must not allocate unbounded memory
pub const MAX_OUTPUT_PIXELS: u64 = 100_000_000;
// JPEG stores each dimension in 16 bits
pub const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

// request limits
pub const TWENTY_MB: usize = 20 * 1024 * 1024;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = TWENTY_MB;
// headroom for multipart boundaries and the other form fields
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 3600;

pub const UPLOAD_FIELD_NAME: &str = "image";
