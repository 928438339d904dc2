use crate::core::error::PipelineError;
use crate::utils::constants::{
    DEFAULT_JPEG_QUALITY, DEFAULT_MAX_WIDTH, JPEG_CONTENT_TYPE, MAX_JPEG_DIMENSION,
    MAX_OUTPUT_PIXELS,
};
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Output shape of every upload. JPEG is the only output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeSpec {
    pub max_width: u32,
    pub quality: u8,
}

impl Default for TranscodeSpec {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranscodedImage {
    pub bytes: Bytes,
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Target dimensions for a source image: width is always `max_width`
/// (narrower sources are upscaled), height keeps the aspect ratio.
pub fn target_dimensions(src_w: u32, src_h: u32, max_width: u32) -> (u32, u32) {
    let height = (src_h as f64 * max_width as f64 / src_w as f64).round() as u32;
    (max_width, height.max(1))
}

pub fn decode_image(data: &[u8]) -> Result<DynamicImage, PipelineError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| PipelineError::UnprocessableImage(image::ImageError::IoError(e)))?
        .decode()
        .map_err(PipelineError::UnprocessableImage)
}

pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    // JPEG has no alpha channel
    img.to_rgb8()
        .write_with_encoder(encoder)
        .map_err(PipelineError::Encode)?;
    Ok(buf.into_inner())
}

/// Decode, resize and re-encode synchronously. CPU bound; call through [`Transcoder`].
pub fn transcode_blocking(data: &[u8], spec: &TranscodeSpec) -> Result<TranscodedImage, PipelineError> {
    let img = decode_image(data)?;
    let (width, height) = target_dimensions(img.width(), img.height(), spec.max_width);
    if width > MAX_JPEG_DIMENSION
        || height > MAX_JPEG_DIMENSION
        || width as u64 * height as u64 > MAX_OUTPUT_PIXELS
    {
        return Err(PipelineError::ResolutionTooLarge { width, height });
    }
    let resized = img.resize_exact(width, height, FilterType::Triangle);
    let bytes = encode_jpeg(&resized, spec.quality)?;

    Ok(TranscodedImage {
        bytes: Bytes::from(bytes),
        content_type: JPEG_CONTENT_TYPE,
        width,
        height,
    })
}

/// Runs transcodes on the blocking pool, at most `concurrency` at a time.
#[derive(Clone)]
pub struct Transcoder {
    spec: TranscodeSpec,
    permits: Arc<Semaphore>,
}

impl Transcoder {
    pub fn new(spec: TranscodeSpec, concurrency: usize) -> Self {
        Self {
            spec,
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    pub async fn transcode(&self, data: Bytes) -> Result<TranscodedImage, PipelineError> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| PipelineError::Worker(e.to_string()))?;

        let spec = self.spec;
        let start = std::time::Instant::now();
        let input_bytes = data.len();

        let result = tokio::task::spawn_blocking(move || {
            // released when the worker finishes
            let _permit = permit;
            transcode_blocking(&data, &spec)
        })
        .await
        .map_err(|e| PipelineError::Worker(e.to_string()))??;

        tracing::info!(
            input_bytes,
            output_bytes = result.bytes.len(),
            width = result.width,
            height = result.height,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "image transcoded"
        );

        Ok(result)
    }
}

#[cfg(test)]
pub(crate) fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 200])
    }));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}
