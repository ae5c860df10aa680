use crate::refs::{ObjectReferences, RefType};
use crate::PDFError;
use image::{ColorType, DynamicImage, GenericImageView};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::{Path, PathBuf};

pub enum ImageSource {
    /// Baseline RGB JPEG data can go into the PDF as-is; it is re-read when the document
    /// is written
    DirectlyEmbeddableJpeg(PathBuf),
    /// Anything else is decoded and written as deflated RGB (plus an alpha mask)
    Raster(DynamicImage),
}

/// A raster image that can be placed on pages. Like fonts, images are stored in the
/// [Document](crate::Document) and referred to by id, so one image can be drawn many times.
pub struct Image {
    pub source: ImageSource,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load a PNG or JPEG from disk
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, PDFError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let format = image::guess_format(&data)?;
        let image = image::load_from_memory_with_format(&data, format)?;

        match (format, image.color()) {
            (image::ImageFormat::Jpeg, ColorType::Rgb8) => {
                let (width, height) = image.dimensions();
                Ok(Image {
                    source: ImageSource::DirectlyEmbeddableJpeg(path.to_owned()),
                    width: width as f32,
                    height: height as f32,
                })
            }
            _ => Ok(Self::new_raster(image)),
        }
    }

    pub fn new_raster(image: DynamicImage) -> Image {
        let (width, height) = image.dimensions();
        Image {
            source: ImageSource::Raster(image),
            width: width as f32,
            height: height as f32,
        }
    }

    /// Height over width, which is what scaling to a fixed width needs
    pub fn aspect_ratio(&self) -> f32 {
        if self.width > 0.0 {
            self.height / self.width
        } else {
            1.0
        }
    }

    fn encode(&self) -> Result<EncodeOutput, PDFError> {
        match &self.source {
            ImageSource::DirectlyEmbeddableJpeg(path) => {
                let bytes = std::fs::read(path)?;
                Ok(EncodeOutput {
                    filter: Filter::DctDecode,
                    bytes,
                    mask: None,
                })
            }
            ImageSource::Raster(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                Ok(EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                })
            }
        }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode()?;

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dot.png");
        RgbImage::from_pixel(40, 20, Rgb([10, 20, 30]))
            .save(&path)
            .expect("can save png");

        let image = Image::new_from_disk(&path).expect("can load png");
        assert_eq!(image.width, 40.0);
        assert_eq!(image.height, 20.0);
        assert!((image.aspect_ratio() - 0.5).abs() < f32::EPSILON);
        assert!(matches!(image.source, ImageSource::Raster(_)));
    }

    #[test]
    fn garbage_is_not_an_image() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not really a png").expect("can write");
        assert!(Image::new_from_disk(&path).is_err());
        assert!(Image::new_from_disk(dir.path().join("missing.png")).is_err());
    }
}
