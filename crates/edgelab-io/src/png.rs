use std::{fs, fs::File, io::BufWriter, path::Path};

use edgelab_image::{Image, ImageSize};
use png::{BitDepth, ColorType, Decoder, Encoder};

use crate::error::IoError;

/// Read a PNG image with a single channel (mono8).
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A grayscale image with a single channel (mono8).
pub fn read_image_png_mono8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let (buf, size, _) = read_png_impl(file_path)?;
    Ok(Image::new(size.into(), buf)?)
}

/// Read the `tEXt` metadata entries of a PNG file.
///
/// # Returns
///
/// The `(keyword, text)` pairs in file order.
pub fn read_png_text(file_path: impl AsRef<Path>) -> Result<Vec<(String, String)>, IoError> {
    let (_, _, text) = read_png_impl(file_path)?;
    Ok(text)
}

// utility function to read the png file
#[allow(clippy::type_complexity)]
fn read_png_impl(
    file_path: impl AsRef<Path>,
) -> Result<(Vec<u8>, [usize; 2], Vec<(String, String)>), IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    if let Some(extension) = file_path.extension() {
        if extension != "png" {
            return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
        }
    } else {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let file = fs::File::open(file_path)?;
    let mut reader = Decoder::new(file)
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    if info.color_type != ColorType::Grayscale || info.bit_depth != BitDepth::Eight {
        return Err(IoError::PngDecodeError(format!(
            "expected an 8-bit grayscale image, got {:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }
    buf.truncate(info.buffer_size());

    let text = reader
        .info()
        .uncompressed_latin1_text
        .iter()
        .map(|chunk| (chunk.keyword.clone(), chunk.text.clone()))
        .collect();

    Ok((buf, [info.width as usize, info.height as usize], text))
}

/// Writes the given PNG _(grayscale 8-bit)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the PNG image data.
pub fn write_image_png_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    write_png_impl(file_path, image.as_slice(), image.size(), &[])
}

/// Writes the given PNG _(grayscale 8-bit)_ data with `tEXt` metadata entries.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the PNG image data.
/// - `text` - The `(keyword, text)` entries. Keywords must be 1 to 79 Latin-1 characters.
pub fn write_image_png_gray8_with_text(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
    text: &[(&str, &str)],
) -> Result<(), IoError> {
    write_png_impl(file_path, image.as_slice(), image.size(), text)
}

fn write_png_impl(
    file_path: impl AsRef<Path>,
    image_data: &[u8],
    image_size: ImageSize,
    text: &[(&str, &str)],
) -> Result<(), IoError> {
    let file = File::create(file_path)?;

    let mut encoder = Encoder::new(
        BufWriter::new(file),
        image_size.width as u32,
        image_size.height as u32,
    );
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    for (keyword, value) in text {
        encoder
            .add_text_chunk(keyword.to_string(), value.to_string())
            .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    }

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;

    Ok(())
}
