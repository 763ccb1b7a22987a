use std::path::{Path, PathBuf};

use edgelab_image::Image;
use edgelab_imgproc::{
    edges::EdgeOperator,
    filter::FilterError,
    normalize::{find_min_max, normalize_clip_u8},
};
use edgelab_io::{functional::read_image_gray8, png::write_image_png_gray8, IoError};
use rayon::prelude::*;

use crate::figure::{ComparisonFigure, FigureError, FigureLayout};

/// An error type for the pipeline module.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The output directory could not be created.
    #[error("Failed to create output directory {0}")]
    OutputDir(PathBuf, #[source] std::io::Error),

    /// Error to read or write an image.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error to run an edge operator.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Error to build the comparison figure.
    #[error(transparent)]
    Figure(#[from] FigureError),
}

/// Options of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Directory the input images are read from.
    pub image_dir: PathBuf,
    /// Directory the edge maps and figures are written to. Created if missing.
    pub output_dir: PathBuf,
    /// File names of the inputs, relative to `image_dir`, in processing order.
    pub image_files: Vec<String>,
    /// Arrangement of the comparison figure.
    pub layout: FigureLayout,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("Citra"),
            output_dir: PathBuf::from("output"),
            image_files: ["portrait.jpg", "landscape.jpg", "salt and pepper.jpg", "gaussian.jpg"]
                .into_iter()
                .map(String::from)
                .collect(),
            layout: FigureLayout::default(),
        }
    }
}

/// Outputs of one processed image.
#[derive(Debug, Clone)]
pub struct ImageReport {
    /// File name up to its first `.`.
    pub name: String,
    /// Written edge maps, one per operator in [`EdgeOperator::ALL`] order.
    pub edge_maps: Vec<(EdgeOperator, PathBuf)>,
    /// Path of the written comparison figure.
    pub comparison: PathBuf,
    /// The comparison figure itself.
    pub figure: ComparisonFigure,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Reports of the images that were fully processed.
    pub processed: Vec<ImageReport>,
    /// File names that failed along with the error message.
    pub failed: Vec<(String, String)>,
}

/// Process every image of the configuration.
///
/// A failing image is logged and recorded in [`BatchReport::failed`]; the remaining images are
/// still processed.
///
/// # Errors
///
/// Returns [`PipelineError::OutputDir`] if the output directory cannot be created.
pub fn run(config: &PipelineConfig) -> Result<BatchReport, PipelineError> {
    run_with(config, |_| {})
}

/// Same as [`run`], calling `on_image` after each successfully processed image.
pub fn run_with<F>(config: &PipelineConfig, mut on_image: F) -> Result<BatchReport, PipelineError>
where
    F: FnMut(&ImageReport),
{
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| PipelineError::OutputDir(config.output_dir.clone(), e))?;

    if config.image_files.is_empty() {
        log::warn!("no input images configured");
    }

    let mut report = BatchReport::default();

    for image_file in &config.image_files {
        let image_path = config.image_dir.join(image_file);

        match process_image(&image_path, config) {
            Ok(image_report) => {
                log::info!(
                    "{} done -> {}",
                    image_report.name,
                    image_report.comparison.display()
                );
                on_image(&image_report);
                report.processed.push(image_report);
            }
            Err(e) => {
                log::error!("failed to process {image_file}: {e}");
                report.failed.push((image_file.clone(), e.to_string()));
            }
        }
    }

    log::info!(
        "processed {} of {} images into {}",
        report.processed.len(),
        config.image_files.len(),
        config.output_dir.display()
    );

    Ok(report)
}

/// Run the four edge operators on one image and write their results and the comparison figure.
///
/// The output directory must exist. Edge maps are written as `<name>_<operator>.png` and the
/// figure as `<name>_comparison.png`, where `<name>` is the file name up to its first `.`.
pub fn process_image(
    image_path: impl AsRef<Path>,
    config: &PipelineConfig,
) -> Result<ImageReport, PipelineError> {
    let image_path = image_path.as_ref();
    let name = clean_name(image_path);

    let gray = read_image_gray8(image_path)?;
    let edges = detect_edges(&gray)?;

    let mut figure = ComparisonFigure::new(format!("Edge Detection - {}", title_case(&name)));
    let mut edge_maps = Vec::with_capacity(edges.len());

    for (operator, edge_map) in edges {
        let output_path = config
            .output_dir
            .join(format!("{name}_{}.png", operator.slug()));
        write_image_png_gray8(&output_path, &edge_map)?;

        figure.push(operator.name(), edge_map);
        edge_maps.push((operator, output_path));
    }

    let comparison = config.output_dir.join(format!("{name}_comparison.png"));
    figure.save(&comparison, &config.layout)?;

    Ok(ImageReport {
        name,
        edge_maps,
        comparison,
        figure,
    })
}

/// Apply every operator of [`EdgeOperator::ALL`] to the image and normalize the results.
///
/// The operators run in parallel; the results keep the order of [`EdgeOperator::ALL`].
pub fn detect_edges(
    src: &Image<u8, 1>,
) -> Result<Vec<(EdgeOperator, Image<u8, 1>)>, FilterError> {
    EdgeOperator::ALL
        .as_slice()
        .par_iter()
        .map(|&operator| {
            let magnitude = operator.apply(src)?;
            if let Ok((min, max)) = find_min_max(&magnitude) {
                log::debug!("{operator} gradient range [{min:.2}, {max:.2}]");
            }
            Ok::<_, FilterError>((operator, normalize_clip_u8(&magnitude)))
        })
        .collect()
}

// file name up to the first dot
fn clean_name(image_path: &Path) -> String {
    let file_name = image_path
        .file_name()
        .map(|f| f.to_string_lossy())
        .unwrap_or_default();
    file_name.split('.').next().unwrap_or_default().to_string()
}

// upper case the first letter of every word, lower case the rest
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_alpha = false;
    for c in text.chars() {
        if prev_is_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_alpha = c.is_alphabetic();
    }
    out
}
