use std::{borrow::Cow, path::Path};

use ab_glyph::{FontRef, PxScale};
use edgelab_image::{Image, ImageError, ImageSize};
use edgelab_imgproc::normalize::normalize_min_max_u8;
use edgelab_io::{png::write_image_png_gray8_with_text, IoError};
use image::{GrayImage, Luma};
use imageproc::drawing::{draw_text_mut, text_size};

// DejaVu Sans Bold, see assets/LICENSE-DejaVu.txt
static FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// An error type for the figure module.
#[derive(thiserror::Error, Debug)]
pub enum FigureError {
    /// The figure has nothing to draw.
    #[error("Figure has no panels")]
    NoPanels,

    /// The layout cannot hold any panel.
    #[error("Figure layout must have at least one column")]
    InvalidLayout,

    /// The embedded font could not be parsed.
    #[error("Invalid font: {0}")]
    Font(String),

    /// Error to create the image.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error to write the figure.
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Grid arrangement of the panels of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureLayout {
    /// Number of panels per row.
    pub columns: usize,
    /// Pixels between panels and around the border.
    pub gap: usize,
    /// Fill value of the gaps and of the unused cell area.
    pub background: u8,
    /// Value of the title and caption text.
    pub foreground: u8,
    /// Height of the title strip at the top. No title is drawn if zero.
    pub title_height: usize,
    /// Height of the caption strip above each panel. No captions are drawn if zero.
    pub caption_height: usize,
    /// Stretch every panel over `[0, 255]` for display, see [`normalize_min_max_u8`].
    pub stretch: bool,
}

impl Default for FigureLayout {
    fn default() -> Self {
        Self {
            columns: 2,
            gap: 8,
            background: 255,
            foreground: 0,
            title_height: 32,
            caption_height: 20,
            stretch: true,
        }
    }
}

/// A labeled image shown in a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Caption of the panel.
    pub label: String,
    /// Normalized grayscale content.
    pub image: Image<u8, 1>,
}

/// A titled grid of labeled grayscale panels.
///
/// Rendering draws the title in a strip at the top and tiles the panels row by row, each under
/// its caption. Saving also stores the title and the labels as PNG text metadata.
///
/// # Example
///
/// ```
/// use edgelab::figure::{ComparisonFigure, FigureLayout};
/// use edgelab::image::Image;
///
/// let mut figure = ComparisonFigure::new("Edge Detection - Dog");
/// for label in ["Roberts", "Prewitt", "Sobel", "Frei-Chen"] {
///     figure.push(label, Image::from_size_val([4, 3].into(), 0).unwrap());
/// }
///
/// let layout = FigureLayout {
///     gap: 1,
///     title_height: 0,
///     caption_height: 0,
///     ..Default::default()
/// };
/// let canvas = figure.render(&layout).unwrap();
/// assert_eq!(canvas.width(), 2 * 4 + 3);
/// assert_eq!(canvas.height(), 2 * 3 + 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonFigure {
    title: String,
    panels: Vec<Panel>,
}

impl ComparisonFigure {
    /// Create an empty figure with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            panels: Vec::new(),
        }
    }

    /// Append a panel.
    pub fn push(&mut self, label: impl Into<String>, image: Image<u8, 1>) {
        self.panels.push(Panel {
            label: label.into(),
            image,
        });
    }

    /// The figure title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The panels in display order.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Tile the panels into a single image with the title and captions drawn in.
    ///
    /// Every cell is as wide as the widest panel or caption and as tall as the tallest panel
    /// plus the caption strip; smaller panels are centered in their cell. The canvas widens to
    /// fit the title, with the grid centered below it.
    ///
    /// # Errors
    ///
    /// Returns [`FigureError::NoPanels`] for an empty figure and
    /// [`FigureError::InvalidLayout`] if `layout.columns` is zero.
    pub fn render(&self, layout: &FigureLayout) -> Result<Image<u8, 1>, FigureError> {
        if self.panels.is_empty() {
            return Err(FigureError::NoPanels);
        }
        if layout.columns == 0 {
            return Err(FigureError::InvalidLayout);
        }

        let font =
            FontRef::try_from_slice(FONT_DATA).map_err(|e| FigureError::Font(e.to_string()))?;
        let title_scale = PxScale::from(layout.title_height as f32 * 0.6);
        let caption_scale = PxScale::from(layout.caption_height as f32 * 0.75);

        let mut cell = self.panels.iter().fold(ImageSize::default(), |acc, p| {
            ImageSize {
                width: acc.width.max(p.image.width()),
                height: acc.height.max(p.image.height()),
            }
        });
        if layout.caption_height > 0 {
            for panel in &self.panels {
                let (label_width, _) = text_size(caption_scale, &font, &panel.label);
                cell.width = cell.width.max(label_width as usize);
            }
        }
        let cell_height = layout.caption_height + cell.height;

        let grid_cols = layout.columns.min(self.panels.len());
        let grid_rows = self.panels.len().div_ceil(layout.columns);
        let gap = layout.gap;

        let grid_width = grid_cols * cell.width + (grid_cols + 1) * gap;
        let title_width = if layout.title_height > 0 {
            text_size(title_scale, &font, &self.title).0 as usize + 2 * gap
        } else {
            0
        };

        let canvas_size = ImageSize {
            width: grid_width.max(title_width),
            height: layout.title_height + grid_rows * cell_height + (grid_rows + 1) * gap,
        };
        let x_offset = (canvas_size.width - grid_width) / 2;

        // top left corner of each cell, caption strip included
        let cell_origins = (0..self.panels.len())
            .map(|i| {
                let (row, col) = (i / layout.columns, i % layout.columns);
                (
                    x_offset + gap + col * (cell.width + gap),
                    layout.title_height + gap + row * (cell_height + gap),
                )
            })
            .collect::<Vec<_>>();

        let mut canvas = Image::<u8, 1>::from_size_val(canvas_size, layout.background)?;
        let canvas_cols = canvas.cols();
        let canvas_data = canvas.as_slice_mut();

        for (panel, &(cell_x, cell_y)) in self.panels.iter().zip(cell_origins.iter()) {
            let shown = if layout.stretch {
                Cow::Owned(normalize_min_max_u8(&panel.image))
            } else {
                Cow::Borrowed(&panel.image)
            };

            let x0 = cell_x + (cell.width - shown.width()) / 2;
            let y0 = cell_y + layout.caption_height + (cell.height - shown.height()) / 2;

            for (dy, src_row) in shown.rows_iter().enumerate() {
                let offset = (y0 + dy) * canvas_cols + x0;
                canvas_data[offset..offset + src_row.len()].copy_from_slice(src_row);
            }
        }

        if layout.title_height == 0 && layout.caption_height == 0 {
            return Ok(canvas);
        }

        let num_pixels = canvas_size.area();
        let mut gray = GrayImage::from_raw(
            canvas_size.width as u32,
            canvas_size.height as u32,
            canvas.into_vec(),
        )
        .ok_or(ImageError::InvalidChannelShape(num_pixels, num_pixels))?;
        let ink = Luma([layout.foreground]);

        if layout.title_height > 0 {
            let (text_w, text_h) = text_size(title_scale, &font, &self.title);
            let x = canvas_size.width.saturating_sub(text_w as usize) / 2;
            let y = layout.title_height.saturating_sub(text_h as usize) / 2;
            draw_text_mut(&mut gray, ink, x as i32, y as i32, title_scale, &font, &self.title);
        }

        if layout.caption_height > 0 {
            for (panel, &(cell_x, cell_y)) in self.panels.iter().zip(cell_origins.iter()) {
                let (text_w, text_h) = text_size(caption_scale, &font, &panel.label);
                let x = cell_x + cell.width.saturating_sub(text_w as usize) / 2;
                let y = cell_y + layout.caption_height.saturating_sub(text_h as usize) / 2;
                draw_text_mut(
                    &mut gray,
                    ink,
                    x as i32,
                    y as i32,
                    caption_scale,
                    &font,
                    &panel.label,
                );
            }
        }

        Ok(Image::new(canvas_size, gray.into_raw())?)
    }

    /// Render the figure and write it as a PNG with its title and labels as text metadata.
    ///
    /// The metadata holds a `Title` entry and one `Panel <i>` entry per panel.
    pub fn save(&self, file_path: impl AsRef<Path>, layout: &FigureLayout) -> Result<(), FigureError> {
        let canvas = self.render(layout)?;

        let keywords = (0..self.panels.len())
            .map(|i| format!("Panel {i}"))
            .collect::<Vec<_>>();

        let mut text = vec![("Title", self.title.as_str())];
        text.extend(
            keywords
                .iter()
                .zip(self.panels.iter())
                .map(|(keyword, panel)| (keyword.as_str(), panel.label.as_str())),
        );

        write_image_png_gray8_with_text(file_path, &canvas, &text)?;

        Ok(())
    }
}
