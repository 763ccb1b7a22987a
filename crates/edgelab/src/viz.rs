use crate::figure::ComparisonFigure;

/// Log every panel of a figure to rerun as a grayscale image.
///
/// Each panel is logged under the entity path `<name>/<panel label>`.
///
/// # Arguments
///
/// * `rec` - The recording stream to log to.
/// * `name` - The entity path prefix, usually the image name.
/// * `figure` - The figure to log.
pub fn log_figure(
    rec: &rerun::RecordingStream,
    name: &str,
    figure: &ComparisonFigure,
) -> Result<(), rerun::RecordingStreamError> {
    for panel in figure.panels() {
        rec.log(
            format!("{name}/{}", panel.label),
            &rerun::Image::from_elements(
                panel.image.as_slice(),
                panel.image.size().into(),
                rerun::ColorModel::L,
            ),
        )?;
    }

    Ok(())
}
