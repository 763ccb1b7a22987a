use edgelab::pipeline::{self, PipelineConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::default();

    #[cfg(feature = "rerun")]
    let report = {
        let rec = rerun::RecordingStreamBuilder::new("edgelab").spawn()?;
        pipeline::run_with(&config, |image_report| {
            if let Err(e) = edgelab::viz::log_figure(&rec, &image_report.name, &image_report.figure)
            {
                log::warn!("failed to log {} to rerun: {e}", image_report.name);
            }
        })?
    };

    #[cfg(not(feature = "rerun"))]
    let report = pipeline::run(&config)?;

    for (image_file, reason) in &report.failed {
        log::warn!("skipped {image_file}: {reason}");
    }
    log::info!(
        "all done: {} processed, {} failed",
        report.processed.len(),
        report.failed.len()
    );

    Ok(())
}
