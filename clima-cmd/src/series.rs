//! `plot` and `csv`: the yearly series of one chartable factor.

use crate::args::{require_valid, SeriesArgs, TargetArgs};
use anyhow::Context;
use clima_api::driver::{self, PlotTrigger};
use clima_api::ClimateService;
use clima_core::factor::{AnalysisFactor, PlotFactor};
use clima_core::plot::{PlotCache, PlotCoordinator};
use clima_core::validation::SeriesInputs;
use log::info;
use std::path::Path;

/// Validate the arguments into the chart factor and series inputs.
fn prepare(
    target: &TargetArgs,
    series: &SeriesArgs,
) -> anyhow::Result<(PlotFactor, SeriesInputs)> {
    let factor: AnalysisFactor = series.factor.parse()?;
    let factor = PlotFactor::try_from(factor)?;
    let form = target.to_form(AnalysisFactor::from(factor).as_str());
    let inputs = require_valid(series.to_form().validate(&form))?;
    Ok((factor, inputs))
}

pub async fn run_plot<S: ClimateService + ?Sized>(
    service: &S,
    target: &TargetArgs,
    series: &SeriesArgs,
    out: &str,
) -> anyhow::Result<()> {
    let (factor, inputs) = prepare(target, series)?;
    let mut cache: PlotCache<Vec<u8>> = PlotCache::new();
    let mut card = PlotCoordinator::mount(factor, &cache);

    driver::run_plot(
        service,
        &mut card,
        &mut cache,
        Some(&inputs),
        PlotTrigger::Manual,
        |bytes| bytes,
    )
    .await;

    if let Some(message) = card.error() {
        anyhow::bail!("{}", message);
    }
    let image = card.displayed().context("no chart was returned")?;
    std::fs::write(out, image).with_context(|| format!("failed to write {}", out))?;
    info!("{} chart saved to {} ({} bytes)", factor, out, image.len());
    Ok(())
}

/// Header plus the first `rows` records, one comma-separated line each.
pub fn preview_csv(bytes: &[u8], rows: usize) -> anyhow::Result<String> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let mut out = String::new();
    let headers = rdr.headers().context("failed to read CSV header")?;
    out.push_str(&headers.iter().collect::<Vec<_>>().join(","));
    out.push('\n');
    for record in rdr.records().take(rows) {
        let record = record.context("failed to read CSV row")?;
        out.push_str(&record.iter().collect::<Vec<_>>().join(","));
        out.push('\n');
    }
    Ok(out)
}

pub async fn run_csv<S: ClimateService + ?Sized>(
    service: &S,
    target: &TargetArgs,
    series: &SeriesArgs,
    out_dir: &str,
    preview: usize,
) -> anyhow::Result<()> {
    let (factor, inputs) = prepare(target, series)?;
    let mut card: PlotCoordinator<Vec<u8>> = PlotCoordinator::mount(factor, &PlotCache::new());

    let Some((filename, bytes)) = driver::run_csv(service, &mut card, Some(&inputs)).await else {
        anyhow::bail!("{}", card.error().unwrap_or("CSV download failed"));
    };

    let path = Path::new(out_dir).join(&filename);
    std::fs::write(&path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!("{} series saved to {}", factor, path.display());
    println!("{}", path.display());

    if preview > 0 {
        print!("{}", preview_csv(&bytes, preview)?);
    }
    Ok(())
}
