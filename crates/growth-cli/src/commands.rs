use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use growth_core::{ZScoreEngine, ZScoreRequest, compute_cohort_with_options};
use growth_model::{CohortOptions, CohortResultRow, DatasetName, ReferenceStore};
use growth_standards::{load_all_reference_tables, load_reference_store, reference_root};

use growth_cli::input::read_individuals;
use growth_cli::output::{write_cohort_csv, write_cohort_json};
use growth_cli::summary::{cohort_table, datasets_table, zscore_table};

use crate::cli::{CohortArgs, CohortFormatArg, ZscoreArgs};

fn resolve_reference_root(reference_dir: Option<&Path>) -> PathBuf {
    reference_dir.map_or_else(reference_root, Path::to_path_buf)
}

fn load_dataset(reference_dir: Option<&Path>, dataset: &DatasetName) -> Result<ReferenceStore> {
    let root = resolve_reference_root(reference_dir);
    load_reference_store(&root, std::slice::from_ref(dataset))
        .with_context(|| format!("load reference data from {}", root.display()))
}

pub fn run_zscore(args: &ZscoreArgs, reference_dir: Option<&Path>) -> Result<()> {
    let dataset = DatasetName::new(&args.dataset);
    let store = load_dataset(reference_dir, &dataset)?;
    let engine = ZScoreEngine::new(&store);
    let request = ZScoreRequest::new(args.measure, args.value, args.gender, args.age)
        .with_age_unit(args.age_unit)
        .with_gestation(args.gestation)
        .with_dataset(dataset);
    let result = engine.calculate(&request).context("compute z-score")?;
    println!("{}", zscore_table(result.z, result.nearest_age_years, result.age_years));
    Ok(())
}

pub fn run_cohort(args: &CohortArgs, reference_dir: Option<&Path>) -> Result<()> {
    let span = info_span!("cohort_command", input = %args.input.display());
    let _guard = span.enter();

    let options = CohortOptions::new()
        .with_dataset(args.dataset.as_str())
        .with_default_age_unit(args.default_age_unit);
    let individuals = read_individuals(&args.input)?;
    let store = load_dataset(reference_dir, &options.dataset)?;
    let engine = ZScoreEngine::new(&store);
    let rows = compute_cohort_with_options(&engine, &individuals, &options)
        .context("compute cohort z-scores")?;

    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            write_rows(&rows, args.format, BufWriter::new(file))?;
            info!(
                path = %path.display(),
                rows = rows.len(),
                "wrote cohort results"
            );
        }
        None => write_rows(&rows, args.format, io::stdout().lock())?,
    }
    Ok(())
}

fn write_rows<W: Write>(
    rows: &[CohortResultRow],
    format: CohortFormatArg,
    mut writer: W,
) -> Result<()> {
    match format {
        CohortFormatArg::Table => {
            writeln!(writer, "{}", cohort_table(rows)).context("write cohort table")?;
        }
        CohortFormatArg::Csv => write_cohort_csv(rows, &mut writer)?,
        CohortFormatArg::Json => write_cohort_json(rows, &mut writer)?,
    }
    writer.flush().context("flush cohort output")?;
    Ok(())
}

pub fn run_datasets(reference_dir: Option<&Path>) -> Result<()> {
    let root = resolve_reference_root(reference_dir);
    let store = load_all_reference_tables(&root)
        .with_context(|| format!("load reference data from {}", root.display()))?;
    if store.is_empty() {
        bail!("no reference tables found under {}", root.display());
    }
    println!("Reference data: {}", root.display());
    println!("{}", datasets_table(&store));
    Ok(())
}
