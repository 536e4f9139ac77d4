use std::path::PathBuf;

use clap::Parser;
use medi_risk::{train_all, ArtifactStore, ForestParams, DEFAULT_DATASET_URL};

mod source;

use source::DatasetSource;

#[derive(Debug, Parser)]
#[command(
    name = "medi-train",
    version,
    about = "Train the diabetes, heart and kidney risk models",
    long_about = "medi-train fits one random forest per condition on the Pima Indians\n\
        diabetes table and writes diabetes_model.json, heart_model.json and\n\
        kidney_model.json to the output directory.\n\n\
        Diabetes uses the recorded outcome. Heart (glucose > 140) and kidney\n\
        (BMI > 30 and age > 45) labels are derived from the same columns.\n\
        Every model uses the default forest settings."
)]
struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dataset URL or local CSV path
    #[arg(long, value_name = "URL|PATH", default_value = DEFAULT_DATASET_URL)]
    source: String,

    /// Directory the model artifacts are written to
    #[arg(long = "out-dir", value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Seed for reproducible forests (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    std::process::exit(run(cli).await);
}

async fn run(cli: Cli) -> i32 {
    let dataset = match DatasetSource::parse(&cli.source).load().await {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("{e}");
            return 1;
        }
    };
    log::info!("loaded {} rows", dataset.len());

    let params = ForestParams {
        seed: cli.seed,
        ..ForestParams::default()
    };
    let store = ArtifactStore::new(&cli.out_dir);

    match train_all(&dataset, params, &store) {
        Ok(artifacts) => {
            for artifact in &artifacts {
                println!(
                    "{}: {} ({} of {} rows positive)",
                    artifact.condition,
                    artifact.path.display(),
                    artifact.positives,
                    artifact.rows
                );
            }
            println!("✓ All models trained successfully");
            0
        }
        Err(e) => {
            log::error!("training failed: {e}");
            1
        }
    }
}
