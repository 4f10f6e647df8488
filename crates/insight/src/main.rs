use clap::Parser;
use insight::cli::Args;
use insight::storage::ScenarioStore;
use insight::{App, init_logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(ScenarioStore::default_path);

    init_logging(&data_dir, &args.log_level)?;

    let app = App::with_data_dir(data_dir);
    let result = app.execute(args.command);

    if let Err(err) = &result {
        tracing::error!("Command failed: {err}");
    }
    result
}
