use std::fs::File;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use dslab_tables::scenario::Scenario;
use dslab_tables::table::TableFormat;
use dslab_tables::{CloudletsTableBuilder, TableError};

/// Prints results of cloudlets from a finished simulation
#[derive(Parser, Debug)]
#[clap(about, long_about = None)]
struct Args {
    /// Path to YAML file with simulation results
    #[clap()]
    scenario: String,

    /// Table format: text, csv, markdown or json (overrides the one from scenario)
    #[clap(long, short)]
    format: Option<TableFormat>,

    /// Table title (overrides the one from scenario)
    #[clap(long, short)]
    title: Option<String>,

    /// Write table to file instead of stdout
    #[clap(long, short)]
    output: Option<String>,
}

fn init_logger() {
    use env_logger::Builder;
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

/// Table format and title: command-line values take precedence over the scenario ones.
fn table_settings(args: &Args, scenario: &Scenario) -> (TableFormat, Option<String>) {
    let format = args.format.unwrap_or(scenario.format);
    let title = args.title.clone().or_else(|| scenario.title.clone());
    (format, title)
}

fn run(args: Args) -> Result<(), TableError> {
    let scenario = Scenario::from_file(&args.scenario)?;
    let cloudlets = scenario.resolve()?;
    info!("loaded {} cloudlets from {}", cloudlets.len(), args.scenario);

    let (format, title) = table_settings(&args, &scenario);
    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };

    let mut table = CloudletsTableBuilder::new(&cloudlets);
    table.set_printer(format.builder_with_output(output));
    if let Some(title) = title {
        table.set_title(&title);
    }
    table.build()?;
    Ok(())
}

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "results.yaml";

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("cloudlets-table").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_scenario_settings_without_flags() {
        let scenario = Scenario::from_file(SCENARIO).unwrap();
        let args = parse(&[SCENARIO]);

        assert_eq!(
            table_settings(&args, &scenario),
            (TableFormat::Text, Some("TWO DATACENTERS".to_string()))
        );
    }

    #[test]
    fn test_flags_override_scenario() {
        let scenario = Scenario::from_file(SCENARIO).unwrap();
        let args = parse(&[SCENARIO, "--format", "json", "--title", "X"]);

        assert_eq!(table_settings(&args, &scenario), (TableFormat::Json, Some("X".to_string())));
    }

    #[test]
    fn test_no_title_anywhere() {
        let scenario = Scenario::from_yaml("format: csv").unwrap();
        let args = parse(&["any.yaml", "-f", "markdown"]);

        assert_eq!(table_settings(&args, &scenario), (TableFormat::Markdown, None));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let args = ["cloudlets-table", SCENARIO, "--format", "html"];
        assert!(Args::try_parse_from(args).is_err());
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        let args = parse(&[SCENARIO, "-f", "json", "-t", "X", "-o", path.to_str().unwrap()]);

        run(args).unwrap();

        let table: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(table["title"], "X");
        assert_eq!(table["rows"].as_array().unwrap().len(), 3);
        assert_eq!(table["rows"][2][1], "CANCELED");
    }

    #[test]
    fn test_run_fails_on_missing_scenario() {
        let args = parse(&["no-such-file.yaml"]);
        assert!(matches!(run(args), Err(TableError::ReadFile { .. })));
    }
}
