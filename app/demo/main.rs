use std::{path::PathBuf, process::exit};

use clap::Parser;
use rdbcutil::{
    config::jdbc_config::{JdbcConfig, DEFAULT_CONFIG_PATH},
    DataAccessHelper, JdbcUtilError, ResultRecord,
};
use tracing::error;

#[derive(Debug, Parser)]
struct Args {
    #[arg(help = "path to jdbc.properties", short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match JdbcConfig::load_from(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "cannot start without database configuration");
            exit(1)
        }
    };

    let mut helper = DataAccessHelper::new(config);
    let result = run(&mut helper);
    helper.release();

    if let Err(e) = result {
        error!(error = %e, "demo failed");
        exit(1)
    }
}

fn run(helper: &mut DataAccessHelper) -> Result<(), JdbcUtilError> {
    helper.get_connection()?;
    for record in helper.execute_query("select * from article", None)? {
        println!("{}", format_record(&record));
    }
    Ok(())
}

fn format_record(record: &ResultRecord) -> String {
    let fields: Vec<String> = record
        .iter()
        .map(|(column, value)| format!("{}={}", column, value))
        .collect();
    format!("{{{}}}", fields.join(", "))
}
