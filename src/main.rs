use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use phishvec::{Config, Extractor, FeatureVector, PopularityIndex, FEATURE_NAMES};
use serde::Serialize;
use std::path::Path;
use std::process;
use std::sync::Arc;

#[derive(Serialize)]
struct Report<'a> {
    url: &'a str,
    features: Vec<FeatureEntry>,
    suspicious_signals: usize,
}

#[derive(Serialize)]
struct FeatureEntry {
    name: &'static str,
    score: i8,
}

impl<'a> Report<'a> {
    fn new(url: &'a str, vector: &FeatureVector) -> Self {
        Self {
            url,
            features: vector
                .named()
                .map(|(name, score)| FeatureEntry { name, score })
                .collect(),
            suspicious_signals: vector.suspicious_count(),
        }
    }
}

#[tokio::main]
async fn main() {
    let matches = Command::new("phishvec")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract heuristic phishing feature vectors for URLs")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("phishvec.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file and exit")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("dataset")
                .long("dataset")
                .value_name("FILE")
                .help("Popularity dataset path (overrides the config file)")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("urls")
                .value_name("URL")
                .help("URLs to extract features for")
                .action(ArgAction::Append)
                .required_unless_present("generate-config"),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        match Config::generate_default(generate_path) {
            Ok(()) => {
                println!("Generated default configuration at: {generate_path}");
                return;
            }
            Err(e) => {
                eprintln!("Failed to generate configuration: {e}");
                process::exit(1);
            }
        }
    }

    let config_path = matches.get_one::<String>("config").unwrap();
    let mut config = if Path::new(config_path).exists() {
        match Config::load_from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                process::exit(1);
            }
        }
    } else {
        log::warn!("Config file {config_path} not found, using defaults");
        Config::default()
    };

    if let Some(dataset) = matches.get_one::<String>("dataset") {
        config.dataset_path = dataset.clone();
    }

    let index = match PopularityIndex::load(Path::new(&config.dataset_path)) {
        Ok(index) => Arc::new(index),
        Err(e) => {
            eprintln!("Failed to load popularity dataset {}: {e}", config.dataset_path);
            process::exit(1);
        }
    };

    let extractor = match Extractor::new(&config, index) {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("Failed to initialize extractor: {e}");
            process::exit(1);
        }
    };

    let urls: Vec<&String> = matches.get_many::<String>("urls").unwrap().collect();
    let mut failed = false;

    for url in urls {
        match extractor.extract(url, &FEATURE_NAMES).await {
            Ok(vector) => {
                let report = Report::new(url, &vector);
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        log::error!("Failed to serialize report for {url}: {e}");
                        failed = true;
                    }
                }
            }
            Err(e) => {
                log::error!("Feature extraction failed for {url}: {e}");
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
}
