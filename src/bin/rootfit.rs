use log::{LevelFilter, Log, Metadata, Record};
use rootfit::{
    config::FitConfig,
    data,
    pipeline::{CsvSurfaceSink, Pipeline},
};

const USAGE: &str = "Usage: rootfit [config=<file.json>] [input=<file.csv>] [output=<dir>] [degree=<n>] [variables=<distance>,<velocity>] [equation=<file>] [surface=<file>|none] [properties=true|false] [log=error|warn|info|debug|trace]";

/// Writes `LEVEL message` lines to stderr.
struct StderrLogger;
impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    //
    // The config file is loaded first, so every other argument overrides it.
    let mut config = FitConfig::default();
    for arg in &args {
        if let Some(path) = arg.strip_prefix("config=") {
            config = FitConfig::from_json_file(path).unwrap_or_else(|e| fail(e));
        }
    }

    let mut properties = false;
    let mut level = LevelFilter::Info;
    for arg in &args {
        if arg == "help" || arg == "--help" || arg == "-h" {
            eprintln!("{USAGE}");
            std::process::exit(0);
        }

        if arg.starts_with("config=") {
            continue;
        }

        match config.apply_arg(arg) {
            Ok(true) => continue,
            Ok(false) => {}
            Err(e) => fail(e),
        }

        if let Some(option) = arg.strip_prefix("properties=") {
            properties = option
                .parse()
                .unwrap_or_else(|_| fail(format!("Invalid properties value: {option}")));
        } else if let Some(option) = arg.strip_prefix("log=") {
            level = option
                .parse()
                .unwrap_or_else(|_| fail(format!("Invalid log level: {option}")));
        } else {
            fail(format!("Unknown argument: {arg}\n{USAGE}"));
        }
    }

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }

    if let Err(e) = run(&config, properties) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &FitConfig, properties: bool) -> rootfit::Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let rows = data::read_csv(&config.input)?;
    let output = pipeline.run(&rows)?;

    let path = output.document().write_to(config.equation_path())?;

    if let Some(surface) = config.surface_path() {
        let mut sink = CsvSurfaceSink::create(&surface)?;
        output.send_to(&mut sink)?;
        log::info!("Surface written to {}", surface.display());
    }

    if properties {
        println!("{}", serde_json::to_string_pretty(&output.fit().properties())?);
    }

    println!("Equation generated and written to {}", path.display());
    Ok(())
}
