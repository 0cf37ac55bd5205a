use clap::Parser;
use course_records::config::OutputFormat;
use course_records::utils::{logger, validation::Validate};
use course_records::{CliConfig, InMemoryCourseService, RecordsError, Scenario, ScenarioRunner};

fn load_scenario(config: &CliConfig) -> Result<Scenario, RecordsError> {
    let mut scenario = match &config.scenario {
        Some(path) => {
            tracing::info!("Loading scenario from: {}", path);
            Scenario::from_file(path)?
        }
        None => {
            tracing::info!("No scenario given, running the built-in demo");
            Scenario::demo()?
        }
    };

    if let Some(stop_on_error) = config.stop_on_error {
        scenario.run.stop_on_error = stop_on_error;
        tracing::info!("stop_on_error overridden to: {}", stop_on_error);
    }

    scenario.validate()?;
    Ok(scenario)
}

fn fail(e: &RecordsError) -> ! {
    tracing::error!("{} (category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting course-records");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let scenario = load_scenario(&config).unwrap_or_else(|e| fail(&e));

    let mut runner = ScenarioRunner::new(InMemoryCourseService::new());
    let report = runner.run(&scenario).unwrap_or_else(|e| fail(&e));

    match config.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
