use anyhow::Context;
use std::path::Path;
use yautja_tablet::logging::{self, Logger};
use yautja_tablet::{error, ConfigOverrides, Tablet, TabletConfig, TuiApplication};

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let overrides = ConfigOverrides::from_args(std::env::args().skip(1))
        .context("invalid command line arguments")?;

    let base = match &overrides.config_path {
        Some(path) => TabletConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TabletConfig::load_default().context("failed to load default config")?,
    };
    let config = base.merged_with(&overrides)?;

    init_logging(&config);
    log::info!("yautja-tablet {} starting", env!("CARGO_PKG_VERSION"));

    let mut tablet = Tablet::start(config, overrides.input.as_deref())
        .context("failed to load input text")?;
    if let Some(patterns) = overrides.patterns.as_deref() {
        load_patterns(&mut tablet, patterns)?;
    }

    let mut app = TuiApplication::new(tablet);
    app.run()?;
    log::info!("yautja-tablet exited");
    Ok(())
}

fn init_logging(config: &TabletConfig) {
    let mut logger = Logger::new(config.log_level()).without_stderr();
    if let Some(path) = config.resolve_log_path() {
        logger = logger.with_file_output(path);
    }
    logging::init(logger);
}

fn load_patterns(tablet: &mut Tablet, path: &Path) -> anyhow::Result<()> {
    tablet
        .load_patterns(path)
        .with_context(|| format!("failed to load patterns {}", path.display()))
}
