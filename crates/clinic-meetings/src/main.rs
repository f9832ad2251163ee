mod bootstrap;
mod interactive;
mod report;

use anyhow::Result;
use meetings_core::settings::Settings;
use meetings_data::export::export_to_dir;
use meetings_runtime::data_manager::DataManager;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Clinic Meetings v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Source: {}, Month: {}, Cache TTL: {}s",
        settings.data_file.display(),
        settings.month,
        settings.cache_ttl
    );

    let mut manager = DataManager::new(settings.cache_ttl, &settings.data_file);

    if settings.interactive {
        let stdin = std::io::stdin();
        return interactive::run(
            &mut manager,
            settings.month,
            settings.top,
            stdin.lock(),
            std::io::stdout(),
        );
    }

    let result = manager.query(&settings.month, settings.top).map_err(|e| {
        let headline = report::load_failure_message(&e, &settings.data_file);
        anyhow::Error::new(e).context(headline)
    })?;

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render(&result));
    }

    if let Some(dir) = &settings.export {
        let path = export_to_dir(&result.filtered_records, &settings.month, dir)?;
        eprintln!("Exportado: {}", path.display());
    }

    Ok(())
}
