use sketchnotes_web::settings::{self, AppSettings};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = settings::settings_file_path();
    let settings = if settings_path.exists() {
        settings::load_settings()
    } else {
        let defaults = AppSettings::default();
        match settings::save_settings(&defaults) {
            Ok(()) => log::info!("Wrote default settings to {}", settings_path.display()),
            Err(e) => log::warn!("{e}"),
        }
        defaults
    };

    if let Err(e) = sketchnotes_web::run(settings).await {
        log::error!("{e}");
        std::process::exit(1);
    }
}
