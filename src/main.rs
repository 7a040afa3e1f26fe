use gtk4::glib;
use log::error;
use memorama::GameConfig;

fn main() -> glib::ExitCode {
    env_logger::init();

    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return glib::ExitCode::FAILURE;
        }
    };

    memorama::ui::run(config)
}
