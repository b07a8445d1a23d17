#[macro_use]
extern crate tracing;

pub mod logging;
pub mod scenario;

pub use logging::init_logging;
pub use scenario::{
    run,
    Scenario,
};

/// Installs color-eyre for reports and panics. Debug builds additionally get
/// a full better-panic backtrace.
pub fn init_errors() -> eyre::Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section("This is a bug in meet-ui-runner, please report it along with the log output.")
        .display_location_section(true)
        .display_env_section(true)
        .into_hooks();
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |panic_info| {
        let report = panic_hook.panic_report(panic_info);
        error!("Error: {report}");

        #[cfg(debug_assertions)]
        {
            better_panic::Settings::auto()
                .most_recent_first(false)
                .lineno_suffix(true)
                .verbosity(better_panic::Verbosity::Full)
                .create_panic_handler()(panic_info);
        }

        std::process::exit(1);
    }));

    Ok(())
}
