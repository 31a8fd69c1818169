mod cli;
mod lib;
mod load;

use tracing_subscriber::EnvFilter;

use cli::config::Config;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => e.exit(),
    };
    if let Err(errs) = cli::run(config) {
        eprint!("{}", errs);
        std::process::exit(1);
    }
}
