use clap::Parser;
use fractal_navigator::{CliArgs, CliController};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let controller = CliController::new(CliArgs::parse());
    let path = controller.run()?;
    println!("{}", path.display());

    Ok(())
}
