use anyhow::Result;
use clap::Parser;
use icon_classes::cli::{self, Cli};

fn main() -> Result<()> {
    // Parse CLI arguments first so --log-level can configure logging
    let cli = Cli::parse();
    icon_classes::debug::init_log_bridge(cli.log_level);

    let context = match icon_classes::load_context(cli.config.as_deref()) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("icon-classes: error: {e:#}");
            std::process::exit(2);
        }
    };

    let code = cli::run(&cli.command, &context, &mut std::io::stdout().lock())?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
