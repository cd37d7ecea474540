use pulsa::app::App;
use pulsa::config::CardConfig;
use pulsa::{demo, Result};

#[tokio::main]
async fn main() {
    // Logging goes to stderr so the TUI on stdout is unaffected;
    // silent unless RUST_LOG is set
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = match args.first().map(String::as_str) {
        None => run_tui(),
        Some("--demo") => run_demo().await,
        Some("--init-config") => init_config(),
        Some(flag) => {
            eprintln!("pulsa: unknown flag '{}'", flag);
            eprintln!("usage: pulsa [--demo | --init-config]");
            std::process::exit(2);
        }
    };

    if let Err(err) = outcome {
        eprintln!("pulsa: {}", err);
        std::process::exit(1);
    }
}

/// Default mode: the fullscreen card
fn run_tui() -> Result<()> {
    let config = CardConfig::load()?;
    let mut app = App::new(config)?;
    app.init()?;
    app.run()
}

/// Autoplay the card on plain stdout
async fn run_demo() -> Result<()> {
    let config = CardConfig::load()?;
    demo::run(config).await
}

/// Write the default configuration to the standard path
fn init_config() -> Result<()> {
    let path = CardConfig::default().save()?;
    println!("wrote {}", path.display());
    Ok(())
}
