//! FinSight Dashboard CLI
//!
//! An interactive terminal dashboard over the analytics backend.
//!
//! # Usage
//!
//! ```bash
//! # Point at the backend (defaults to http://127.0.0.1:8000)
//! export FINSIGHT_BACKEND_URL="http://127.0.0.1:8000"
//!
//! # Optionally override the polled watchlist
//! export FINSIGHT_WATCHLIST="INFY,TCS,RELIANCE"
//!
//! # Run the dashboard
//! cargo run --bin finsight-dash -p finsight
//! ```

use finsight::{BackendClient, Command, Dashboard, DashboardConfig, PricePoller};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

fn print_banner() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║                     FinSight Dashboard                       ║
║                                                              ║
║  Commands:                                                   ║
║    /prices                 - Refresh live prices             ║
║    /portfolio INFY,10;...  - Value a portfolio               ║
║    /predict <symbol>       - Prediction + Sharpe ratio       ║
║    /risk <symbol>          - Risk level, metrics, anomalies  ║
║    /pca <symbol>           - Explained-variance plot         ║
║    /courses                - Course catalog                  ║
║    /help                   - Show help                       ║
║    /exit                   - Exit                            ║
║                                                              ║
║  Bare input quotes a symbol, e.g. just type INFY.            ║
╚══════════════════════════════════════════════════════════════╝
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "warn,finsight=info".to_string()))
        .init();

    print_banner();

    let config = DashboardConfig::default().with_env()?;

    println!("Configuration:");
    println!("  Backend: {}", config.base_url());
    println!("  Watchlist: {}", config.watchlist.join(", "));
    println!("  Refresh: every {:?}", config.refresh_interval);
    println!();

    let client = Arc::new(BackendClient::new(&config)?);
    let dashboard = Arc::new(Dashboard::new(client, &config));

    // Fill the always-on panels, then keep live prices fresh in the
    // background until exit
    dashboard.warm_up().await;
    println!(
        "{}",
        dashboard
            .panels()
            .panel(finsight::PanelKind::LivePrices)
            .content()
            .await
    );

    let poller =
        PricePoller::new(Arc::clone(&dashboard), config.refresh_interval).spawn();

    // Run REPL
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("finsight> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}\n");
                continue;
            }
        };

        match command {
            Command::Prices => println!("{}\n", dashboard.refresh_live_prices().await),
            Command::Portfolio { input } => {
                println!("{}\n", dashboard.calculate_portfolio(&input).await);
            }
            Command::Predict { symbol } => println!("{}\n", dashboard.predict(&symbol).await),
            Command::Risk { symbol } => println!("{}\n", dashboard.analyze_risk(&symbol).await),
            Command::Pca { symbol } => println!("{}\n", dashboard.run_pca(&symbol).await),
            Command::Courses => println!("{}\n", dashboard.load_courses().await),
            Command::Quote { symbol } => println!("{}\n", dashboard.quote(&symbol).await),
            Command::Watch { symbol } => {
                dashboard.watch(&symbol).await;
                println!("Watching {symbol}\n");
            }
            Command::Unwatch { symbol } => {
                if dashboard.unwatch(&symbol).await {
                    println!("Stopped watching {symbol}\n");
                } else {
                    println!("{symbol} is not on the watchlist\n");
                }
            }
            Command::Watchlist => {
                println!("{}\n", dashboard.watchlist().await.join(", "));
            }
            Command::Help => println!("{}", Command::help_text()),
            Command::Exit => {
                println!("Goodbye!");
                break;
            }
        }
    }

    poller.shutdown();
    Ok(())
}
