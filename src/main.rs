use clap::Parser;
use tokenintel::cli::commands::{Cli, Commands};
use tokenintel::TokenIntel;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let db_path = std::env::var("TOKENINTEL_DB").unwrap_or_else(|_| "./tokenintel.db".into());

    let ti = match TokenIntel::new(&db_path) {
        Ok(ti) => ti,
        Err(e) => {
            eprintln!("Error initializing TokenIntel: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(ti, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(ti: TokenIntel, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Search { query, limit } => {
            let mut tokens = ti.search_tokens(&query).await?;
            tokens.truncate(limit);
            println!("{}", serde_json::to_string_pretty(&tokens).unwrap());
        }
        Commands::Analyze { query, limit } => {
            let mut tokens = ti.search_tokens(&query).await?;
            tokens.truncate(limit);
            if tokens.is_empty() {
                println!("No tokens matched '{query}'");
                return Ok(());
            }
            let symbols: Vec<&str> = tokens.iter().map(|t| t.symbol.as_str()).collect();
            println!("Analyzing {} token(s): {}", tokens.len(), symbols.join(", "));

            let handle = ti.spawn_analysis(tokens);
            let report = handle.await?;
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
        Commands::Report => match ti.latest_report()? {
            Some(report) => println!("{}", serde_json::to_string_pretty(&report).unwrap()),
            None => println!("No reports yet"),
        },
        Commands::History { limit } => {
            let reports = ti.recent_reports(limit)?;
            for report in &reports {
                let (buy, hold, avoid) = report.decision_counts();
                println!(
                    "{}  {}  {} tokens (buy {buy} / hold {hold} / avoid {avoid})",
                    report.id,
                    report.date.to_rfc3339(),
                    report.tokens.len()
                );
            }
        }
    }
    Ok(())
}
