use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Query a format-relay node", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    /// Parse on the queried node instead of its peer
    #[arg(short, long)]
    direct: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show available sets and formats
    Info,
    /// Parse one set in one format
    Parse { set: String, format: String },
    /// Parse one set in every format
    All { set: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');
    let direct = [("direct", cli.direct)];

    let res = match &cli.command {
        Commands::Info => client.get(format!("{}/", base)).send().await?,
        Commands::Parse { set, format } => {
            client
                .get(format!("{}/parse/{}/{}", base, set, format))
                .query(&direct)
                .send()
                .await?
        }
        Commands::All { set } => {
            client
                .get(format!("{}/parse/{}", base, set))
                .query(&direct)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: node returned status {}", status);
        match serde_json::from_str::<Value>(&text) {
            Ok(body) => eprintln!("{}", body.get("detail").unwrap_or(&body)),
            Err(_) => eprintln!("{}", text),
        }
        std::process::exit(1);
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
