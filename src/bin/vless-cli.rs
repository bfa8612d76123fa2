use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "vless-cli")]
#[command(about = "Management CLI for the VLESS manager", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Bearer token, if the manager has an API key configured.
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a client and print its vless:// link
    Create {
        /// Label stored as the client's email
        email: String,
    },
    /// List configured clients
    List,
    /// Delete a client by id
    Delete {
        /// Client UUID
        id: String,
    },
    /// Check that the manager is up
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {key}"))?);
    }

    let request = match &cli.command {
        Commands::Create { email } => client
            .post(format!("{}/api/create-user", cli.url))
            .json(&json!({ "Email": email })),
        Commands::List => client.get(format!("{}/api/users", cli.url)),
        Commands::Delete { id } => client
            .delete(format!("{}/api/delete-user", cli.url))
            .query(&[("id", id)]),
        Commands::Health => client.get(format!("{}/health", cli.url)),
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: manager returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
