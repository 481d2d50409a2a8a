//! Smoke test CLI for a running shortlink server.
//!
//! Walks the main API flow end to end: health check, link creation,
//! statistics and redirect.
//!
//! # Usage
//!
//! ```bash
//! # Against a local server on the default port
//! cargo run --bin smoke
//!
//! # Custom server, target URL and shortcode
//! cargo run --bin smoke -- --base-url http://localhost:8080 \
//!     --url https://www.rust-lang.org --validity 5 --shortcode rust1
//! ```
//!
//! Exits with a non-zero status on the first failed check.

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use colored::*;
use reqwest::{Client, StatusCode, header, redirect};
use serde_json::{Value, json};

/// Smoke test for the shortlink HTTP API.
#[derive(Parser)]
#[command(name = "smoke")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server base URL
    #[arg(long, default_value = "http://localhost:3001")]
    base_url: String,

    /// URL to shorten
    #[arg(long, default_value = "https://www.example.com/smoke-test")]
    url: String,

    /// Validity in minutes
    #[arg(long)]
    validity: Option<f64>,

    /// Custom shortcode
    #[arg(long)]
    shortcode: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let base = cli.base_url.trim_end_matches('/').to_string();

    let client = Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .context("Failed to build HTTP client")?;

    println!("{}", "🔎 Shortlink smoke test".bright_blue().bold());
    println!("  Server: {}", base.cyan());
    println!();

    if let Err(e) = run(&client, &base, &cli).await {
        println!();
        println!("{} {:#}", "❌ Smoke test failed:".red().bold(), e);
        std::process::exit(1);
    }

    println!();
    println!("{}", "✅ All checks passed".green().bold());

    Ok(())
}

async fn run(client: &Client, base: &str, cli: &Cli) -> Result<()> {
    check_health(client, base).await?;
    let short_link = create_link(client, base, cli).await?;

    let code = short_link
        .rsplit('/')
        .next()
        .filter(|c| !c.is_empty())
        .with_context(|| format!("Cannot extract shortcode from {short_link}"))?
        .to_string();

    check_stats(client, base, &code, &cli.url).await?;
    check_redirect(client, base, &code, &cli.url).await?;

    Ok(())
}

async fn check_health(client: &Client, base: &str) -> Result<()> {
    let response = client
        .get(format!("{base}/api/health"))
        .send()
        .await
        .context("Server is not reachable")?;

    ensure!(
        response.status() == StatusCode::OK,
        "GET /api/health returned {}",
        response.status()
    );

    let body: Value = response.json().await?;
    ensure!(
        body["status"] == "healthy",
        "Unexpected health status: {}",
        body["status"]
    );

    pass(&format!("Health check ({} links)", body["totalUrls"]));
    Ok(())
}

async fn create_link(client: &Client, base: &str, cli: &Cli) -> Result<String> {
    let mut payload = json!({ "url": cli.url });
    if let Some(validity) = cli.validity {
        payload["validity"] = json!(validity);
    }
    if let Some(ref shortcode) = cli.shortcode {
        payload["shortcode"] = json!(shortcode);
    }

    let response = client
        .post(format!("{base}/shorturls"))
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    let body: Value = response.json().await?;

    if status != StatusCode::CREATED {
        bail!("POST /shorturls returned {}: {}", status, body["error"]["message"]);
    }

    let short_link = body["shortLink"]
        .as_str()
        .context("Response has no shortLink")?
        .to_string();

    pass(&format!(
        "Created {} (expires {})",
        short_link.bright_yellow(),
        body["expiry"].as_str().unwrap_or("?")
    ));

    Ok(short_link)
}

async fn check_stats(client: &Client, base: &str, code: &str, expected_url: &str) -> Result<()> {
    let response = client
        .get(format!("{base}/shorturls/{code}"))
        .send()
        .await?;

    ensure!(
        response.status() == StatusCode::OK,
        "GET /shorturls/{} returned {}",
        code,
        response.status()
    );

    let body: Value = response.json().await?;
    ensure!(
        body["originalUrl"] == expected_url,
        "Statistics report originalUrl {}",
        body["originalUrl"]
    );

    pass(&format!(
        "Statistics ({} accesses)",
        body["accessCount"]
    ));
    Ok(())
}

async fn check_redirect(client: &Client, base: &str, code: &str, expected_url: &str) -> Result<()> {
    let response = client.get(format!("{base}/{code}")).send().await?;

    ensure!(
        response.status() == StatusCode::FOUND,
        "GET /{} returned {}",
        code,
        response.status()
    );

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .context("Redirect has no Location header")?;

    let expected = url::Url::parse(expected_url)?;
    ensure!(
        location == expected.as_str(),
        "Redirect points to {}, expected {}",
        location,
        expected
    );

    pass(&format!("Redirect 302 -> {}", location.cyan()));
    Ok(())
}

fn pass(message: &str) {
    println!("  {} {}", "✔".green(), message);
}
