//! Product Notes - CLI Tool
//!
//! Command-line client for the product notes HTTP API.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "pnotes")]
#[command(about = "CLI for Shopify product notes")]
struct Cli {
    /// Product notes server URL
    #[arg(long, env = "PRODUCT_NOTES_URL", default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Products with notes, with counts
    Overview {
        /// Only products whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List the notes of a product, newest first
    List {
        /// Product GID or numeric id
        product: String,
    },

    /// Add a note to a product
    Add {
        /// Product GID or numeric id
        product: String,

        /// Note title (max 50 characters)
        #[arg(short, long)]
        title: String,

        /// Note description (max 300 characters)
        #[arg(short, long)]
        desc: String,
    },

    /// Change title and description of a note
    Edit {
        /// Product GID or numeric id
        product: String,

        /// Note id
        note: i64,

        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        desc: String,
    },

    /// Delete a note
    Delete {
        /// Product GID or numeric id
        product: String,

        /// Note id
        note: i64,
    },

    /// Add the same note to several products
    Batch {
        /// Comma-separated product ids
        #[arg(long)]
        products: String,

        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        desc: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new();
    let server = cli.server.trim_end_matches('/');

    match cli.command {
        Commands::Overview { search } => handle_overview(&client, server, search).await,
        Commands::List { product } => handle_list(&client, server, &product).await,
        Commands::Add {
            product,
            title,
            desc,
        } => {
            let body = serde_json::json!({ "title": title, "description": desc });
            let note = send(client.post(notes_url(server, &product)).json(&body)).await?;
            println!("Created note {} on {}", note["id"], product);
            Ok(())
        }
        Commands::Edit {
            product,
            note,
            title,
            desc,
        } => {
            let body = serde_json::json!({ "title": title, "description": desc });
            let url = format!("{}/{}", notes_url(server, &product), note);
            send(client.put(url).json(&body)).await?;
            println!("Updated note {}", note);
            Ok(())
        }
        Commands::Delete { product, note } => {
            let url = format!("{}/{}", notes_url(server, &product), note);
            send(client.delete(url)).await?;
            println!("Deleted note {}", note);
            Ok(())
        }
        Commands::Batch {
            products,
            title,
            desc,
        } => handle_batch(&client, server, &products, title, desc).await,
    }
}

fn notes_url(server: &str, product: &str) -> String {
    format!(
        "{}/api/products/{}/notes",
        server,
        urlencoding::encode(product)
    )
}

/// Send a request; non-2xx responses become errors carrying the API message
async fn send(request: RequestBuilder) -> Result<Value> {
    let resp = request.send().await?;
    let status = resp.status();
    let text = resp.text().await?;
    let body: Value = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };

    if !status.is_success() {
        let message = body["error"].as_str().map(str::to_string).unwrap_or_else(|| body.to_string());
        match body.get("fields") {
            Some(fields) => bail!("{} ({}): {}", message, status, fields),
            None => bail!("{} ({})", message, status),
        }
    }
    Ok(body)
}

async fn handle_overview(client: &Client, server: &str, search: Option<String>) -> Result<()> {
    let mut request = client.get(format!("{}/api/overview", server));
    if let Some(search) = &search {
        request = request.query(&[("search", search)]);
    }
    let resp = send(request).await?;

    let stats = &resp["stats"];
    println!(
        "{} products, {} with notes, {} notes",
        stats["total_products"], stats["products_with_notes"], stats["total_notes"]
    );
    println!();
    println!("{:<40} {:<16} {}", "PRODUCT", "NOTES", "ADMIN URL");
    println!("{}", "-".repeat(100));
    for product in resp["products"].as_array().into_iter().flatten() {
        println!(
            "{:<40} {:<16} {}",
            product["title"].as_str().unwrap_or("-"),
            product["badge_label"].as_str().unwrap_or("-"),
            product["admin_url"].as_str().unwrap_or("-")
        );
    }

    Ok(())
}

async fn handle_list(client: &Client, server: &str, product: &str) -> Result<()> {
    let resp = send(
        client
            .get(notes_url(server, product))
            .query(&[("limit", "100")]),
    )
    .await?;

    println!("{:<15} {:<26} {}", "ID", "CREATED", "TITLE");
    println!("{}", "-".repeat(80));
    for note in resp["items"].as_array().into_iter().flatten() {
        println!(
            "{:<15} {:<26} {}",
            note["id"],
            note["createdAt"].as_str().unwrap_or("-"),
            note["title"].as_str().unwrap_or("-")
        );
        if let Some(desc) = note["description"].as_str() {
            println!("{:<15} {}", "", desc);
        }
    }

    Ok(())
}

async fn handle_batch(
    client: &Client,
    server: &str,
    products: &str,
    title: String,
    desc: String,
) -> Result<()> {
    let product_ids: Vec<&str> = products
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let body = serde_json::json!({
        "product_ids": product_ids,
        "title": title,
        "description": desc
    });

    let resp = send(client.post(format!("{}/api/notes/batch", server)).json(&body)).await?;

    let mut failed = 0;
    for item in resp["items"].as_array().into_iter().flatten() {
        let product = item["product_id"].as_str().unwrap_or("-");
        match item["status"].as_str() {
            Some("created") => println!("{}: created note {}", product, item["note"]["id"]),
            _ => {
                failed += 1;
                println!("{}: FAILED {}", product, item["error"].as_str().unwrap_or("-"));
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} products failed", failed, product_ids.len());
    }
    Ok(())
}
