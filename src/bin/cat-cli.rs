use cat_gateway::dispatch::request::encode_component;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "cat-cli")]
#[command(about = "Command-line client for the cat gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a random cat image
    Random,
    /// List all breeds
    Breeds,
    /// Fetch images for one breed
    BreedImages {
        #[arg(long)]
        breed_id: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Vote an image up (1) or down (-1)
    Vote {
        #[arg(long)]
        image_id: String,
        #[arg(long, allow_negative_numbers = true)]
        value: i64,
        #[arg(long)]
        sub_id: Option<String>,
    },
    /// Show vote history
    History,
    /// List favourites
    Favorites,
    /// Add an image to favourites
    Favorite {
        #[arg(long)]
        image_id: String,
        #[arg(long)]
        sub_id: Option<String>,
    },
    /// Remove a favourite by id
    Unfavorite { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Random => client.get(format!("{}/api/cats/random", base)),
        Commands::Breeds => client.get(format!("{}/api/breeds", base)),
        Commands::BreedImages { breed_id, limit } => {
            let mut query = vec![("breed_id", breed_id)];
            if let Some(limit) = limit {
                query.push(("limit", limit.to_string()));
            }
            client
                .get(format!("{}/api/breed-images", base))
                .query(&query)
        }
        Commands::Vote {
            image_id,
            value,
            sub_id,
        } => {
            let mut body = json!({ "image_id": image_id, "value": value });
            if let Some(sub_id) = sub_id {
                body["sub_id"] = Value::String(sub_id);
            }
            client.post(format!("{}/api/vote", base)).json(&body)
        }
        Commands::History => client.get(format!("{}/api/vote_history", base)),
        Commands::Favorites => client.get(format!("{}/api/favorites", base)),
        Commands::Favorite { image_id, sub_id } => {
            let mut body = json!({ "image_id": image_id });
            if let Some(sub_id) = sub_id {
                body["sub_id"] = Value::String(sub_id);
            }
            client.post(format!("{}/api/favorites", base)).json(&body)
        }
        Commands::Unfavorite { id } => client.delete(favorite_url(base, &id)),
    };

    print_response(request.send().await?).await
}

fn favorite_url(base: &str, id: &str) -> String {
    format!("{}/api/favorites/{}", base, encode_component(id))
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => {
            if let Some(error) = json.get("error").and_then(Value::as_str) {
                eprintln!("Error: {}", error);
            } else {
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Err(_) => println!("{}", text),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_url_encodes_id() {
        assert_eq!(
            favorite_url("http://localhost:8080", "123"),
            "http://localhost:8080/api/favorites/123"
        );
        assert_eq!(
            favorite_url("http://localhost:8080", "a/b c"),
            "http://localhost:8080/api/favorites/a%2Fb%20c"
        );
    }
}
