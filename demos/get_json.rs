use serde_json::Value;
use typed_fetch::{Client, ClientError, FetchResult};

// Usage: cargo run --example get_json -- https://httpbin.org/json
#[tokio::main]
async fn main() -> Result<(), ClientError> {
    env_logger::init();

    let Some(url) = std::env::args().nth(1) else {
        eprintln!("usage: get_json <url>");
        std::process::exit(2);
    };

    let client = Client::builder().header("Accept", "application/json").connect()?;

    match client.get::<Value>(&url, None).await {
        FetchResult::Success { data, headers } => {
            for (name, value) in &headers {
                println!("{name}: {value}");
            }
            println!();
            println!("{data:#}");
        }
        FetchResult::Failure { error, .. } => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }

    Ok(())
}
