//! Print every campaign of the account as `Id<TAB>Name<TAB>State`.
//!
//! ```sh
//! export YANDEX_DIRECT_TOKEN='y0_...'
//! export YANDEX_DIRECT_CLIENT_LOGIN='advertiser-login'   # agency accounts only
//! cargo run --bin list-campaigns
//! ```

use serde_json::json;
use yandex_direct::{DirectClient, DirectCredentials};

#[tokio::main]
async fn main() {
    yandex_direct::logging::init("warn");

    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> yandex_direct::Result<()> {
    let client = DirectClient::new(DirectCredentials::from_env()?)?;

    let campaigns = client
        .get_all(
            "campaigns",
            json!({
                "SelectionCriteria": {},
                "FieldNames": ["Id", "Name", "State"],
            }),
            "Campaigns",
        )
        .await?;

    for campaign in &campaigns {
        println!(
            "{}\t{}\t{}",
            campaign["Id"],
            campaign["Name"].as_str().unwrap_or_default(),
            campaign["State"].as_str().unwrap_or_default()
        );
    }

    Ok(())
}
