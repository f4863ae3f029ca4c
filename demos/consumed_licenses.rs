use std::env;
use std::time::Duration;

use gh_enterprise_api::{Context, GitHub, ListOptions};

#[tokio::main]
async fn main() {
    env_logger::init();
    let enterprise = match env::args().nth(1) {
        Some(e) => e,
        None => {
            eprintln!("Usage: consumed_licenses <enterprise> [page] [per_page]");
            return;
        }
    };
    let opts = ListOptions {
        page: env::args().nth(2).and_then(|p| p.parse().ok()),
        per_page: env::args().nth(3).and_then(|p| p.parse().ok()),
    };

    let gh = match GitHub::from_env() {
        Ok(gh) => gh,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let ctx = Context::background().timeout(Duration::from_secs(30));

    match gh.list_consumed_licenses(&ctx, &enterprise, Some(&opts)).await {
        Ok((licenses, response)) => {
            println!(
                "Seats consumed: {:?}, purchased: {:?}",
                licenses.total_seats_consumed, licenses.total_seats_purchased
            );
            for user in licenses.users() {
                println!(
                    "{} ({})",
                    user.github_com_login.as_deref().unwrap_or("<no github.com login>"),
                    user.license_type.as_deref().unwrap_or("unknown")
                );
            }
            if let Some(next) = response.next_page {
                println!("Next page: {}", next);
            }
            if let Some(rate) = response.rate {
                println!("Rate limit: {}/{}", rate.remaining, rate.limit);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            if let Some(response) = e.response() {
                eprintln!("Status: {}", response.status);
            }
        }
    }
}
