use cinefind::{models::FALLBACK_POSTER, telemetry, Config, MovieFinder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    // Initialize the application core
    let config = Config::from_env()?;
    let finder = MovieFinder::from_config(&config).await?;

    // Render the landing panel
    match finder.get_recommendations().await {
        Ok(picks) => {
            println!("Top picks");
            for pick in picks {
                let marker = if finder.is_favorite(&pick.id).await { "*" } else { " " };
                let rating = pick.rating.map(|r| format!("{:.1}", r)).unwrap_or_default();
                println!(
                    "{} {:<4} {} ({}) {}",
                    marker,
                    rating,
                    pick.title,
                    pick.year,
                    pick.poster.url_or(FALLBACK_POSTER)
                );
            }
        }
        Err(e) => println!("{}", e),
    }

    let favorites = finder.list_favorites().await;
    println!("{} favorite(s)", favorites.len());

    Ok(())
}
