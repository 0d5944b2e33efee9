use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cinefind::{
    models::{Movie, MovieDetail, Poster, SearchRequest},
    services::{
        favorites, movie_detail::RELATED_LIMIT, recommendations::DEFAULT_TITLE_POOL,
        FavoritesStore, MovieProvider, RecommendationAssembler,
    },
    storage::{KeyValueStore, MemoryStore},
    AppError, AppResult, MovieFinder,
};

/// Provider answering from fixed tables and counting every call
#[derive(Default)]
struct ScriptedProvider {
    search_results: HashMap<String, Vec<Movie>>,
    details: HashMap<String, MovieDetail>,
    failing_titles: HashSet<String>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

#[async_trait::async_trait]
impl MovieProvider for ScriptedProvider {
    async fn search(&self, request: &SearchRequest) -> AppResult<Vec<Movie>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.search_results
            .get(&request.query)
            .cloned()
            .ok_or(AppError::NoResults)
    }

    async fn fetch_by_id(&self, id: &str) -> AppResult<MovieDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .values()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    async fn fetch_by_title(&self, title: &str) -> AppResult<MovieDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_titles.contains(title) {
            return Err(AppError::Transport("connection reset".to_string()));
        }
        self.details
            .get(title)
            .cloned()
            .ok_or_else(|| AppError::NotFound(title.to_string()))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn movie(id: &str, title: &str) -> Movie {
    Movie::new(id, title, "2001", Poster::Url(format!("https://img.example/{}.jpg", id)))
}

fn detail(id: &str, title: &str, rating: Option<f32>, genres: &[&str]) -> MovieDetail {
    MovieDetail {
        id: id.to_string(),
        title: title.to_string(),
        year: "2001".to_string(),
        poster: Poster::Missing,
        kind: None,
        rating,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        plot: Some("Plot".to_string()),
        director: None,
        writer: None,
        actors: None,
        runtime: None,
        content_rating: None,
        released: None,
    }
}

/// Every pool title resolves; every third one has no rating
fn pool_provider() -> ScriptedProvider {
    let mut provider = ScriptedProvider::default();
    for (index, title) in DEFAULT_TITLE_POOL.iter().enumerate() {
        let rating = if index % 3 == 0 {
            None
        } else {
            Some(6.0 + (index % 7) as f32 * 0.5)
        };
        provider.details.insert(
            title.to_string(),
            detail(&format!("tt{:07}", index), title, rating, &["Drama"]),
        );
    }
    provider
}

async fn finder_with(provider: ScriptedProvider) -> (MovieFinder, Arc<ScriptedProvider>, MemoryStore) {
    let provider = Arc::new(provider);
    let storage = MemoryStore::new();
    let favorites = FavoritesStore::load(Arc::new(storage.clone()), "favorites").await;
    let finder = MovieFinder::new(
        provider.clone(),
        Arc::new(favorites),
        RecommendationAssembler::default(),
    );
    (finder, provider, storage)
}

#[tokio::test]
async fn test_blank_queries_never_reach_provider() {
    let (finder, provider, _) = finder_with(ScriptedProvider::default()).await;

    assert!(matches!(finder.search("").await, Err(AppError::EmptyQuery)));
    assert!(matches!(finder.search("   ").await, Err(AppError::EmptyQuery)));
    assert_eq!(provider.search_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_search_makes_exactly_one_call() {
    let mut scripted = ScriptedProvider::default();
    scripted.search_results.insert(
        "the dark knight".to_string(),
        vec![movie("tt0468569", "The Dark Knight")],
    );
    let (finder, provider, _) = finder_with(scripted).await;

    let movies = finder.search("the dark knight").await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(provider.search_calls.load(Ordering::SeqCst), 1);

    assert!(matches!(
        finder.search("nothing matches this").await,
        Err(AppError::NoResults)
    ));
    assert_eq!(provider.search_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_recommendations_are_ranked_and_unique() {
    let (finder, _, storage) = finder_with(pool_provider()).await;

    for _ in 0..20 {
        let picks = finder.get_recommendations().await.unwrap();

        assert!(picks.len() <= 6);
        assert!(picks.iter().all(|p| p.rating.is_some()));
        assert!(picks
            .windows(2)
            .all(|pair| pair[0].rating.unwrap() >= pair[1].rating.unwrap()));

        let ids: HashSet<&str> = picks.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), picks.len());
    }

    // Recommendations never touch favorites
    assert_eq!(storage.get("favorites").await.unwrap(), None);
    assert!(finder.list_favorites().await.is_empty());
}

#[tokio::test]
async fn test_recommendations_survive_partial_failure() {
    let mut scripted = pool_provider();
    for title in DEFAULT_TITLE_POOL.iter().take(7) {
        scripted.failing_titles.insert(title.to_string());
    }
    let (finder, provider, _) = finder_with(scripted).await;

    // Only 7 titles fail, so every sample of 8 contains a success
    let picks = finder.get_recommendations().await.unwrap();
    assert!(picks.len() <= 6);
    assert!(picks.iter().all(|p| p.rating.is_some()));
    assert_eq!(provider.detail_calls.load(Ordering::SeqCst), 8);
}

#[tokio::test]
async fn test_recommendations_unavailable_when_everything_fails() {
    let mut scripted = pool_provider();
    scripted.failing_titles = DEFAULT_TITLE_POOL.iter().map(|t| t.to_string()).collect();
    let (finder, _, _) = finder_with(scripted).await;

    assert!(matches!(
        finder.get_recommendations().await,
        Err(AppError::RecommendationUnavailable)
    ));
}

#[tokio::test]
async fn test_related_excludes_current_and_caps() {
    let mut scripted = ScriptedProvider::default();
    let mut action: Vec<Movie> = vec![movie("tt001", "Current")];
    action.extend((2..=15).map(|n| movie(&format!("tt{:03}", n), "Other")));
    scripted.search_results.insert("Action".to_string(), action);
    scripted.details.insert(
        "Current".to_string(),
        detail("tt001", "Current", Some(7.5), &["Action", "Thriller"]),
    );
    let (finder, _, _) = finder_with(scripted).await;

    let current = finder.get_detail("tt001").await.unwrap();
    let related = finder.get_related(&current).await;

    assert_eq!(related.len(), RELATED_LIMIT);
    assert!(related.iter().all(|m| m.id != "tt001"));
}

#[tokio::test]
async fn test_related_failure_does_not_block_detail() {
    let mut scripted = ScriptedProvider::default();
    scripted.details.insert(
        "Loner".to_string(),
        detail("tt777", "Loner", Some(6.1), &["Documentary"]),
    );
    let (finder, _, _) = finder_with(scripted).await;

    let view = finder.open_detail("tt777").await.unwrap().ready().unwrap();
    assert_eq!(view.detail.id, "tt777");
    assert!(view.related.is_empty());
}

#[tokio::test]
async fn test_unknown_detail_is_not_found() {
    let (finder, _, _) = finder_with(ScriptedProvider::default()).await;
    assert!(matches!(
        finder.get_detail("tt0000000").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_favorites_scenario_add_add_remove() {
    let (finder, _, storage) = finder_with(ScriptedProvider::default()).await;
    let a = movie("tt0111161", "The Shawshank Redemption");
    let b = movie("tt0068646", "The Godfather");

    assert!(finder.toggle_favorite(a.clone()).await.unwrap());
    assert!(finder.toggle_favorite(b.clone()).await.unwrap());
    assert!(!finder.toggle_favorite(a.clone()).await.unwrap());

    assert_eq!(finder.list_favorites().await, vec![b.clone()]);
    assert!(!finder.is_favorite(&a.id).await);
    assert!(finder.is_favorite(&b.id).await);

    let blob = storage.get("favorites").await.unwrap().unwrap();
    assert_eq!(favorites::decode(&blob).unwrap(), vec![b]);
}

#[tokio::test]
async fn test_favorites_survive_restart() {
    let storage = MemoryStore::new();
    let records = vec![movie("tt1", "One"), movie("tt2", "Two"), movie("tt3", "Three")];

    {
        let store = FavoritesStore::load(Arc::new(storage.clone()), "favorites").await;
        let finder = MovieFinder::new(
            Arc::new(ScriptedProvider::default()),
            Arc::new(store),
            RecommendationAssembler::default(),
        );
        for record in &records {
            finder.toggle_favorite(record.clone()).await.unwrap();
        }
    }

    let reloaded = FavoritesStore::load(Arc::new(storage), "favorites").await;
    let finder = MovieFinder::new(
        Arc::new(ScriptedProvider::default()),
        Arc::new(reloaded),
        RecommendationAssembler::default(),
    );
    assert_eq!(finder.list_favorites().await, records);
    assert!(finder.favorites_reader().is_favorite("tt2").await);
}

#[tokio::test]
async fn test_favorites_capabilities_share_state() {
    let (finder, _, _) = finder_with(ScriptedProvider::default()).await;
    let writer = finder.favorites_writer();
    let reader = finder.favorites_reader();

    writer.toggle_favorite(movie("tt9", "Nine")).await.unwrap();
    assert!(reader.is_favorite("tt9").await);
    assert_eq!(reader.list().await.len(), 1);
}

#[tokio::test]
async fn test_from_config_keeps_favorites_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let favorites_dir = dir.path().join("favorites-data");
    let config = cinefind::Config::from_vars(vec![
        ("OMDB_API_KEY".to_string(), "test-key".to_string()),
        (
            "FAVORITES_DIR".to_string(),
            favorites_dir.to_string_lossy().into_owned(),
        ),
    ])
    .unwrap();

    let finder = MovieFinder::from_config(&config).await.unwrap();
    assert!(finder.toggle_favorite(movie("tt0133093", "The Matrix")).await.unwrap());

    let blob = std::fs::read_to_string(favorites_dir.join("favorites.json")).unwrap();
    assert_eq!(favorites::decode(&blob).unwrap(), vec![movie("tt0133093", "The Matrix")]);

    let reopened = MovieFinder::from_config(&config).await.unwrap();
    assert!(reopened.is_favorite("tt0133093").await);
}
