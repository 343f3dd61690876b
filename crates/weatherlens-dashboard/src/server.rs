//! warp routes for the dashboard.

use std::net::SocketAddr;

use warp::Filter;
use weatherlens_core::StoreConfig;
use weatherlens_store::ReadingStore;

use crate::aggregate::{self, EmptyDataset};
use crate::render;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct DashboardState<S> {
    store: S,
    yandex_collection: String,
    openweather_collection: String,
}

impl<S> DashboardState<S> {
    pub fn new(store: S, config: &StoreConfig) -> Self {
        Self {
            store,
            yandex_collection: config.yandex_collection.clone(),
            openweather_collection: config.openweather_collection.clone(),
        }
    }
}

/// Build the dashboard routes: `GET /` and `GET /about`.
pub fn routes<S>(
    state: DashboardState<S>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
where
    S: ReadingStore + Clone + Send + Sync + 'static,
{
    let dashboard = warp::get()
        .and(warp::path::end())
        .and(with_state(state))
        .and_then(dashboard_handler);

    let about = warp::get()
        .and(warp::path("about"))
        .and(warp::path::end())
        .map(|| warp::reply::html(render::about_page()));

    dashboard.or(about)
}

/// Serve the dashboard until the process exits.
pub async fn serve<S>(state: DashboardState<S>, addr: SocketAddr)
where
    S: ReadingStore + Clone + Send + Sync + 'static,
{
    warp::serve(routes(state)).run(addr).await;
}

fn with_state<S>(
    state: DashboardState<S>,
) -> impl Filter<Extract = (DashboardState<S>,), Error = std::convert::Infallible> + Clone
where
    S: Clone + Send,
{
    warp::any().map(move || state.clone())
}

/// Query failures render as an error page rather than a bare 500, so
/// the dashboard stays navigable while the store is down.
async fn dashboard_handler<S>(
    state: DashboardState<S>,
) -> Result<impl warp::Reply, warp::Rejection>
where
    S: ReadingStore,
{
    let openweather = state
        .store
        .find_ordered_by_timestamp(&state.openweather_collection)
        .await;
    let yandex = state
        .store
        .find_ordered_by_timestamp(&state.yandex_collection)
        .await;

    let html = match (openweather, yandex) {
        (Ok(openweather), Ok(yandex)) => match aggregate::aggregate(&openweather, &yandex) {
            Ok(data) => match render::dashboard_page(&data) {
                Ok(page) => page,
                Err(error) => {
                    tracing::error!(%error, "Chart serialization failed");
                    render::error_page(&error.to_string())
                }
            },
            Err(EmptyDataset) => render::no_data_page(),
        },
        (Err(error), _) | (_, Err(error)) => {
            tracing::error!(%error, "Store query failed");
            render::error_page(&error.to_string())
        }
    };

    Ok(warp::reply::html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherlens_providers::{Coordinates, MainConditions, NormalizedReading, Wind};
    use weatherlens_store::MemoryStore;

    fn reading(timestamp: i64) -> NormalizedReading {
        NormalizedReading {
            location: Some("Sochi".to_string()),
            timestamp,
            coordinates: Coordinates {
                latitude: 43.6,
                longitude: 39.73,
            },
            main: MainConditions {
                temperature: 20.0,
                humidity: 60.0,
                pressure: 1015.0,
                feels_like: None,
                temperature_min: None,
                temperature_max: None,
                sea_level: None,
                ground_level: None,
                cloudiness: None,
                visibility: None,
            },
            visibility: Some(10_000.0),
            wind: Wind {
                speed: 3.0,
                direction: 180.0,
                gust: None,
            },
            precipitation: None,
            condition: None,
            clouds: None,
            sun: None,
            weather: None,
        }
    }

    async fn seeded_state() -> DashboardState<MemoryStore> {
        let store = MemoryStore::new();
        let config = StoreConfig::default();
        store
            .append(&config.openweather_collection, &reading(100))
            .await
            .unwrap();
        store
            .append(&config.yandex_collection, &reading(200))
            .await
            .unwrap();
        DashboardState::new(store, &config)
    }

    #[tokio::test]
    async fn test_dashboard_renders_charts_with_data() {
        let filter = routes(seeded_state().await);

        let response = warp::test::request().path("/").reply(&filter).await;

        assert_eq!(response.status(), 200);
        let body = String::from_utf8_lossy(response.body());
        assert!(body.contains("Plotly.newPlot"));
        assert!(body.contains("OpenWeather Temperature"));
        assert!(body.contains("Yandex Pressure"));
    }

    #[tokio::test]
    async fn test_empty_store_shows_no_data_notice() {
        let state = DashboardState::new(MemoryStore::new(), &StoreConfig::default());
        let filter = routes(state);

        let response = warp::test::request().path("/").reply(&filter).await;

        assert_eq!(response.status(), 200);
        let body = String::from_utf8_lossy(response.body());
        assert!(body.contains("No weather data available."));
    }

    #[tokio::test]
    async fn test_one_empty_collection_shows_no_data_notice() {
        let store = MemoryStore::new();
        let config = StoreConfig::default();
        store
            .append(&config.openweather_collection, &reading(100))
            .await
            .unwrap();
        let filter = routes(DashboardState::new(store, &config));

        let response = warp::test::request().path("/").reply(&filter).await;

        let body = String::from_utf8_lossy(response.body());
        assert!(body.contains("No weather data available."));
    }

    #[tokio::test]
    async fn test_about_page_is_served() {
        let filter = routes(seeded_state().await);

        let response = warp::test::request().path("/about").reply(&filter).await;

        assert_eq!(response.status(), 200);
        let body = String::from_utf8_lossy(response.body());
        assert!(body.contains("About"));
        assert!(body.contains("Yandex Weather"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let filter = routes(seeded_state().await);

        let response = warp::test::request().path("/missing").reply(&filter).await;

        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_post_to_dashboard_is_rejected() {
        let filter = routes(seeded_state().await);

        let response = warp::test::request()
            .method("POST")
            .path("/")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), 405);
    }
}
