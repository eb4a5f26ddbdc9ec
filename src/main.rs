use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::io;
use std::sync::Arc;
use technotrac_match::config::{LoggingSettings, Settings};
use technotrac_match::core::{ListingMatcher, Paginator};
use technotrac_match::routes::{self, AppState};
use technotrac_match::services::{BackendClient, CacheManager};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let fmt = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match logging.format.as_str() {
        "pretty" => fmt.pretty().init(),
        _ => fmt.compact().init(),
    }
}

fn startup_error(what: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", what, err);
    io::Error::new(io::ErrorKind::InvalidInput, format!("{}: {}", what, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    // Settings come first so the logging section applies
    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;
    init_tracing(&settings.logging);

    info!("TechnoTrac matching service v{}", env!("CARGO_PKG_VERSION"));

    let backend = BackendClient::new(settings.backend.base_url.clone(), settings.backend.timeout_secs)
        .map_err(|e| startup_error("Backend client", e))?;
    info!("Marketplace backend at {}", backend.base_url());

    let cache_cfg = &settings.cache;
    let cache = match CacheManager::new(cache_cfg.redis_url.as_deref(), cache_cfg.capacity, cache_cfg.ttl_secs).await {
        Ok(cache) => cache,
        Err(e) => {
            warn!("Redis unavailable ({}), caching in-process only", e);
            CacheManager::in_memory(cache_cfg.capacity, cache_cfg.ttl_secs)
        }
    };
    info!("Cache ready: {:?}", cache.stats());

    let paginator = Paginator::new(settings.matching.page_size)
        .map_err(|e| startup_error("matching.page_size", e))?;
    let matcher = ListingMatcher::new(settings.matching.max_distance_km);
    info!(
        "Matching within {}km, {} listings per page",
        matcher.max_distance_km(),
        paginator.page_size()
    );

    let state = AppState {
        backend: Arc::new(backend),
        cache: Arc::new(cache),
        matcher,
        paginator,
        max_page_size: settings.matching.max_page_size,
    };

    let bind = (settings.server.host.clone(), settings.server.port);
    info!("Listening on {}:{}", bind.0, bind.1);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(routes::json_config())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    });

    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    server.bind(bind)?.run().await
}
