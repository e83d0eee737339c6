use anyhow::{bail, Context};
use clap::Parser;
use routing_hybrid::{
    sdk::config::EngineConfig,
    sdk::geo::GeoPoint,
    sdk::map::InMemoryScene,
    sdk::routing::{
        BackendSelector, ConnectivitySignal, LocalOrsProvider, RemoteOrsProvider, RouteOptions,
        TransportMode,
    },
    sdk::session::{Notification, RoutingSession, ROUTE_DETAILS_TITLE},
    sdk::util::log::init_logging,
};
use std::{fs::File, io::Write, path::PathBuf, sync::Arc};

/// Calculates a route with the online or offline engine and reports it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Route with the offline engine instead of the online one
    #[arg(long)]
    offline: bool,

    /// Start coordinate as LAT,LON (random near --center if omitted)
    #[arg(long, requires = "to")]
    from: Option<GeoPoint>,

    /// Destination coordinate as LAT,LON
    #[arg(long, requires = "from")]
    to: Option<GeoPoint>,

    /// Via point as LAT,LON; repeat for several
    #[arg(long)]
    via: Vec<GeoPoint>,

    /// Add two random via points after the first route
    #[arg(long, conflicts_with = "via")]
    random_waypoints: bool,

    /// car, truck, bicycle or pedestrian
    #[arg(long, default_value = "car")]
    mode: TransportMode,

    /// Map view center used for random points
    #[arg(long)]
    center: Option<GeoPoint>,

    /// Seed for the random points
    #[arg(long)]
    seed: Option<u64>,

    /// Write the overlays left on the map as GeoJSON
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn show(notification: &Notification) {
    log::info!("[{}] {}", notification.title, notification.message);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    init_logging(cli.verbose);

    // --- Engines: both must start, like the app does on launch ---
    let config = EngineConfig::from_env()?;
    let online = RemoteOrsProvider::from_config(&config).context("Failed to start online engine")?;
    let offline =
        LocalOrsProvider::new(&config.offline_url).context("Failed to start offline engine")?;
    log::info!("Offline engine at {}", offline.base_url());

    let selector = BackendSelector::new(
        Arc::new(online),
        Arc::new(offline),
        ConnectivitySignal::new(!cli.offline),
    );

    let mut scene = InMemoryScene::default();
    if let Some(center) = cli.center {
        scene.look_at(center);
    }

    let mut session = RoutingSession::new(selector, scene)
        .with_options(RouteOptions::car().with_mode(cli.mode));
    if let Some(seed) = cli.seed {
        session = session.with_seed(seed);
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    let note = if cli.offline {
        session.switch_offline()
    } else {
        session.switch_online()
    };
    show(&note);

    // --- Route ---
    let details = runtime.block_on(async {
        match (cli.from, cli.to) {
            (Some(from), Some(to)) => session.add_route_between(from, to).await,
            _ => session.add_route().await,
        }
    });
    show(&details);
    if details.title != ROUTE_DETAILS_TITLE {
        bail!("{}", details.message);
    }

    if !cli.via.is_empty() || cli.random_waypoints {
        let via = cli.via.clone();
        let details = runtime.block_on(async {
            if via.is_empty() {
                session.add_waypoints().await
            } else {
                session.add_waypoints_via(via).await
            }
        });
        show(&details);
    }

    // --- Output ---
    let live = session.overlays().live();
    log::info!(
        "Map shows {} marker(s) and {} polyline(s)",
        live.markers.len(),
        live.polylines.len()
    );

    if let Some(path) = &cli.geojson {
        let json_output = serde_json::to_string_pretty(&session.overlays().scene().to_geojson())?;
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(json_output.as_bytes())?;
        log::info!("Overlays written to {}", path.display());
    }

    Ok(())
}
