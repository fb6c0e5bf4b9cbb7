//! Build a sky scene from the command line and print what it contains.
//!
//! Usage:
//! ```text
//! skyview [OPTIONS]
//! skyview --time 2024-06-21T10:30:00Z --preset colored --json
//! skyview --pick 0,0,0,0,1,0
//! ```
//!
//! Without table paths the tables shipped with the crate are used.

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use skydome::catalogs::{builtin, load_catalog_csv_from_file, load_star_names_from_file};
use skydome::constellation::load_constellations_from_file;
use skydome::{ObserverContext, Ray, SkyConfig, SkyScene, StarFieldConfig, Vector3};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// White stars on the observer's horizon dome
    Classic,
    /// B−V colored stars on the fixed celestial sphere
    Colored,
}

/// Command line arguments for sky scene assembly
#[derive(Parser, Debug)]
#[command(
    name = "skyview",
    about = "Projects a star catalog for an observer and reports stars, constellations and picks",
    long_about = None
)]
struct Args {
    /// Star catalog CSV (hip,mag,ra_deg,dec_deg,bv)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Star name table JSON
    #[arg(long)]
    names: Option<PathBuf>,

    /// Constellation table JSON
    #[arg(long)]
    constellations: Option<PathBuf>,

    /// Scene configuration JSON; command-line options override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Observer latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Observer longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Observation time (RFC 3339); defaults to now
    #[arg(short, long, value_parser = parse_time)]
    time: Option<DateTime<Utc>>,

    /// Star field preset
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// Faintest magnitude to draw
    #[arg(short, long, allow_hyphen_values = true)]
    mag_limit: Option<f64>,

    /// Pick ray as ox,oy,oz,dx,dy,dz in render coordinates
    #[arg(long, value_parser = parse_ray, allow_hyphen_values = true)]
    pick: Option<Ray>,

    /// Print the scene as JSON
    #[arg(long)]
    json: bool,
}

fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 time '{s}': {e}"))
}

fn parse_ray(s: &str) -> Result<Ray, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in '{s}': {e}"))?;
    let [ox, oy, oz, dx, dy, dz] = values[..] else {
        return Err(format!(
            "expected 6 comma-separated values, got {}",
            values.len()
        ));
    };
    Ray::new(Vector3::new(ox, oy, oz), Vector3::new(dx, dy, dz))
        .ok_or_else(|| "pick direction has zero length".to_string())
}

fn scene_config(args: &Args) -> anyhow::Result<SkyConfig> {
    let mut config = match &args.config {
        Some(path) => SkyConfig::from_file(path)?,
        None => SkyConfig::default(),
    };
    if let Some(preset) = args.preset {
        config.star_field = match preset {
            Preset::Classic => StarFieldConfig::classic(),
            Preset::Colored => StarFieldConfig::colored(),
        };
    }
    if let Some(lat) = args.lat {
        if !(-90.0..=90.0).contains(&lat) {
            bail!("latitude {lat} is outside [-90, 90]");
        }
        config.observer.latitude_deg = lat;
    }
    if let Some(lon) = args.lon {
        config.observer.longitude_deg = lon;
    }
    if let Some(time) = args.time {
        config.observer.time = Some(time);
    }
    if let Some(limit) = args.mag_limit {
        config.star_field.magnitude_limit = limit;
    }
    Ok(config)
}

fn print_summary(scene: &SkyScene, observer: &ObserverContext) {
    println!(
        "Observer {:.4}°, {:.4}° at {}",
        observer.latitude_deg,
        observer.longitude_deg,
        observer.instant.to_rfc3339()
    );
    println!("Local sidereal time: {:.4}°", scene.frame.lst_deg);
    let drift = if scene.is_time_dependent() {
        "rebuild when the time changes"
    } else {
        "independent of time"
    };
    println!("Projection: {:?}, {drift}", scene.projection);

    let stats = &scene.star_field.stats;
    println!(
        "Stars: {} drawn, {} invalid, {} too faint, {} below horizon",
        stats.admitted,
        stats.invalid,
        stats.too_faint,
        stats.below_horizon
    );
    for star in scene.star_field.stars.iter().filter(|s| s.name.is_some()) {
        let alt = star
            .altitude_deg
            .map(|a| format!(" alt {a:6.2}°"))
            .unwrap_or_default();
        println!(
            "  {:<16} HIP {:<7} mag {:5.2} size {:4.2}{}",
            star.display_name().unwrap_or_default(),
            star.id,
            star.magnitude,
            star.size,
            alt
        );
    }

    println!("Constellations: {}", scene.constellations.len());
    for figure in &scene.constellations {
        println!(
            "  {:<30} {:<8} {} stars",
            figure.name,
            figure.shape.kind(),
            figure.members.len()
        );
    }
    for name in &scene.skipped_constellations {
        println!("  {name:<30} not visible");
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = scene_config(&args)?;

    let catalog = match &args.catalog {
        Some(path) => load_catalog_csv_from_file(path)?,
        None => builtin::bright_stars().context("loading built-in catalog")?,
    };
    let names = match &args.names {
        Some(path) => load_star_names_from_file(path)?,
        None => builtin::star_names().context("loading built-in star names")?,
    };
    let figures = match &args.constellations {
        Some(path) => load_constellations_from_file(path)?,
        None => builtin::constellations().context("loading built-in constellations")?,
    };

    let observer = config.observer.context();
    let scene = SkyScene::build(&catalog, &names, &figures, &observer, &config);
    let hit = args.pick.as_ref().and_then(|ray| scene.pick(ray));

    if args.json {
        let stars: Vec<_> = scene
            .star_field
            .stars
            .iter()
            .map(|s| {
                json!({
                    "id": s.id,
                    "name": s.name,
                    "magnitude": s.magnitude,
                    "position": [s.position.x, s.position.y, s.position.z],
                    "size": s.size,
                    "color": s.color,
                    "altitude_deg": s.altitude_deg,
                })
            })
            .collect();
        let constellations: Vec<_> = scene
            .constellations
            .iter()
            .map(|c| {
                json!({
                    "name": c.name,
                    "shape": c.shape.kind(),
                    "members": c.members,
                    "vertices": c.shape.vertex_count(),
                    "outline_segments": c.outline.len(),
                })
            })
            .collect();
        let out = json!({
            "instant": observer.instant,
            "latitude_deg": observer.latitude_deg,
            "longitude_deg": observer.longitude_deg,
            "lst_deg": scene.frame.lst_deg,
            "projection": scene.projection,
            "time_dependent": scene.is_time_dependent(),
            "stats": scene.star_field.stats,
            "stars": stars,
            "constellations": constellations,
            "skipped_constellations": scene.skipped_constellations,
            "pick": hit,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_summary(&scene, &observer);
    if let Some(ray) = &args.pick {
        match &hit {
            Some(hit) => {
                let p = ray.at(hit.distance);
                println!(
                    "Pick: {} at {:.1} ({:.1}, {:.1}, {:.1})",
                    hit.display_name().unwrap_or("unnamed star"),
                    hit.distance,
                    p.x,
                    p.y,
                    p.z
                );
            }
            None => println!("Pick: nothing"),
        }
    }
    Ok(())
}
