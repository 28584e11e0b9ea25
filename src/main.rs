use std::env;
use std::path::PathBuf;

use view_clusterer::config::load_scene;
use view_clusterer::export;
use view_clusterer::ViewClusterer;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "view-clusterer".to_string());
    let config = parse_args(&program)?;

    let scene = load_scene(&config.scene_path)?;
    let (points, views, params) = scene.into_population();

    let mut clusterer = ViewClusterer::new(params);
    clusterer.load(points, views);
    clusterer
        .compute_information()
        .map_err(|e| e.to_string())?;
    clusterer
        .cluster_views(config.min_size, config.max_size)
        .map_err(|e| e.to_string())?;

    if config.format.includes_text() {
        print_text_summary(&clusterer);
    }
    if config.format.includes_json() {
        let json = serde_json::to_string_pretty(clusterer.final_clusters())
            .map_err(|e| format!("Failed to serialize clusters: {e}"))?;
        println!("{json}");
    }

    if let Some(path) = &config.ply_out {
        export::write_ply(&clusterer, path, config.with_points)
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        println!("PLY written to {}", path.display());
    }

    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Both,
}

impl OutputFormat {
    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "both" => Ok(Self::Both),
            other => Err(format!("Unknown format '{other}'. Use text|json|both.")),
        }
    }

    fn includes_text(&self) -> bool {
        matches!(self, Self::Text | Self::Both)
    }

    fn includes_json(&self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }
}

struct CliConfig {
    scene_path: PathBuf,
    min_size: usize,
    max_size: usize,
    format: OutputFormat,
    ply_out: Option<PathBuf>,
    with_points: bool,
}

fn parse_args(program: &str) -> Result<CliConfig, String> {
    let mut args = env::args().skip(1);
    let mut scene_path: Option<PathBuf> = None;
    let mut min_size = 2usize;
    let mut max_size = 10usize;
    let mut format = OutputFormat::Text;
    let mut ply_out: Option<PathBuf> = None;
    let mut with_points = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{}", usage(program));
                std::process::exit(0);
            }
            "--min" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--min expects a value\n{}", usage(program)))?;
                min_size = value
                    .parse()
                    .map_err(|_| format!("Invalid minimum cluster size '{value}'"))?;
            }
            "--max" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--max expects a value\n{}", usage(program)))?;
                max_size = value
                    .parse()
                    .map_err(|_| format!("Invalid maximum cluster size '{value}'"))?;
            }
            "--format" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--format expects a value\n{}", usage(program)))?;
                format = OutputFormat::from_str(&value)?;
            }
            "--ply" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--ply expects a path\n{}", usage(program)))?;
                ply_out = Some(PathBuf::from(value));
            }
            "--with-points" => {
                with_points = true;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'\n{}", usage(program)));
            }
            _ => {
                if scene_path.is_some() {
                    return Err(format!(
                        "Unexpected positional argument '{arg}'\n{}",
                        usage(program)
                    ));
                }
                scene_path = Some(PathBuf::from(arg));
            }
        }
    }

    let scene_path = scene_path.ok_or_else(|| usage(program))?;
    Ok(CliConfig {
        scene_path,
        min_size,
        max_size,
        format,
        ply_out,
        with_points,
    })
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <scene.json> [--min N] [--max N] [--format text|json|both] \\\n         [--ply out.ply] [--with-points]\n\n\
Clusters the views of a JSON scene into size-bounded groups.\n\
Examples:\n  {program} scene.json --min 2 --max 10 --format both\n  {program} scene.json --max 20 --ply clusters.ply --with-points\n"
    )
}

fn print_text_summary(clusterer: &ViewClusterer) {
    let clusters = clusterer.final_clusters();
    println!("Clusters: {}", clusters.len());
    for (i, cluster) in clusters.iter().enumerate() {
        let ids: Vec<String> = cluster.iter().map(|id| id.to_string()).collect();
        println!("  {i}: {} views [{}]", cluster.len(), ids.join(" "));
    }
}
