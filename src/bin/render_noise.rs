//! Noise renderer binary: builds a graph from a JSON config and writes one
//! generator to a grayscale PNG.
//!
//! Usage: cargo run --release --bin render_noise -- --config <FILE> --generator <NAME> [OPTIONS]
//!
//! Options:
//!   --config <FILE>      Graph configuration (JSON)
//!   --generator <NAME>   Generator to render
//!   --size <PIXELS>      Image width and height (default: 256)
//!   --bounds <X0,Y0,X1,Y1>  Region of the noise plane (default: 0,0,6,6)
//!   --range <LOW,HIGH>   Value range mapped to black..white (default: -1,1)
//!   --output <FILE>      Output PNG (default: noise.png)

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use noisegraph::graph::{NoiseConfig, NoiseGraph};
use noisegraph::raster::{Bounds, NoiseMapBuilder};

fn main() -> ExitCode {
    noisegraph::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(config_path) = parse_str_arg(&args, "--config").map(PathBuf::from) else {
        eprintln!("missing --config <FILE>");
        return ExitCode::FAILURE;
    };
    let Some(name) = parse_str_arg(&args, "--generator") else {
        eprintln!("missing --generator <NAME>");
        return ExitCode::FAILURE;
    };
    let size = parse_usize_arg(&args, "--size").unwrap_or(256);
    let bounds = parse_f64_list(&args, "--bounds")
        .and_then(|v| <[f64; 4]>::try_from(v).ok())
        .map(|[x0, y0, x1, y1]| Bounds::new(x0, y0, x1, y1))
        .unwrap_or(Bounds::new(0.0, 0.0, 6.0, 6.0));
    let (low, high) = parse_f64_list(&args, "--range")
        .and_then(|v| <[f64; 2]>::try_from(v).ok())
        .map(|[lo, hi]| (lo, hi))
        .unwrap_or((-1.0, 1.0));
    let output = parse_str_arg(&args, "--output").unwrap_or_else(|| "noise.png".to_string());

    println!("=== Noisegraph Renderer ===");
    println!("Config:    {}", config_path.display());
    println!("Generator: {}", name);
    println!("Size:      {} x {}", size, size);
    println!("Bounds:    ({}, {}) .. ({}, {})", bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y);
    println!("Range:     {} .. {}", low, high);
    println!();

    let config = match NoiseConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {}", config_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let graph = match NoiseGraph::build(config, None) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Failed to build noise graph: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(sampler) = graph.generator(&name) else {
        let known: Vec<&str> = graph.generator_names().collect();
        eprintln!("No generator named \"{}\" (available: {})", name, known.join(", "));
        return ExitCode::FAILURE;
    };

    let map = NoiseMapBuilder::new(sampler, size, size).with_bounds(bounds).build();
    let elapsed = start.elapsed();

    if let Some((lo, hi)) = map.min_max() {
        println!("Values:    {:.4} .. {:.4}", lo, hi);
    }
    println!("Sampled {} points in {:.1}ms", size * size, elapsed.as_secs_f64() * 1000.0);

    if let Err(e) = map.save_png(Path::new(&output), low, high) {
        eprintln!("Failed to write {}: {}", output, e);
        return ExitCode::FAILURE;
    }

    println!("Output:    {}", output);
    ExitCode::SUCCESS
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Comma separated floats, e.g. `--bounds 0,0,6,6`.
fn parse_f64_list(args: &[String], flag: &str) -> Option<Vec<f64>> {
    let raw = parse_str_arg(args, flag)?;
    raw.split(',').map(|s| s.trim().parse().ok()).collect()
}
