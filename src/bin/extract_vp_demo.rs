use std::env;
use std::path::Path;

use perspective_rig::config::extract as extract_config;
use perspective_rig::config::write_json_file;
use perspective_rig::intersect::{near_intersection, SolveOutcome};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = extract_config::load_config(Path::new(&config_path))?;

    let (first, second) = config.segments();
    let outcome = near_intersection(&first, &second, config.tolerance);
    write_json_file(&outcome, &config.output.result_json)?;

    match &outcome {
        SolveOutcome::Intersection { point, closest } => println!(
            "intersection at ({:.4}, {:.4}, {:.4}), closest approach {:.6}",
            point.x,
            point.y,
            point.z,
            closest.distance()
        ),
        SolveOutcome::Skew { closest } => println!(
            "no intersection: closest approach {:.6} exceeds tolerance {:.6}",
            closest.distance(),
            config.tolerance
        ),
        SolveOutcome::Degenerate(kind) => println!("no solution: {kind:?}"),
    }
    Ok(())
}

fn usage() -> String {
    "Usage: extract_vp_demo <config.json>".to_string()
}
