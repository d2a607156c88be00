use std::env;
use std::path::Path;

use serde::Serialize;

use perspective_rig::config::rig as rig_config;
use perspective_rig::config::write_json_file;
use perspective_rig::diagnostics::{GenerateReport, ModeSwitchReport, TrimReport};
use perspective_rig::{PerspectiveMode, PerspectiveRig};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct DemoReport {
    mode: PerspectiveMode,
    switch: ModeSwitchReport,
    generated: Vec<GenerateReport>,
    trim: Option<TrimReport>,
    markers: usize,
    curves: usize,
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = rig_config::load_config(Path::new(&config_path))?;

    let mut rig =
        PerspectiveRig::new(config.options).map_err(|e| format!("Invalid options: {e}"))?;
    let switch = rig.set_mode(config.mode);

    let mut generated = Vec::new();
    let check = |result: Result<GenerateReport, perspective_rig::RigError>| {
        result.map_err(|e| format!("Generation failed: {e}"))
    };
    match config.mode {
        PerspectiveMode::None => {}
        PerspectiveMode::OnePoint => generated.push(check(rig.generate_one_point())?),
        PerspectiveMode::TwoPoint => {
            generated.push(check(rig.generate_two_point_first())?);
            generated.push(check(rig.generate_two_point_second())?);
            generated.push(check(rig.generate_two_point_verticals())?);
        }
        PerspectiveMode::ThreePoint => generated.push(check(rig.generate_three_point())?),
        PerspectiveMode::FishEye => generated.push(check(rig.generate_fisheye())?),
    }

    let trim = config
        .camera
        .as_ref()
        .map(|camera| rig.trim_guides_to_camera(&camera.resolve()));

    let report = DemoReport {
        mode: config.mode,
        switch,
        generated,
        trim,
        markers: rig.scene().marker_count(),
        curves: rig.scene().curve_count(),
    };
    write_json_file(&report, &config.output.report_json)?;
    write_json_file(rig.scene(), &config.output.scene_json)?;
    println!(
        "mode={:?} curves={} markers={}",
        config.mode, report.curves, report.markers
    );
    Ok(())
}

fn usage() -> String {
    "Usage: rig_demo <config.json>".to_string()
}
