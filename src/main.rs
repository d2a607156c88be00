use perspective_rig::prelude::*;

fn main() {
    // Demo stub: seeds a two-point setup and generates its guide fields.
    env_logger::init();
    let mut rig = PerspectiveRig::with_defaults();
    let switch = rig.set_mode(PerspectiveMode::TwoPoint);
    if !switch.all_ok() {
        eprintln!("mode switch had failing steps: {switch:?}");
    }
    for result in [
        rig.generate_two_point_first(),
        rig.generate_two_point_second(),
        rig.generate_two_point_verticals(),
    ] {
        if let Err(err) = result {
            eprintln!("generation failed: {err}");
            std::process::exit(1);
        }
    }
    println!(
        "mode={:?} curves={} markers={}",
        rig.mode(),
        rig.scene().curve_count(),
        rig.scene().marker_count()
    );
}
