use fan_flow_modeller::config::Config;
use fan_flow_modeller::flow::FlowField;
use fan_flow_modeller::grid::Grid;
use fan_flow_modeller::visualisation::{FlowVisualiser, QuiverPanel};
use plotters::style::colors::{BLUE, RED};

fn main() {
    // Optional TOML config path; without one, run the canonical parameters
    // (20x20 grid over [-5, 5]²).
    let config = match std::env::args().nth(1) {
        Some(path) => match Config::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    config.print_summary();

    let grid = Grid::new(config.grid.n, config.grid.min, config.grid.max);
    let (x, y) = grid.meshgrid();

    // Open-air fan flow, and the same flow with the vertical component
    // blocked above the plane.
    let open = FlowField::radial(&x, &y, config.flow.epsilon);
    let mut blocked = FlowField::radial(&x, &y, config.flow.epsilon);
    blocked.block_above(&y, config.flow.plane_y);

    let visualiser = FlowVisualiser::new(
        &config.visualization.output_dir,
        config.visualization.image_width,
        config.visualization.image_height,
    );

    let panels = [
        QuiverPanel {
            title: "Fan in Open Air",
            u: &open.u,
            v: &open.v,
            colour: BLUE,
            plane_y: None,
        },
        QuiverPanel {
            title: "Fan Blocked by Plane",
            u: &blocked.u,
            v: &blocked.v,
            colour: RED,
            plane_y: Some(config.flow.plane_y),
        },
    ];

    if let Err(e) = visualiser.plot_panels(&x, &y, &panels, "fan_flow") {
        eprintln!("Error: failed to render figure: {}", e);
        std::process::exit(1);
    }
}
