use ndarray::Array2;
use plotters::coord::Shift;
use plotters::prelude::*;

/// One quiver panel of the figure: a vector field drawn in a single colour,
/// optionally with a horizontal line marking the blocking plane.
pub struct QuiverPanel<'a> {
    pub title: &'a str,
    pub u: &'a Array2<f64>,
    pub v: &'a Array2<f64>,
    pub colour: RGBColor,
    pub plane_y: Option<f64>,
}

pub struct FlowVisualiser {
    output_dir: String,
    width: u32,
    height: u32,
}

impl FlowVisualiser {
    pub fn new(output_dir: &str, width: u32, height: u32) -> Self {
        std::fs::create_dir_all(output_dir).unwrap();

        Self {
            output_dir: output_dir.to_string(),
            width,
            height,
        }
    }

    /// Render all panels side by side into a single PNG figure.
    pub fn plot_panels(
        &self,
        x: &Array2<f64>,
        y: &Array2<f64>,
        panels: &[QuiverPanel],
        name: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let filename = format!("{}/{}.png", self.output_dir, name);
        let root = BitMapBackend::new(&filename, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let areas = root.split_evenly((1, panels.len()));
        for (area, panel) in areas.iter().zip(panels) {
            self.draw_quiver(area, x, y, panel)?;
        }

        root.present()?;
        println!("Saved figure: {}", filename);
        Ok(())
    }

    fn draw_quiver(
        &self,
        area: &DrawingArea<BitMapBackend, Shift>,
        x: &Array2<f64>,
        y: &Array2<f64>,
        panel: &QuiverPanel,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (x_min, x_max) = bounds(x);
        let (y_min, y_max) = bounds(y);

        // Pad by one cell so edge arrows stay inside the axes. All panels get
        // identical ranges, which keeps the aspect ratio equal across them.
        let cols = x.dim().1;
        let spacing = if cols > 1 {
            (x_max - x_min) / (cols - 1) as f64
        } else {
            1.0
        };
        let pad = spacing;

        let mut chart = ChartBuilder::on(area)
            .caption(panel.title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(40)
            .build_cartesian_2d(x_min - pad..x_max + pad, y_min - pad..y_max + pad)?;

        chart.configure_mesh().x_desc("x").y_desc("y").draw()?;

        if let Some(plane_y) = panel.plane_y {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(x_min - pad, plane_y), (x_max + pad, plane_y)],
                BLACK.stroke_width(2),
            )))?;
        }

        // Autoscale so the longest arrow in this panel spans about one cell,
        // like matplotlib's quiver does per axes.
        let max_mag = panel
            .u
            .iter()
            .zip(panel.v.iter())
            .map(|(&u, &v)| (u * u + v * v).sqrt())
            .fold(0.0_f64, f64::max);
        if max_mag == 0.0 {
            return Ok(());
        }
        let scale = 0.9 * spacing / max_mag;

        for ((j, i), &px) in x.indexed_iter() {
            let py = y[[j, i]];
            let du = panel.u[[j, i]] * scale;
            let dv = panel.v[[j, i]] * scale;

            let len = (du * du + dv * dv).sqrt();
            if len < 1e-12 * spacing {
                continue;
            }

            let tip = (px + du, py + dv);
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(px, py), tip],
                panel.colour.stroke_width(1),
            )))?;

            // Two short strokes for the arrow head
            let theta = dv.atan2(du);
            let head = 0.3 * len;
            let left = (
                tip.0 - head * (theta - std::f64::consts::FRAC_PI_6).cos(),
                tip.1 - head * (theta - std::f64::consts::FRAC_PI_6).sin(),
            );
            let right = (
                tip.0 - head * (theta + std::f64::consts::FRAC_PI_6).cos(),
                tip.1 - head * (theta + std::f64::consts::FRAC_PI_6).sin(),
            );
            chart.draw_series(std::iter::once(PathElement::new(
                vec![left, tip, right],
                panel.colour.stroke_width(1),
            )))?;
        }

        Ok(())
    }
}

fn bounds(data: &Array2<f64>) -> (f64, f64) {
    data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}
