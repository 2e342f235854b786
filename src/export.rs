use std::fs;
use std::io;
use std::path::Path;

use plotters::prelude::*;

use crate::core::ballistics::{FlightResult, TrajectorySample};
use crate::core::window::flight_axis_window;
use crate::error::{Result, SimError};
use crate::scenario::ScenarioReport;

pub const DEFAULT_CSV_PATH: &str = "flight_data.csv";
pub const CSV_HEADER: [&str; 4] = ["Time(s)", "X(m)", "Y(m)", "Speed(m/s)"];

const PLOT_SIZE_PX: (u32, u32) = (960, 540);

fn csv_row(sample: &TrajectorySample) -> [String; 4] {
    [
        format!("{:.1}", sample.time_s),
        format!("{:.2}", sample.x_m),
        format!("{:.3}", sample.y_m),
        format!("{:.2}", sample.speed_mps),
    ]
}

pub fn write_csv<W: io::Write>(samples: &[TrajectorySample], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;
    for sample in samples {
        csv.write_record(csv_row(sample))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn export_csv(path: impl AsRef<Path>, samples: &[TrajectorySample]) -> Result<()> {
    let file = fs::File::create(path)?;
    write_csv(samples, io::BufWriter::new(file))
}

fn plot_error<E: std::fmt::Display>(err: E) -> SimError {
    SimError::Plot(err.to_string())
}

pub fn plot_caption(report: &ScenarioReport) -> String {
    format!(
        "{} at {:.1} deg: {:.2} N impact ({})",
        report.bird,
        report.parameters.launch_angle_deg,
        report.impact_force_n,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    )
}

/// Draws the flight path as an SVG document, landing point marked.
pub fn render_trajectory_svg(flight: &FlightResult, caption: &str) -> Result<String> {
    let (x_span, y_span) = flight_axis_window(flight);
    let landing = flight.last_sample();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, PLOT_SIZE_PX).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 22))
            .margin(16)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..x_span, 0.0..y_span)
            .map_err(plot_error)?;

        chart
            .configure_mesh()
            .x_desc("X (m)")
            .y_desc("Y (m)")
            .draw()
            .map_err(plot_error)?;

        chart
            .draw_series(LineSeries::new(
                flight.samples().iter().map(|s| (s.x_m, s.y_m)),
                &BLUE,
            ))
            .map_err(plot_error)?;
        chart
            .draw_series(std::iter::once(Circle::new(
                (landing.x_m, landing.y_m),
                5,
                RED.filled(),
            )))
            .map_err(plot_error)?;

        root.present().map_err(plot_error)?;
    }
    Ok(svg)
}

pub fn export_plot(path: impl AsRef<Path>, report: &ScenarioReport) -> Result<()> {
    let svg = render_trajectory_svg(&report.flight, &plot_caption(report))?;
    fs::write(path, svg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ballistics::{SimulationParameters, simulate};

    fn reference_flight() -> FlightResult {
        simulate(SimulationParameters::new(1.0, 10.0, 45.0).expect("valid parameters"))
    }

    #[test]
    fn csv_uses_fixed_header_and_precision() {
        let mut out = Vec::new();
        write_csv(reference_flight().samples(), &mut out).expect("in-memory write");
        let text = String::from_utf8(out).expect("utf8 csv");
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("Time(s),X(m),Y(m),Speed(m/s)"));
        assert_eq!(lines.next(), Some("0.0,0.00,0.000,10.00"));
        assert_eq!(text.lines().count(), 1 + 28);
    }

    #[test]
    fn svg_contains_caption() {
        let svg = render_trajectory_svg(&reference_flight(), "Stella test").expect("svg render");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Stella test"));
    }
}
