//! Radar chart: patient values against population averages
//!
//! Five axes (age, resting BP, cholesterol, max heart rate, ST
//! depression), each normalized to percent of its axis maximum so the
//! two polygons share one scale.

use std::f64::consts::PI;

use image::RgbImage;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::{AppError, AppResult};
use crate::logic::features::FeatureVector;
use crate::logic::population::{to_percent, RADAR_AXES};

use super::{draw_err, DARK, SECONDARY, TEAL};

pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 640;

const CENTER: (i32, i32) = (400, 350);
const RADIUS: f64 = 230.0;

/// Point on axis `i` at `pct` percent of the radius.
fn axis_point(i: usize, pct: f64) -> (i32, i32) {
    let angle = -PI / 2.0 + (i as f64) * 2.0 * PI / RADAR_AXES.len() as f64;
    let r = RADIUS * pct / 100.0;
    (
        CENTER.0 + (r * angle.cos()).round() as i32,
        CENTER.1 + (r * angle.sin()).round() as i32,
    )
}

fn closed_ring(percents: &[f64]) -> Vec<(i32, i32)> {
    let mut pts: Vec<(i32, i32)> = percents
        .iter()
        .enumerate()
        .map(|(i, &p)| axis_point(i, p))
        .collect();
    if let Some(first) = pts.first().copied() {
        pts.push(first);
    }
    pts
}

/// Draw the radar chart for one patient vector (raw units).
pub fn render(vector: &FeatureVector) -> AppResult<RgbImage> {
    let patient: Vec<f64> = RADAR_AXES
        .iter()
        .map(|axis| to_percent(axis, vector.raw_by_name(axis.name).unwrap_or_default()))
        .collect();
    let population: Vec<f64> = RADAR_AXES
        .iter()
        .map(|axis| to_percent(axis, axis.average))
        .collect();

    let mut buf = vec![255u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        // Grid rings and spokes
        for ring in [20.0, 40.0, 60.0, 80.0, 100.0] {
            let pts = closed_ring(&vec![ring; RADAR_AXES.len()]);
            root.draw(&PathElement::new(pts, RGBColor(203, 213, 225)))
                .map_err(draw_err)?;
        }
        for i in 0..RADAR_AXES.len() {
            root.draw(&PathElement::new(
                vec![CENTER, axis_point(i, 100.0)],
                RGBColor(203, 213, 225),
            ))
            .map_err(draw_err)?;
        }

        // Axis labels just beyond the outer ring
        let label_style = TextStyle::from(("sans-serif", 18).into_font())
            .color(&DARK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for (i, axis) in RADAR_AXES.iter().enumerate() {
            let (x, y) = axis_point(i, 116.0);
            root.draw(&Text::new(axis.name, (x, y), label_style.clone()))
                .map_err(draw_err)?;
        }

        // Population polygon underneath, patient polygon on top
        let pop_pts = closed_ring(&population);
        root.draw(&Polygon::new(pop_pts.clone(), BLACK.mix(0.12).filled()))
            .map_err(draw_err)?;
        root.draw(&PathElement::new(pop_pts, SECONDARY.stroke_width(2)))
            .map_err(draw_err)?;

        let patient_pts = closed_ring(&patient);
        root.draw(&Polygon::new(patient_pts.clone(), TEAL.mix(0.35).filled()))
            .map_err(draw_err)?;
        root.draw(&PathElement::new(patient_pts, TEAL.stroke_width(2)))
            .map_err(draw_err)?;

        // Title and legend
        root.draw(&Text::new(
            "Patient vs. Population Averages (Normalized %)",
            (20, 20),
            ("sans-serif", 24).into_font().color(&DARK),
        ))
        .map_err(draw_err)?;

        root.draw(&Rectangle::new([(590, 60), (610, 76)], TEAL.filled()))
            .map_err(draw_err)?;
        root.draw(&Text::new(
            "Patient Values",
            (618, 61),
            ("sans-serif", 16).into_font().color(&DARK),
        ))
        .map_err(draw_err)?;
        root.draw(&Rectangle::new([(590, 88), (610, 104)], BLACK.mix(0.2).filled()))
            .map_err(draw_err)?;
        root.draw(&Text::new(
            "Population Averages",
            (618, 89),
            ("sans-serif", 16).into_font().color(&DARK),
        ))
        .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, buf)
        .ok_or_else(|| AppError::Render("radar buffer size mismatch".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::demo;
    use crate::logic::record::ClinicalRecord;

    fn sample_vector() -> FeatureVector {
        let record = ClinicalRecord {
            age: 52,
            sex: 1,
            cp: 0,
            trestbps: 125,
            chol: 212,
            fbs: 0,
            restecg: 1,
            thalach: 168,
            exang: 0,
            oldpeak: 1.0,
            slope: 2,
            ca: 2,
            thal: 3,
        };
        FeatureVector::build(&record, &demo::demo_scaler()).unwrap()
    }

    #[test]
    fn test_axis_points_stay_on_canvas() {
        for i in 0..RADAR_AXES.len() {
            let (x, y) = axis_point(i, 100.0);
            assert!(x >= 0 && x < CHART_WIDTH as i32);
            assert!(y >= 0 && y < CHART_HEIGHT as i32);
        }
    }

    #[test]
    fn test_render_produces_canvas_of_expected_size() {
        let img = render(&sample_vector()).unwrap();
        assert_eq!(img.dimensions(), (CHART_WIDTH, CHART_HEIGHT));
    }

    #[test]
    fn test_render_draws_something() {
        let img = render(&sample_vector()).unwrap();
        let non_white = img.pixels().filter(|p| p.0 != [255, 255, 255]).count();
        assert!(non_white > 1000, "chart appears blank ({non_white} colored pixels)");
    }
}
