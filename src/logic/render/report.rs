//! Report composer
//!
//! Lays prediction, explanation, radar chart and recommendations into a
//! fixed A4-proportioned template and encodes it as one PNG. A missing
//! chart degrades to a placeholder; everything else renders from the
//! assessment alone.

use image::{imageops, RgbImage};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::{AppError, AppResult};
use crate::logic::Assessment;

use super::{draw_err, encode_png, BORDER, DANGER, DARK, DARK_RED, LIGHT, PRIMARY, SECONDARY, SUCCESS, WARNING};

pub const REPORT_WIDTH: u32 = 1240;
pub const REPORT_HEIGHT: u32 = 1754;

// Chart region inside the left analysis panel.
const CHART_POS: (i64, i64) = (40, 810);
const CHART_SIZE: (u32, u32) = (560, 410);

const MAX_RECOMMENDATIONS: usize = 6;
const MAX_DRIVERS: usize = 8;

type Area<'a> = DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>;

fn risk_color(level: crate::logic::risk::RiskLevel) -> RGBColor {
    let (r, g, b) = level.color();
    RGBColor(r, g, b)
}

fn text(area: &Area<'_>, s: &str, pos: (i32, i32), size: i32, color: &RGBColor) -> AppResult<()> {
    area.draw(&Text::new(
        s.to_string(),
        pos,
        ("sans-serif", size).into_font().color(color),
    ))
    .map_err(draw_err)
}

fn text_right(area: &Area<'_>, s: &str, pos: (i32, i32), size: i32, color: &RGBColor) -> AppResult<()> {
    let style = TextStyle::from(("sans-serif", size).into_font())
        .color(color)
        .pos(Pos::new(HPos::Right, VPos::Top));
    area.draw(&Text::new(s.to_string(), pos, style)).map_err(draw_err)
}

fn panel(area: &Area<'_>, top_left: (i32, i32), bottom_right: (i32, i32), accent: RGBColor, title: &str) -> AppResult<()> {
    area.draw(&Rectangle::new([top_left, bottom_right], WHITE.filled()))
        .map_err(draw_err)?;
    area.draw(&Rectangle::new([top_left, bottom_right], accent.stroke_width(2)))
        .map_err(draw_err)?;
    area.draw(&Rectangle::new(
        [top_left, (bottom_right.0, top_left.1 + 44)],
        accent.filled(),
    ))
    .map_err(draw_err)?;
    text(area, title, (top_left.0 + 18, top_left.1 + 10), 22, &WHITE)
}

fn header(area: &Area<'_>, assessment: &Assessment) -> AppResult<()> {
    area.draw(&Rectangle::new([(0, 0), (REPORT_WIDTH as i32, 140)], PRIMARY.filled()))
        .map_err(draw_err)?;
    text(area, "CardioInsight AI", (40, 30), 40, &WHITE)?;
    text(area, "Advanced Cardiovascular Risk Assessment", (40, 90), 20, &WHITE)?;
    let stamp = format!("Generated: {}", assessment.generated_at.format("%Y-%m-%d %H:%M UTC"));
    text_right(area, &stamp, (1210, 104), 16, &WHITE)
}

fn patient_info(area: &Area<'_>, assessment: &Assessment) -> AppResult<()> {
    panel(area, (30, 170), (1210, 480), PRIMARY, "PATIENT INFORMATION")?;

    let r = &assessment.record;
    let left: [(&str, String); 6] = [
        ("Patient ID", assessment.report_id()),
        ("Age", format!("{} years", r.age)),
        ("Gender", r.sex_description().to_string()),
        ("Chest Pain Type", r.chest_pain_description().to_string()),
        ("Resting Blood Pressure", format!("{} mmHg", r.trestbps)),
        ("Serum Cholesterol", format!("{} mg/dL", r.chol)),
    ];
    let right: [(&str, String); 6] = [
        ("Maximum Heart Rate", format!("{} bpm", r.thalach)),
        ("Exercise Induced Angina", r.exang_description().to_string()),
        ("Fasting Blood Sugar", r.fbs_description().to_string()),
        ("Resting ECG", r.ecg_description().to_string()),
        ("ST Depression", format!("{} mm", r.oldpeak)),
        ("Thalassemia", r.thal_description().to_string()),
    ];

    for (col_x, rows) in [(60, &left), (640, &right)] {
        let mut y = 236;
        for (label, value) in rows {
            text(area, &format!("{label}:"), (col_x, y), 15, &SECONDARY)?;
            text(area, value, (col_x + 250, y), 17, &DARK)?;
            y += 40;
        }
    }
    Ok(())
}

fn risk_assessment(area: &Area<'_>, assessment: &Assessment) -> AppResult<()> {
    let accent = risk_color(assessment.risk_level);
    panel(area, (30, 510), (1210, 740), accent, "RISK ASSESSMENT")?;

    text(area, "Risk Classification:", (60, 574), 15, &SECONDARY)?;
    text(area, assessment.risk_level.display(), (60, 598), 30, &accent)?;
    text(area, "Probability Score:", (60, 652), 15, &SECONDARY)?;
    text(
        area,
        &format!("{:.1}%", assessment.prediction.probability * 100.0),
        (60, 676),
        30,
        &DARK,
    )?;

    // Segmented gauge with a needle at the patient's probability
    let (gx, gy, gw, gh) = (640, 640, 500, 30);
    let segments: [(f64, f64, RGBColor); 4] = [
        (0.0, 0.2, SUCCESS),
        (0.2, 0.4, WARNING),
        (0.4, 0.75, DANGER),
        (0.75, 1.0, DARK_RED),
    ];
    for (start, end, color) in segments {
        area.draw(&Rectangle::new(
            [
                (gx + (gw as f64 * start) as i32, gy),
                (gx + (gw as f64 * end) as i32, gy + gh),
            ],
            color.filled(),
        ))
        .map_err(draw_err)?;
    }
    let needle_x = gx + (gw as f64 * assessment.prediction.probability) as i32;
    area.draw(&Polygon::new(
        vec![(needle_x - 10, gy - 20), (needle_x + 10, gy - 20), (needle_x, gy)],
        DARK.filled(),
    ))
    .map_err(draw_err)?;
    text(area, "0%", (gx, gy + gh + 8), 13, &SECONDARY)?;
    text_right(area, "100%", (gx + gw, gy + gh + 8), 13, &SECONDARY)?;
    text(
        area,
        &format!("Decision threshold: {:.0}%", assessment.prediction.threshold * 100.0),
        (640, 580),
        15,
        &SECONDARY,
    )
}

fn chart_panel(area: &Area<'_>, has_chart: bool) -> AppResult<()> {
    panel(area, (30, 760), (620, 1240), PRIMARY, "PATIENT PROFILE")?;
    if !has_chart {
        // Degraded mode: the rest of the report still renders
        let style = TextStyle::from(("sans-serif", 20).into_font())
            .color(&SECONDARY)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new("Radar chart unavailable", (325, 1000), style))
            .map_err(draw_err)?;
    }
    Ok(())
}

fn drivers_panel(area: &Area<'_>, assessment: &Assessment) -> AppResult<()> {
    panel(area, (650, 760), (1210, 1240), PRIMARY, "KEY PREDICTION DRIVERS")?;

    let ranked = assessment.explanation.ranked();
    let max_abs = ranked
        .first()
        .map(|c| c.contribution.abs())
        .filter(|m| *m > 0.0)
        .unwrap_or(1.0);

    let bar_center = 1020;
    let bar_half = 160.0;
    let mut y = 830;
    for entry in ranked.iter().take(MAX_DRIVERS) {
        text(area, &entry.name, (680, y), 16, &DARK)?;
        text(area, &format!("{}", entry.value), (800, y), 15, &SECONDARY)?;

        let len = ((entry.contribution.abs() / max_abs) * bar_half).round() as i32;
        let (x0, x1, color) = if entry.contribution >= 0.0 {
            (bar_center, bar_center + len.max(1), DANGER)
        } else {
            (bar_center - len.max(1), bar_center, SUCCESS)
        };
        area.draw(&Rectangle::new([(x0, y), (x1, y + 18)], color.filled()))
            .map_err(draw_err)?;
        area.draw(&PathElement::new(
            vec![(bar_center, y - 4), (bar_center, y + 22)],
            BORDER.stroke_width(1),
        ))
        .map_err(draw_err)?;
        y += 46;
    }

    text(
        area,
        &format!("Baseline risk: {:.1}%", assessment.explanation.baseline * 100.0),
        (680, 1200),
        15,
        &SECONDARY,
    )?;
    text(area, "bars show contribution to risk probability", (900, 1200), 13, &SECONDARY)
}

fn recommendations(area: &Area<'_>, assessment: &Assessment) -> AppResult<()> {
    panel(area, (30, 1270), (1210, 1560), PRIMARY, "CLINICAL RECOMMENDATIONS")?;

    let mut y = 1334;
    for rec in assessment.recommendations.iter().take(MAX_RECOMMENDATIONS) {
        let (r, g, b) = rec.priority.color();
        let badge_width = rec.priority.display().len() as i32 * 10 + 20;
        area.draw(&Rectangle::new(
            [(60, y), (60 + badge_width, y + 26)],
            RGBColor(r, g, b).filled(),
        ))
        .map_err(draw_err)?;
        text(area, rec.priority.display(), (70, y + 5), 14, &WHITE)?;
        text(area, &rec.text, (200, y + 4), 16, &DARK)?;
        y += 38;
    }
    Ok(())
}

fn footer(area: &Area<'_>, assessment: &Assessment) -> AppResult<()> {
    area.draw(&Rectangle::new([(30, 1590), (1210, 1730)], LIGHT.filled()))
        .map_err(draw_err)?;
    area.draw(&Rectangle::new([(30, 1590), (1210, 1730)], DANGER.stroke_width(2)))
        .map_err(draw_err)?;
    area.draw(&Rectangle::new([(30, 1590), (1210, 1630)], DANGER.filled()))
        .map_err(draw_err)?;
    text(area, "IMPORTANT MEDICAL DISCLAIMER", (48, 1598), 20, &WHITE)?;

    let lines = [
        "This AI-generated report is for clinical decision support only and must be interpreted by qualified healthcare professionals.".to_string(),
        "Results do not replace comprehensive clinical evaluation, medical history, or physical examination.".to_string(),
        format!(
            "Report ID: {} | Algorithm: Random Forest v{}",
            assessment.report_id(),
            env!("CARGO_PKG_VERSION")
        ),
    ];
    let mut y = 1644;
    for line in &lines {
        text(area, line, (48, y), 14, &DARK)?;
        y += 26;
    }
    Ok(())
}

/// Compose the full report PNG. `chart` is optional: when the radar
/// renderer failed upstream, the report still ships with a placeholder.
pub fn compose(assessment: &Assessment, chart: Option<&RgbImage>) -> AppResult<Vec<u8>> {
    let mut buf = vec![255u8; (REPORT_WIDTH * REPORT_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (REPORT_WIDTH, REPORT_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        header(&root, assessment)?;
        patient_info(&root, assessment)?;
        risk_assessment(&root, assessment)?;
        chart_panel(&root, chart.is_some())?;
        drivers_panel(&root, assessment)?;
        recommendations(&root, assessment)?;
        footer(&root, assessment)?;

        root.present().map_err(draw_err)?;
    }

    let mut img = RgbImage::from_raw(REPORT_WIDTH, REPORT_HEIGHT, buf)
        .ok_or_else(|| AppError::Render("report buffer size mismatch".to_string()))?;

    if let Some(chart) = chart {
        let resized = imageops::resize(chart, CHART_SIZE.0, CHART_SIZE.1, imageops::FilterType::Triangle);
        imageops::overlay(&mut img, &resized, CHART_POS.0, CHART_POS.1);
    }

    encode_png(&img)
}
