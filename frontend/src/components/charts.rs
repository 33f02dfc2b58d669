//! Dashboard charts, drawn directly on HTML5 canvas.
//!
//! Each draw call starts by clearing the whole canvas, so a redraw never
//! stacks on a previous render. Layout math lives in plain functions so
//! it is testable off the browser.

use shared::models::{ArrearsRow, IncomeSlice, translate_fee_type};
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Material palette carried over from the estate's visual language.
const PIE_COLORS: [&str; 5] = ["#006064", "#0097A7", "#4DD0E1", "#B2EBF2", "#FF5722"];
const BAR_COLOR: &str = "#D32F2F";
const AXIS_COLOR: &str = "#757575";
const GRID_COLOR: &str = "#EEEEEE";
const EMPTY_COLOR: &str = "#9E9E9E";

/// Start/end angle of each pie slice, proportional to its value.
/// Non-positive totals yield no slices.
fn slice_angles(values: &[f64]) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().filter(|value| **value > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut angles = Vec::with_capacity(values.len());
    let mut cursor = -PI / 2.0;
    for value in values {
        let sweep = if *value > 0.0 {
            value / total * 2.0 * PI
        } else {
            0.0
        };
        angles.push((cursor, cursor + sweep));
        cursor += sweep;
    }
    angles
}

/// Pixel height of each bar scaled into `max_height`, tallest bar full.
fn bar_heights(counts: &[i64], max_height: f64) -> Vec<f64> {
    let tallest = counts.iter().copied().max().unwrap_or(0);
    if tallest <= 0 {
        return counts.iter().map(|_| 0.0).collect();
    }
    counts
        .iter()
        .map(|count| (*count as f64) / (tallest as f64) * max_height)
        .collect()
}

fn context_of(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|object| object.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn draw_empty_notice(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.set_fill_style_str(EMPTY_COLOR);
    ctx.set_font("14px sans-serif");
    let _ = ctx.fill_text("暂无数据", width / 2.0 - 28.0, height / 2.0);
}

/// Income-by-fee-type pie with a legend row underneath.
pub fn draw_income_pie(canvas: &HtmlCanvasElement, slices: &[IncomeSlice]) {
    let Some(ctx) = context_of(canvas) else {
        return;
    };
    let width = f64::from(canvas.width());
    let height = f64::from(canvas.height());
    ctx.clear_rect(0.0, 0.0, width, height);

    let values: Vec<f64> = slices.iter().map(|slice| slice.total_amount).collect();
    let angles = slice_angles(&values);
    if angles.is_empty() {
        draw_empty_notice(&ctx, width, height);
        return;
    }

    let legend_height = 24.0;
    let cx = width / 2.0;
    let cy = (height - legend_height) / 2.0;
    let radius = (cy.min(cx) - 10.0).max(10.0);

    for (index, (start, end)) in angles.iter().enumerate() {
        if end <= start {
            continue;
        }
        ctx.set_fill_style_str(PIE_COLORS[index % PIE_COLORS.len()]);
        ctx.begin_path();
        ctx.move_to(cx, cy);
        let _ = ctx.arc(cx, cy, radius, *start, *end);
        ctx.close_path();
        ctx.fill();
    }

    // Legend: swatch plus translated fee type.
    ctx.set_font("12px sans-serif");
    let mut x = 10.0;
    let y = height - 8.0;
    for (index, slice) in slices.iter().enumerate() {
        ctx.set_fill_style_str(PIE_COLORS[index % PIE_COLORS.len()]);
        ctx.fill_rect(x, y - 9.0, 10.0, 10.0);
        ctx.set_fill_style_str(AXIS_COLOR);
        let label = translate_fee_type(&slice.fee_type);
        let _ = ctx.fill_text(label, x + 14.0, y);
        x += 14.0 + 13.0 * (label.chars().count() as f64) + 12.0;
    }
}

/// Unpaid-count-per-building bar chart.
pub fn draw_arrears_bars(canvas: &HtmlCanvasElement, rows: &[ArrearsRow]) {
    let Some(ctx) = context_of(canvas) else {
        return;
    };
    let width = f64::from(canvas.width());
    let height = f64::from(canvas.height());
    ctx.clear_rect(0.0, 0.0, width, height);

    if rows.is_empty() {
        draw_empty_notice(&ctx, width, height);
        return;
    }

    let margin_left = 34.0;
    let margin_bottom = 24.0;
    let margin_top = 10.0;
    let chart_width = width - margin_left - 10.0;
    let chart_height = height - margin_top - margin_bottom;

    // Horizontal grid.
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(1.0);
    let tallest = rows.iter().map(|row| row.unpaid_count).max().unwrap_or(0);
    for step in 0..=4 {
        let y = margin_top + f64::from(step) / 4.0 * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - 10.0, y);
        ctx.stroke();

        let value = (tallest as f64) * (1.0 - f64::from(step) / 4.0);
        ctx.set_fill_style_str(AXIS_COLOR);
        ctx.set_font("11px sans-serif");
        let _ = ctx.fill_text(&format!("{value:.0}"), 6.0, y + 4.0);
    }

    let counts: Vec<i64> = rows.iter().map(|row| row.unpaid_count).collect();
    let heights = bar_heights(&counts, chart_height);
    let slot = chart_width / rows.len() as f64;
    let bar_width = slot * 0.5;

    ctx.set_font("12px sans-serif");
    for (index, (row, bar_height)) in rows.iter().zip(&heights).enumerate() {
        let x = margin_left + slot * index as f64 + (slot - bar_width) / 2.0;
        let y = margin_top + chart_height - bar_height;
        ctx.set_fill_style_str(BAR_COLOR);
        ctx.fill_rect(x, y, bar_width, *bar_height);

        ctx.set_fill_style_str(AXIS_COLOR);
        let label = format!("{}#", row.building_no);
        let _ = ctx.fill_text(&label, x + bar_width / 2.0 - 8.0, height - 8.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_angles_cover_the_full_circle() {
        let angles = slice_angles(&[1.0, 1.0, 2.0]);
        assert_eq!(angles.len(), 3);
        let total_sweep: f64 = angles.iter().map(|(start, end)| end - start).sum();
        assert!((total_sweep - 2.0 * PI).abs() < 1e-9);
        // The 2.0 slice is half the circle.
        assert!(((angles[2].1 - angles[2].0) - PI).abs() < 1e-9);
    }

    #[test]
    fn slice_angles_skip_non_positive_values() {
        let angles = slice_angles(&[3.0, 0.0, -1.0]);
        assert_eq!(angles.len(), 3);
        assert_eq!(angles[1].0, angles[1].1);
        assert_eq!(angles[2].0, angles[2].1);
    }

    #[test]
    fn slice_angles_empty_when_nothing_to_show() {
        assert!(slice_angles(&[]).is_empty());
        assert!(slice_angles(&[0.0, 0.0]).is_empty());
    }

    #[test]
    fn bar_heights_scale_to_the_tallest() {
        let heights = bar_heights(&[2, 4, 1], 100.0);
        assert_eq!(heights, vec![50.0, 100.0, 25.0]);
    }

    #[test]
    fn bar_heights_handle_all_zero_rows() {
        assert_eq!(bar_heights(&[0, 0], 100.0), vec![0.0, 0.0]);
    }
}
