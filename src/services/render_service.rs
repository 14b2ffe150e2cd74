use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::models::{GlobalIndicators, Report};
use crate::utils::{format_pct, format_usd, GridLayout};

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to render dashboard: {0}")]
    Draw(String),
}

const TITLE: &str = "Mint Condition Cryptocurrency Dashboard";
const COLUMN_HEADERS: [&str; 4] = ["Coin", "Price", "Week Change", "This Year"];

// Grid geometry. Character width approximates the sans-serif advance at
// the cell font size; exact centering is not required.
const CHAR_PX: u32 = 9;
const CELL_PAD_PX: u32 = 18;
const ROW_HEIGHT_PX: u32 = 44;
const CELL_FONT_PX: u32 = 16;
const GRID_TOP_PX: i32 = 120;

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Render the report to a PNG at `path`, overwriting any existing file,
/// then mirror the global-indicator summary to the console.
pub fn render_dashboard(report: &Report, path: &Path, size: (u32, u32)) -> Result<(), RenderError> {
    let (width, height) = size;
    {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| RenderError::Draw(format!("Failed to fill canvas: {}", e)))?;

        let title_style: TextStyle = ("sans-serif", 32).into_font().into();
        draw_centered(&root, TITLE, 40, &title_style, width)?;

        draw_grid(&root, report, width)?;
        draw_summary(&root, report, width, height)?;

        root.present()
            .map_err(|e| RenderError::Draw(format!("Failed to write image: {}", e)))?;
    }

    let timestamp = report.captured_at.format("%Y-%m-%d %H:%M:%S");
    info!(
        "Dashboard created and saved as '{}' (Data as of: {})",
        path.display(),
        timestamp
    );
    for line in global_lines(&report.global) {
        info!("{}", line);
    }

    Ok(())
}

/// Draw the snapshot table: shaded header row, cell borders, cell text.
fn draw_grid(root: &Canvas, report: &Report, width: u32) -> Result<(), RenderError> {
    let grid = build_grid(report);
    let col_offsets = grid.column_offsets_px(CHAR_PX, CELL_PAD_PX);
    let total_width = grid.total_width_px(CHAR_PX, CELL_PAD_PX);
    let origin_x = (width.saturating_sub(total_width) / 2) as i32;
    let right_x = origin_x + total_width as i32;
    let row_count = grid.rows().len() as i32 + 1;
    let bottom_y = GRID_TOP_PX + row_count * ROW_HEIGHT_PX as i32;

    root.draw(&Rectangle::new(
        [
            (origin_x, GRID_TOP_PX),
            (right_x, GRID_TOP_PX + ROW_HEIGHT_PX as i32),
        ],
        RGBColor(225, 225, 225).filled(),
    ))
    .map_err(|e| RenderError::Draw(format!("Failed to draw header row: {}", e)))?;

    for r in 0..=row_count {
        let y = GRID_TOP_PX + r * ROW_HEIGHT_PX as i32;
        root.draw(&PathElement::new(vec![(origin_x, y), (right_x, y)], &BLACK))
            .map_err(|e| RenderError::Draw(format!("Failed to draw grid line: {}", e)))?;
    }
    for &offset in &col_offsets {
        let x = origin_x + offset as i32;
        root.draw(&PathElement::new(vec![(x, GRID_TOP_PX), (x, bottom_y)], &BLACK))
            .map_err(|e| RenderError::Draw(format!("Failed to draw grid line: {}", e)))?;
    }
    root.draw(&PathElement::new(
        vec![(right_x, GRID_TOP_PX), (right_x, bottom_y)],
        &BLACK,
    ))
    .map_err(|e| RenderError::Draw(format!("Failed to draw grid line: {}", e)))?;

    let cell_style: TextStyle = ("sans-serif", CELL_FONT_PX as i32).into_font().into();
    let text_inset = (ROW_HEIGHT_PX - CELL_FONT_PX) as i32 / 2;
    let draw_row = |cells: &[String], row_index: i32| -> Result<(), RenderError> {
        let y = GRID_TOP_PX + row_index * ROW_HEIGHT_PX as i32 + text_inset;
        for (c, cell) in cells.iter().enumerate() {
            let x = origin_x + col_offsets[c] as i32 + CELL_PAD_PX as i32;
            root.draw(&Text::new(cell.as_str(), (x, y), cell_style.clone()))
                .map_err(|e| RenderError::Draw(format!("Failed to draw cell text: {}", e)))?;
        }
        Ok(())
    };

    draw_row(grid.headers(), 0)?;
    for (r, row) in grid.rows().iter().enumerate() {
        draw_row(row, r as i32 + 1)?;
    }
    Ok(())
}

/// Draw the indicator lines and timestamp below the grid, placed at fixed
/// height fractions (0.18 / 0.14 / 0.10 / 0.02 from the bottom).
fn draw_summary(
    root: &Canvas,
    report: &Report,
    width: u32,
    height: u32,
) -> Result<(), RenderError> {
    let text_style: TextStyle = ("sans-serif", CELL_FONT_PX as i32).into_font().into();
    let small_style: TextStyle = ("sans-serif", 13).into_font().into();
    let from_bottom = |frac: f64| (height as f64 * (1.0 - frac)) as i32;

    let globals = global_lines(&report.global);
    if globals.len() == 2 {
        draw_centered(root, &globals[0], from_bottom(0.18), &text_style, width)?;
        draw_centered(root, &globals[1], from_bottom(0.14), &text_style, width)?;
    } else {
        draw_centered(root, &globals[0], from_bottom(0.16), &text_style, width)?;
    }

    draw_centered(
        root,
        &sentiment_line(report.sentiment),
        from_bottom(0.10),
        &text_style,
        width,
    )?;

    let timestamp = format!(
        "Data as of: {}",
        report.captured_at.format("%Y-%m-%d %H:%M:%S")
    );
    draw_centered(root, &timestamp, from_bottom(0.02), &small_style, width)?;
    Ok(())
}

fn draw_centered(
    root: &Canvas,
    text: &str,
    y: i32,
    style: &TextStyle,
    width: u32,
) -> Result<(), RenderError> {
    let (text_width, _) = root
        .estimate_text_size(text, style)
        .map_err(|e| RenderError::Draw(format!("Failed to measure text: {}", e)))?;
    let x = (width.saturating_sub(text_width) / 2) as i32;
    root.draw(&Text::new(text, (x, y), style.clone()))
        .map_err(|e| RenderError::Draw(format!("Failed to draw text: {}", e)))
}

fn build_grid(report: &Report) -> GridLayout {
    let mut grid = GridLayout::new(COLUMN_HEADERS.to_vec());
    for snapshot in &report.snapshots {
        grid.add_row(vec![
            snapshot.coin.clone(),
            snapshot.price.clone(),
            snapshot.week_change.clone(),
            snapshot.year_change.clone(),
        ]);
    }
    grid
}

/// Two value lines when both indicators are present, otherwise a single
/// placeholder line.
fn global_lines(global: &GlobalIndicators) -> Vec<String> {
    match (global.bitcoin_dominance, global.total_market_cap) {
        (Some(dominance), Some(market_cap)) => vec![
            format!("Bitcoin Dominance: {}", format_pct(dominance)),
            format!("Total Crypto Market Cap: {}", format_usd(market_cap)),
        ],
        _ => vec!["Global data unavailable".to_string()],
    }
}

fn sentiment_line(sentiment: Option<u8>) -> String {
    match sentiment {
        Some(value) => format!("Crypto Fear & Greed Index: {}", value),
        None => "Crypto Fear & Greed Index: Unavailable".to_string(),
    }
}
