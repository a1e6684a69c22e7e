//! The layout renderer: walks a validated [`TimesheetDocument`] top to
//! bottom and records the page as draw commands (header, one row per day
//! with its time-range blocks, the legend table, the signature box).

use tracing::{info, warn};

use crate::helpers::layout::{LayoutConfig, LEGEND};
use crate::helpers::page::{Align, Page};
use crate::models::timesheet::{DayEntry, TimeRange, TimesheetDocument};

const TITLE: &str = "Timesheet";

const TITLE_FONT_SIZE: f32 = 16.0;
const HEADER_FONT_SIZE: f32 = 12.0;
const DATE_FONT_SIZE: f32 = 10.0;
const CODE_FONT_SIZE: f32 = 9.0;
const RANGE_FONT_SIZE: f32 = 5.0;
const LEGEND_FONT_SIZE: f32 = 8.0;

/// Render the document onto a fresh page.
///
/// The input must already be validated; the renderer itself never fails.
/// Out-of-window time ranges are clamped to the workday window, or skipped
/// entirely when they do not touch it, and reported via `tracing`.
pub fn render_timesheet(doc: &TimesheetDocument, layout: &LayoutConfig) -> Page {
    info!(
        "Rendering timesheet for {} covering {} ({} days)",
        doc.name,
        doc.month,
        doc.days.len()
    );

    let mut page = Page::new(layout.page_width, layout.page_height);

    draw_header(&mut page, layout, doc);
    for (index, day) in doc.days.iter().enumerate() {
        draw_day(&mut page, layout, index, day);
    }
    draw_legend(&mut page, layout);
    draw_signature_box(&mut page, layout);

    info!("Rendered page with {} draw commands", page.commands().len());
    page
}

fn draw_header(page: &mut Page, layout: &LayoutConfig, doc: &TimesheetDocument) {
    page.text(
        TITLE,
        layout.page_width / 2.0,
        layout.header_top - layout.header_line_spacing,
        TITLE_FONT_SIZE,
        Align::Center,
    );
    page.text(
        &doc.name,
        layout.margin,
        layout.header_top,
        HEADER_FONT_SIZE,
        Align::Left,
    );
    page.text(
        &doc.month,
        layout.margin,
        layout.header_top + layout.header_line_spacing,
        HEADER_FONT_SIZE,
        Align::Left,
    );
}

fn draw_day(page: &mut Page, layout: &LayoutConfig, index: usize, day: &DayEntry) {
    let y = layout.day_y(index);

    // Row border, filled for weekends.
    page.rect(layout.margin, y, layout.day_width(), layout.day_height, day.weekend());

    page.text(
        &day.date,
        layout.planning_x() - 2.0,
        y + 4.0,
        DATE_FONT_SIZE,
        Align::Right,
    );

    // Divider between the date column and the planning area.
    page.line(layout.planning_x(), y, layout.planning_x(), y + layout.day_height);

    for range in &day.ranges {
        draw_range(page, layout, y, day, range);
    }
}

fn draw_range(page: &mut Page, layout: &LayoutConfig, y: f32, day: &DayEntry, range: &TimeRange) {
    let begin = range.begin.as_hours();
    let end = range.end.as_hours();

    let Some((clamped_begin, clamped_end)) = layout.clamp_to_window(begin, end) else {
        warn!(
            "Day {}: range {} lies outside the {}-{} window, skipping",
            day.date,
            range.label(),
            layout.window_begin,
            layout.window_end
        );
        return;
    };
    if clamped_begin != begin || clamped_end != end {
        warn!(
            "Day {}: range {} clamped to the {}-{} window",
            day.date,
            range.label(),
            layout.window_begin,
            layout.window_end
        );
    }

    let x = layout.time_to_x(clamped_begin);
    let width = layout.span_width(clamped_begin, clamped_end);

    page.rect(x, y + 0.75, width, layout.day_height - 1.5, false);
    page.text(&range.code, x + 1.0, y + 3.4, CODE_FONT_SIZE, Align::Left);
    page.text(range.label(), x + 1.0, y + 5.0, RANGE_FONT_SIZE, Align::Left);
}

fn draw_legend(page: &mut Page, layout: &LayoutConfig) {
    for (index, entry) in LEGEND.iter().enumerate() {
        let y = layout.legend_top + layout.legend_spacing * index as f32;
        page.text(entry.code, layout.margin, y, LEGEND_FONT_SIZE, Align::Left);
        page.text(
            entry.description,
            layout.margin + 12.0,
            y,
            LEGEND_FONT_SIZE,
            Align::Left,
        );
    }
}

fn draw_signature_box(page: &mut Page, layout: &LayoutConfig) {
    let x = layout.page_width - layout.margin - layout.signature_width;
    page.rect(
        x,
        layout.legend_top,
        layout.signature_width,
        layout.signature_height,
        false,
    );
    page.text(
        "Date / Signature",
        x + 2.0,
        layout.legend_top + layout.signature_height - 3.0,
        LEGEND_FONT_SIZE,
        Align::Left,
    );
}
