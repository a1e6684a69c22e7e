//! lopdf backend: replays a recorded [`Page`] into a single-page PDF.
//!
//! The page records millimeters with a top-left origin (the unit the layout
//! thinks in); PDF user space is points with a bottom-left origin, so every
//! coordinate is scaled and the y axis flipped on the way out.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::{error, info};

use crate::helpers::page::{Align, DrawCommand, Page};

const MM_TO_PT: f32 = 72.0 / 25.4;
const PT_TO_MM: f32 = 25.4 / 72.0;

/// Stroke width for all borders and lines, millimeters.
const LINE_WIDTH: f32 = 0.2;

/// Gray level of the weekend row background.
const FILL_GRAY: f32 = 0.9;

/// Encode the page as PDF bytes.
pub fn write_pdf(page: &Page) -> Result<Vec<u8>, String> {
    let width_pt = page.width * MM_TO_PT;
    let height_pt = page.height * MM_TO_PT;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let content = Content {
        operations: build_operations(page),
    };
    let encoded = match content.encode() {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to encode content stream: {}", e);
            return Err(format!("Failed to encode content stream: {}", e));
        }
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut output_buffer: Vec<u8> = Vec::new();
    match doc.save_to(&mut output_buffer) {
        Ok(_) => {
            info!(
                "Successfully converted PDF to bytes, size: {} bytes",
                output_buffer.len()
            );
            Ok(output_buffer)
        }
        Err(e) => {
            error!("Failed to convert PDF to bytes: {}", e);
            Err(format!("Failed to convert PDF to bytes: {}", e))
        }
    }
}

fn build_operations(page: &Page) -> Vec<Operation> {
    let mut ops = vec![Operation::new("w", vec![Object::Real(LINE_WIDTH * MM_TO_PT)])];

    for command in page.commands() {
        match command {
            DrawCommand::Rect { x, y, width, height, fill } => {
                let rect_operands = vec![
                    Object::Real(x * MM_TO_PT),
                    // PDF rects are anchored at their lower-left corner.
                    Object::Real(flip_y(page.height, y + height)),
                    Object::Real(width * MM_TO_PT),
                    Object::Real(height * MM_TO_PT),
                ];
                if *fill {
                    ops.push(Operation::new("q", vec![]));
                    ops.push(Operation::new("g", vec![Object::Real(FILL_GRAY)]));
                    ops.push(Operation::new("re", rect_operands));
                    ops.push(Operation::new("B", vec![]));
                    ops.push(Operation::new("Q", vec![]));
                } else {
                    ops.push(Operation::new("re", rect_operands));
                    ops.push(Operation::new("S", vec![]));
                }
            }
            DrawCommand::Line { x1, y1, x2, y2 } => {
                ops.push(Operation::new(
                    "m",
                    vec![
                        Object::Real(x1 * MM_TO_PT),
                        Object::Real(flip_y(page.height, *y1)),
                    ],
                ));
                ops.push(Operation::new(
                    "l",
                    vec![
                        Object::Real(x2 * MM_TO_PT),
                        Object::Real(flip_y(page.height, *y2)),
                    ],
                ));
                ops.push(Operation::new("S", vec![]));
            }
            DrawCommand::Text { x, y, text, size, align } => {
                let anchor = match align {
                    Align::Left => *x,
                    Align::Right => x - text_width(text, *size),
                    Align::Center => x - text_width(text, *size) / 2.0,
                };
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("Tf", vec!["F1".into(), Object::Real(*size)]));
                ops.push(Operation::new(
                    "Td",
                    vec![
                        Object::Real(anchor * MM_TO_PT),
                        Object::Real(flip_y(page.height, *y)),
                    ],
                ));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(text.as_str())],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }

    ops
}

fn flip_y(page_height: f32, y_mm: f32) -> f32 {
    (page_height - y_mm) * MM_TO_PT
}

/// Estimated rendered width of `text` in millimeters.
///
/// Rough Helvetica advance widths; close enough to right- and center-align
/// the short labels this sheet draws.
pub fn text_width(text: &str, size: f32) -> f32 {
    let ems: f32 = text.chars().map(glyph_factor).sum();
    ems * size * PT_TO_MM
}

fn glyph_factor(c: char) -> f32 {
    match c {
        '0'..='9' => 0.556,
        ' ' | '.' | ',' | ':' | ';' => 0.278,
        '-' => 0.333,
        'i' | 'j' | 'l' | '!' | '\'' => 0.222,
        'f' | 't' | 'I' | '/' | '(' | ')' => 0.3,
        'm' | 'M' | 'W' => 0.889,
        'w' => 0.722,
        c if c.is_ascii_uppercase() => 0.7,
        _ => 0.52,
    }
}
