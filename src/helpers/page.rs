//! The drawing surface decoupled from any PDF library: rendering appends
//! [`DrawCommand`]s to a [`Page`], and a backend replays them later.
//!
//! Every command carries its own style; no font-size or fill-color state is
//! shared between calls.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Outlined rectangle; `fill` adds the light-gray background used for
    /// weekend rows.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: bool,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    /// Text anchored at `(x, y)` (baseline); `size` is in points.
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        align: Align,
    },
}

/// An ordered draw-command recording for one page, dimensions in millimeters.
#[derive(Debug, Clone)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    commands: Vec<DrawCommand>,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: bool) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            fill,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2 });
    }

    pub fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, align: Align) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            size,
            align,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}
