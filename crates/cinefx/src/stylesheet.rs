//! Terminal stylesheet: draws the effects document the way the page's CSS
//! would, reading only class names and inline styles.

use std::collections::HashMap;
use std::f32::consts::PI;

use cinefx_core::{ElementId, Length, Seconds, TiltTransform, class, property};
use cinefx_effects::{Document, MemoryDocument};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
};

use crate::color::{amber, hsl, starlight};
use crate::page::Page;

/// Particle glyphs from smallest to largest.
const PARTICLE_GLYPHS: &[char] = &['·', '∙', '•', '●'];
/// Length of the `shooting-star` keyframes.
const STAR_ANIMATION_MS: f32 = 1000.0;
const STAR_TRAIL: usize = 6;
/// Fraction of the viewport a particle floats upward over its duration.
const PARTICLE_RISE: f32 = 0.25;

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    ch: char,
    fg: Option<Color>,
    bg: Option<Color>,
}

/// Per-element animation start times plus the drawing rules.
#[derive(Debug, Default)]
pub struct Stylesheet {
    started: HashMap<ElementId, u64>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the whole document.
    pub fn render(&mut self, frame: &mut Frame, doc: &MemoryDocument, page: &Page, now_ms: u64) {
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.started.retain(|id, _| doc.contains(*id));

        let mut grid = blank_grid(area.width as usize, area.height as usize);

        for spotlight in doc.query_selector_all(class::SPOTLIGHT) {
            paint_spotlight(&mut grid, doc, spotlight);
        }
        for particle in doc.query_selector_all(class::PARTICLE) {
            let started = *self.started.entry(particle).or_insert(now_ms);
            paint_particle(&mut grid, doc, particle, now_ms.saturating_sub(started));
        }
        for star in doc.query_selector_all(class::SHOOTING_STAR) {
            let started = *self.started.entry(star).or_insert(now_ms);
            paint_star(&mut grid, doc, star, now_ms.saturating_sub(started));
        }

        let lines: Vec<Line> = grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .into_iter()
                    .map(|cell| {
                        let mut style = Style::new();
                        if let Some(fg) = cell.fg {
                            style = style.fg(fg);
                        }
                        if let Some(bg) = cell.bg {
                            style = style.bg(bg);
                        }
                        Span::styled(cell.ch.to_string(), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);

        render_header(frame, area);
        for card in page.cards() {
            render_card(frame, doc, card.element, &card.title, area);
        }
    }
}

fn blank_grid(width: usize, height: usize) -> Vec<Vec<Cell>> {
    let blank = Cell {
        ch: ' ',
        ..Cell::default()
    };
    vec![vec![blank; width]; height]
}

fn percent(doc: &MemoryDocument, element: ElementId, name: &str) -> Option<f32> {
    doc.style(element, name)?
        .parse::<Length>()
        .ok()
        .map(|l| l.value() as f32 / 100.0)
}

fn seconds_ms(doc: &MemoryDocument, element: ElementId, name: &str) -> Option<f32> {
    doc.style(element, name)?
        .parse::<Seconds>()
        .ok()
        .map(|s| s.0 as f32 * 1000.0)
}

fn plot(grid: &mut [Vec<Cell>], col: f32, row: f32, ch: char, fg: Color) {
    if col < 0.0 || row < 0.0 {
        return;
    }
    let (col, row) = (col as usize, row as usize);
    if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
        cell.ch = ch;
        cell.fg = Some(fg);
    }
}

/// Radial glow around `--x`/`--y`, painted as background color.
fn paint_spotlight(grid: &mut [Vec<Cell>], doc: &MemoryDocument, spotlight: ElementId) {
    let (Some(x), Some(y)) = (
        percent(doc, spotlight, property::SPOTLIGHT_X),
        percent(doc, spotlight, property::SPOTLIGHT_Y),
    ) else {
        return;
    };
    let height = grid.len() as f32;
    let width = grid.first().map_or(0, Vec::len) as f32;
    let (cx, cy) = (x * width, y * height);
    let radius = width.max(height * 2.0) * 0.22;

    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            let dx = col as f32 + 0.5 - cx;
            // Terminal cells are roughly twice as tall as they are wide.
            let dy = (row as f32 + 0.5 - cy) * 2.0;
            let falloff = 1.0 - (dx * dx + dy * dy).sqrt() / radius;
            if falloff > 0.0 {
                cell.bg = Some(hsl(32.0, 0.7, falloff * falloff * 0.16));
            }
        }
    }
}

/// Wait out the delay, then rise and fade in and out over the duration.
fn paint_particle(grid: &mut [Vec<Cell>], doc: &MemoryDocument, particle: ElementId, age_ms: u64) {
    let (Some(left), Some(top), Some(duration), Some(delay)) = (
        percent(doc, particle, property::LEFT),
        percent(doc, particle, property::TOP),
        seconds_ms(doc, particle, property::ANIMATION_DURATION),
        seconds_ms(doc, particle, property::ANIMATION_DELAY),
    ) else {
        return;
    };
    let running = age_ms as f32 - delay;
    if running < 0.0 || duration <= 0.0 {
        return;
    }
    let progress = (running / duration).min(1.0);
    let opacity = (progress * PI).sin();
    if opacity < 0.05 {
        return;
    }

    let size = doc
        .style(particle, property::WIDTH)
        .and_then(|w| w.parse::<Length>().ok())
        .map_or(2.0, |l| l.value() as f32);
    let glyph_idx = (((size - 2.0) / 6.0) * PARTICLE_GLYPHS.len() as f32) as usize;
    let glyph = PARTICLE_GLYPHS[glyph_idx.min(PARTICLE_GLYPHS.len() - 1)];

    let height = grid.len() as f32;
    let width = grid.first().map_or(0, Vec::len) as f32;
    let row = top * height - progress * PARTICLE_RISE * height;
    plot(grid, left * width, row, glyph, amber(opacity));
}

/// Streak toward the lower right with a fading tail.
fn paint_star(grid: &mut [Vec<Cell>], doc: &MemoryDocument, star: ElementId, age_ms: u64) {
    let (Some(left), Some(top)) = (
        percent(doc, star, property::LEFT),
        percent(doc, star, property::TOP),
    ) else {
        return;
    };
    let progress = (age_ms as f32 / STAR_ANIMATION_MS).min(1.0);
    let height = grid.len() as f32;
    let width = grid.first().map_or(0, Vec::len) as f32;
    let travel = width * 0.3;
    let head_col = left * width + progress * travel;
    let head_row = top * height + progress * travel * 0.25;
    let fade = 1.0 - progress;

    for i in (1..=STAR_TRAIL).rev() {
        let t = i as f32;
        let intensity = fade * (1.0 - t / (STAR_TRAIL as f32 + 1.0));
        plot(grid, head_col - t, head_row - t * 0.25, '─', starlight(intensity));
    }
    plot(grid, head_col, head_row, '✦', starlight(fade.max(0.3)));
}

fn render_header(frame: &mut Frame, area: Rect) {
    let top = area.height / 5;
    let header = Rect::new(area.x, area.y + top, area.width, 2u16.min(area.height - top));
    let lines = vec![
        Line::from(Span::styled(
            "N O W   S H O W I N G",
            Style::new().fg(amber(0.9)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "move the mouse  ·  p pause  ·  q quit",
            Style::new().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), header);
}

/// Convert a document rect to terminal cells, growing it by the tilt scale.
fn card_area(rect: cinefx_core::Rect, tilt: Option<&TiltTransform>, area: Rect) -> Option<Rect> {
    let cinefx_core::Rect {
        mut left,
        mut top,
        mut width,
        mut height,
    } = rect;
    if let Some(tilt) = tilt {
        let grow_x = (width * (tilt.scale - 1.0) / 2.0).ceil();
        let grow_y = (height * (tilt.scale - 1.0) / 2.0).round();
        left -= grow_x;
        top -= grow_y;
        width += grow_x * 2.0;
        height += grow_y * 2.0;
    }
    if width < 1.0 || height < 1.0 {
        return None;
    }
    let cells = Rect::new(
        left.max(0.0) as u16,
        top.max(0.0) as u16,
        width as u16,
        height as u16,
    );
    let clipped = cells.intersection(area);
    (clipped.width > 0 && clipped.height > 0).then_some(clipped)
}

fn render_card(frame: &mut Frame, doc: &MemoryDocument, card: ElementId, title: &str, area: Rect) {
    let tilt = doc
        .style(card, property::TRANSFORM)
        .and_then(|t| t.parse::<TiltTransform>().ok());
    let Some(cells) = card_area(doc.bounding_rect(card), tilt.as_ref(), area) else {
        return;
    };

    let (border_type, border, body) = match &tilt {
        Some(tilt) => {
            // Lean the highlight toward the side turned to the viewer.
            let hue = 42.0 - tilt.rotate_y_deg as f32 * 8.0;
            let light = 0.6 - tilt.rotate_x_deg as f32 * 0.05;
            (
                BorderType::Thick,
                hsl(hue, 0.9, light),
                format!(
                    "tilt {:+.1}° / {:+.1}°",
                    tilt.rotate_x_deg, tilt.rotate_y_deg
                ),
            )
        }
        None => (BorderType::Rounded, amber(0.35), String::new()),
    };

    let block = Block::bordered()
        .border_type(border_type)
        .border_style(Style::new().fg(border))
        .title(Line::from(format!(" {title} ")).centered());
    let text = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(body, Style::new().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(Clear, cells);
    frame.render_widget(text, cells);
}
