//! Rasterizes a time-tree scene into terminal cells.
//!
//! Scene coordinates are pixels; each cell covers `CELL_WIDTH` x
//! `CELL_HEIGHT` of them. Backgrounds are painted first, then strokes
//! (links, the axis domain, the scrubber line), then glyphs on top.

use std::collections::HashMap;

use timetree::{Element, Length, Scene, Shape, TextAnchor, Translate};
use unicode_width::UnicodeWidthStr;

use crate::buffer::Buffer;
use crate::colors::{self, Rgb};

pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;
/// Font size used to resolve `em` offsets.
const EM: f64 = CELL_HEIGHT;

const UP: u8 = 1;
const DOWN: u8 = 2;
const LEFT: u8 = 4;
const RIGHT: u8 = 8;

/// Pixel position at the middle of a cell.
pub fn cell_center(col: u16, row: u16) -> (f64, f64) {
    (
        (col as f64 + 0.5) * CELL_WIDTH,
        (row as f64 + 0.5) * CELL_HEIGHT,
    )
}

fn col(px: f64) -> u16 {
    (px / CELL_WIDTH).floor() as u16
}

fn row(py: f64) -> u16 {
    (py / CELL_HEIGHT).floor() as u16
}

/// What a shape sits inside, collected on the way down.
#[derive(Debug, Clone, Copy, Default)]
struct Context<'a> {
    axis: bool,
    scrubber: bool,
    brush: bool,
    /// Record class of the enclosing bar.
    bar_class: Option<&'a str>,
    duration: Option<Duration<'a>>,
    label: Option<&'a Element>,
}

#[derive(Debug, Clone, Copy)]
struct Duration<'a> {
    section: bool,
    class: Option<&'a str>,
    hover: bool,
}

struct Placed<'a> {
    element: &'a Element,
    origin: Translate,
    context: Context<'a>,
}

/// Draw `scene` into `buffer`, clipping to the buffer.
pub fn draw(scene: &Scene, buffer: &mut Buffer) {
    let mut placed = Vec::new();
    place(&scene.root, Translate::ZERO, Context::default(), &mut placed);

    for p in &placed {
        paint_background(p, buffer);
    }

    let mut strokes = Strokes::default();
    for p in &placed {
        collect_strokes(p, &mut strokes);
    }
    strokes.draw(buffer);

    for p in &placed {
        paint_glyphs(p, buffer);
    }
}

fn place<'a>(element: &'a Element, origin: Translate, context: Context<'a>, out: &mut Vec<Placed<'a>>) {
    let origin = match element.translation() {
        Ok(Some(t)) => origin.then(t),
        Ok(None) => origin,
        Err(e) => {
            log::warn!("raster: ignoring {e}");
            origin
        }
    };

    let mut context = context;
    if element.has_class("axis") {
        context.axis = true;
    }
    if element.has_class("scrubber") {
        context.scrubber = true;
    }
    if element.has_class("brush") {
        context.brush = true;
    }
    if element.has_class("bar") {
        context.bar_class = record_class(element, &["bar", "sectional", "collapsed"]);
    }
    if element.has_class("duration") {
        context.duration = Some(Duration {
            section: element.has_class("section"),
            class: record_class(element, &["section", "whole", "duration", "hover"]),
            hover: element.has_class("hover"),
        });
    }
    if element.has_class("label") {
        context.label = Some(element);
    }

    out.push(Placed {
        element,
        origin,
        context,
    });
    for child in &element.children {
        place(child, origin, context, out);
    }
}

/// First class that is not one of the structural `known` ones.
fn record_class<'a>(element: &'a Element, known: &[&str]) -> Option<&'a str> {
    element
        .classes
        .iter()
        .map(String::as_str)
        .find(|c| !known.contains(c))
}

fn paint_background(p: &Placed, buffer: &mut Buffer) {
    let Shape::Rect {
        x,
        y,
        width,
        height,
    } = p.element.shape
    else {
        return;
    };
    if width <= 0.0 || height <= 0.0 {
        return;
    }

    let el = p.element;
    let bg = if el.has_class("row") {
        if el.has_class("selected") {
            colors::ROW_SELECTED
        } else if el.has_class("hover") {
            colors::ROW_HOVER
        } else {
            colors::ROW
        }
    } else if p.context.brush {
        if !el.has_class("extent") {
            return;
        }
        colors::BRUSH
    } else if let Some(duration) = p.context.duration {
        let class = duration.class.or(p.context.bar_class).unwrap_or_default();
        colors::bar(class, duration.section, duration.hover)
    } else {
        return;
    };

    let x0 = p.origin.x + x;
    let y0 = p.origin.y + y;
    buffer.fill_bg(
        col(x0),
        row(y0),
        ((x0 + width) / CELL_WIDTH).ceil() as u16,
        ((y0 + height) / CELL_HEIGHT).ceil() as u16,
        bg,
    );
}

fn collect_strokes(p: &Placed, strokes: &mut Strokes) {
    match &p.element.shape {
        Shape::Path { d } => {
            let color = if p.context.axis { colors::AXIS } else { colors::LINK };
            strokes.path(d, p.origin, color);
        }
        Shape::Line { x1, y1, x2, y2 } => {
            let color = if p.context.scrubber {
                colors::SCRUBBER
            } else {
                colors::AXIS
            };
            let (c, r0, r1) = (col(p.origin.x + x1), row(p.origin.y + y1), row(p.origin.y + y2));
            if r0 == r1 {
                // A tick: hangs off whatever runs through its cell.
                strokes.mark(c, r0, DOWN, color);
            } else {
                strokes.vertical(c, r0, r1, color);
            }
            if col(p.origin.x + x2) != c {
                log::debug!("raster: drawing slanted line as vertical");
            }
        }
        _ => {}
    }
}

fn paint_glyphs(p: &Placed, buffer: &mut Buffer) {
    match &p.element.shape {
        Shape::Circle { cx, cy, .. } => {
            let glyph = match p.context.label {
                Some(label) if label.has_class("closed") => '▸',
                Some(label) if label.has_class("has-children") => '▾',
                _ => '•',
            };
            buffer.put_char(
                col(p.origin.x + cx),
                row(p.origin.y + cy),
                glyph,
                colors::TEXT,
                false,
            );
        }
        Shape::Text {
            x,
            y,
            dx,
            dy,
            anchor,
            content,
        } => {
            if content.is_empty() {
                return;
            }
            let dy = match *dy {
                Length::Px(v) => v,
                Length::Em(v) => v * EM,
            };
            let px = p.origin.x + x + dx;
            let width = content.width() as f64;
            let start = match anchor {
                TextAnchor::Start => px / CELL_WIDTH,
                TextAnchor::Middle => px / CELL_WIDTH - width / 2.0,
                TextAnchor::End => px / CELL_WIDTH - width,
            };
            if start < 0.0 {
                return;
            }
            let (fg, bold) = if p.context.scrubber {
                (colors::SCRUBBER, true)
            } else if p.context.axis {
                (colors::MUTED, false)
            } else {
                (colors::TEXT, false)
            };
            buffer.put_str(start.round() as u16, row(p.origin.y + y + dy), content, fg, bold);
        }
        _ => {}
    }
}

/// Box-drawing strokes, merged per cell so crossings become junctions.
#[derive(Debug, Default)]
struct Strokes {
    cells: HashMap<(u16, u16), (u8, Rgb)>,
}

impl Strokes {
    fn mark(&mut self, col: u16, row: u16, dirs: u8, color: Rgb) {
        let entry = self.cells.entry((col, row)).or_insert((0, color));
        entry.0 |= dirs;
        entry.1 = color;
    }

    fn horizontal(&mut self, row: u16, c0: u16, c1: u16, color: Rgb) {
        let (a, b) = (c0.min(c1), c0.max(c1));
        if a == b {
            self.mark(a, row, LEFT | RIGHT, color);
            return;
        }
        for c in a..=b {
            let mut dirs = 0;
            if c > a {
                dirs |= LEFT;
            }
            if c < b {
                dirs |= RIGHT;
            }
            self.mark(c, row, dirs, color);
        }
    }

    fn vertical(&mut self, col: u16, r0: u16, r1: u16, color: Rgb) {
        let (a, b) = (r0.min(r1), r0.max(r1));
        for r in a..=b {
            let mut dirs = 0;
            if r > a {
                dirs |= UP;
            }
            if r < b {
                dirs |= DOWN;
            }
            self.mark(col, r, dirs, color);
        }
    }

    /// Trace absolute `M`, `V` and `H` path data.
    fn path(&mut self, d: &str, origin: Translate, color: Rgb) {
        let (mut x, mut y) = (origin.x, origin.y);
        for (command, args) in commands(d) {
            match command {
                'M' => {
                    let mut coords = args.split(',').map(|v| v.trim().parse::<f64>());
                    match (coords.next(), coords.next()) {
                        (Some(Ok(px)), Some(Ok(py))) => {
                            x = origin.x + px;
                            y = origin.y + py;
                        }
                        _ => log::warn!("raster: bad move in path {d:?}"),
                    }
                }
                'V' => match args.trim().parse::<f64>() {
                    Ok(py) => {
                        let ny = origin.y + py;
                        if row(ny) != row(y) {
                            self.vertical(col(x), row(y), row(ny), color);
                        }
                        y = ny;
                    }
                    Err(_) => log::warn!("raster: bad vertical in path {d:?}"),
                },
                'H' => match args.trim().parse::<f64>() {
                    Ok(px) => {
                        let nx = origin.x + px;
                        self.horizontal(row(y), col(x), col(nx), color);
                        x = nx;
                    }
                    Err(_) => log::warn!("raster: bad horizontal in path {d:?}"),
                },
                other => log::warn!("raster: unsupported path command {other}"),
            }
        }
    }

    fn draw(&self, buffer: &mut Buffer) {
        for (&(c, r), &(dirs, color)) in &self.cells {
            if let Some(glyph) = junction(dirs) {
                buffer.put_char(c, r, glyph, color, false);
            }
        }
    }
}

/// Split path data into `(command, arguments)` pairs.
fn commands(d: &str) -> Vec<(char, &str)> {
    let starts: Vec<(usize, char)> = d
        .char_indices()
        .filter(|(_, c)| c.is_ascii_alphabetic() && *c != 'e' && *c != 'E')
        .collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &(at, command))| {
            let end = starts.get(i + 1).map_or(d.len(), |&(next, _)| next);
            (command, &d[at + command.len_utf8()..end])
        })
        .collect()
}

fn junction(dirs: u8) -> Option<char> {
    let glyph = match dirs {
        0 => return None,
        d if d & (UP | DOWN) == 0 => '─',
        d if d & (LEFT | RIGHT) == 0 => '│',
        d if d == DOWN | RIGHT => '┌',
        d if d == DOWN | LEFT => '┐',
        d if d == UP | RIGHT => '└',
        d if d == UP | LEFT => '┘',
        d if d == UP | DOWN | RIGHT => '├',
        d if d == UP | DOWN | LEFT => '┤',
        d if d == LEFT | RIGHT | DOWN => '┬',
        d if d == LEFT | RIGHT | UP => '┴',
        _ => '┼',
    };
    Some(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_split() {
        assert_eq!(
            commands("M10,20V40H30"),
            vec![('M', "10,20"), ('V', "40"), ('H', "30")]
        );
        assert_eq!(commands("M1e2,0H5"), vec![('M', "1e2,0"), ('H', "5")]);
    }

    #[test]
    fn test_junctions() {
        assert_eq!(junction(0), None);
        assert_eq!(junction(LEFT), Some('─'));
        assert_eq!(junction(UP | DOWN), Some('│'));
        assert_eq!(junction(UP | RIGHT), Some('└'));
        assert_eq!(junction(UP | DOWN | RIGHT), Some('├'));
        assert_eq!(junction(LEFT | RIGHT | DOWN), Some('┬'));
    }

    #[test]
    fn test_cell_center_round_trips() {
        let (x, y) = cell_center(3, 2);
        assert_eq!((col(x), row(y)), (3, 2));
    }
}
