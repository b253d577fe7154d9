//! Serialize a [`Scene`] as a standalone SVG document.

use std::fmt::Write;

use crate::scene::{Element, Length, Scene, Shape};

pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        scene.width, scene.height
    );
    write_element(&scene.root, 1, &mut out);
    out.push_str("</svg>\n");
    out
}

fn write_element(element: &Element, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    let tag = match element.shape {
        Shape::Group => "g",
        Shape::Rect { .. } => "rect",
        Shape::Text { .. } => "text",
        Shape::Circle { .. } => "circle",
        Shape::Path { .. } => "path",
        Shape::Line { .. } => "line",
    };

    let mut attrs = String::new();
    if !element.classes.is_empty() {
        let _ = write!(attrs, r#" class="{}""#, escape(&element.class_string()));
    }
    if let Some(transform) = &element.transform {
        let _ = write!(attrs, r#" transform="{}""#, escape(transform));
    }

    let mut text = None;
    match &element.shape {
        Shape::Group => {}
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => {
            let _ = write!(
                attrs,
                r#" x="{x}" y="{y}" width="{}" height="{}""#,
                width.max(0.0),
                height.max(0.0)
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
            let dy = match dy {
                Length::Px(v) => v.to_string(),
                Length::Em(v) => format!("{v}em"),
            };
            let _ = write!(
                attrs,
                r#" x="{x}" y="{y}" dx="{dx}" dy="{dy}" text-anchor="{}""#,
                anchor.as_str()
            );
            text = Some(content.as_str());
        }
        Shape::Circle { cx, cy, r } => {
            let _ = write!(attrs, r#" cx="{cx}" cy="{cy}" r="{r}""#);
        }
        Shape::Path { d } => {
            let _ = write!(attrs, r#" d="{}""#, escape(d));
        }
        Shape::Line { x1, y1, x2, y2 } => {
            let _ = write!(attrs, r#" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}""#);
        }
    }

    if let Some(text) = text {
        let _ = writeln!(out, "{pad}<{tag}{attrs}>{}</{tag}>", escape(text));
    } else if element.children.is_empty() {
        let _ = writeln!(out, "{pad}<{tag}{attrs}/>");
    } else {
        let _ = writeln!(out, "{pad}<{tag}{attrs}>");
        for child in &element.children {
            write_element(child, indent + 1, out);
        }
        let _ = writeln!(out, "{pad}</{tag}>");
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
