//! The host loop: feeds terminal input to the widget and draws its scene.

use std::time::Duration;

use timetree::{EventRecord, Notification, Options, Selected, TimeTree, TreeError};
use tokio::sync::watch;

use crate::buffer::Buffer;
use crate::colors;
use crate::error::HostError;
use crate::input::{Command, InputMapper};
use crate::raster::{self, CELL_WIDTH};
use crate::terminal::Terminal;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const HELP: &str = "q quit  b brush  r resize-on-collapse  l links";

pub struct App {
    widget: TimeTree,
    width: watch::Sender<f64>,
    input: InputMapper,
    status: String,
    running: bool,
}

impl App {
    pub fn new(records: Vec<EventRecord>, options: Options) -> Self {
        let (width, rx) = watch::channel(0.0);
        let mut widget = TimeTree::new(options);
        widget.attach(rx);
        widget.set_content(records);
        Self {
            widget,
            width,
            input: InputMapper::new(),
            status: HELP.to_string(),
            running: true,
        }
    }

    pub fn widget(&self) -> &TimeTree {
        &self.widget
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Publish the terminal width, in columns, as the container width.
    pub fn resize(&mut self, columns: u16) {
        self.width.send_replace(columns as f64 * CELL_WIDTH);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Pointer(event) => {
                self.widget.handle_pointer(event);
            }
            Command::Quit => self.running = false,
            Command::ToggleBrushable => {
                let on = !self.widget.options().brushable;
                self.widget.set_brushable(on);
                self.status = format!("brush {}", if on { "on" } else { "off" });
            }
            Command::ToggleResizeOnCollapse => {
                let on = !self.widget.options().resize_on_collapse;
                self.widget.set_resize_on_collapse(on);
                self.status = format!("resize on collapse {}", if on { "on" } else { "off" });
            }
            Command::ToggleLinks => {
                let on = !self.widget.options().show_links;
                self.widget.set_show_links(on);
            }
            Command::Resize { width, .. } => self.resize(width),
        }
    }

    /// Bring the widget up to date and fold its notifications into the
    /// status line.
    pub fn update(&mut self) -> Result<(), TreeError> {
        self.widget.update()?;
        for notification in self.widget.drain_notifications() {
            self.notify(notification);
        }
        Ok(())
    }

    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::Rendered { nodes } => {
                log::debug!("rendered {nodes} nodes");
            }
            Notification::SelectionChanged(selected) => {
                let labels: Vec<String> = selected.iter().map(describe).collect();
                log::info!("selected {labels:?}");
                self.status = format!("selected: {}", labels.join(", "));
            }
            Notification::BrushChanged(range) => {
                log::info!("brush {range:?}");
                self.status = match range {
                    Some([start, end]) => {
                        let format = &self.widget.options().time_formatter;
                        format!("brush: {} .. {}", format.format(start), format.format(end))
                    }
                    None => "brush cleared".to_string(),
                };
            }
            Notification::Toggled { id, collapsed } => {
                log::info!("toggled {id}, collapsed: {collapsed}");
                let tree = self.widget.tree();
                let label = tree
                    .index_of(&id)
                    .and_then(|i| tree.node(i))
                    .map_or_else(|| id.to_string(), |node| node.label().to_string());
                let verb = if collapsed { "collapsed" } else { "expanded" };
                self.status = format!("{verb} {label}");
            }
        }
    }

    /// Draw the scene and the status line.
    pub fn paint(&self, buffer: &mut Buffer) {
        raster::draw(self.widget.scene(), buffer);

        let Some(last) = buffer.height().checked_sub(1) else {
            return;
        };
        buffer.fill_bg(0, last, buffer.width(), last + 1, colors::ROW);
        for x in 0..buffer.width() {
            buffer.put_char(x, last, ' ', colors::MUTED, false);
        }
        buffer.put_str(1, last, &self.status, colors::MUTED, false);
    }

    pub fn run(mut self, terminal: &mut Terminal) -> Result<(), HostError> {
        let (columns, _) = terminal.size();
        self.resize(columns);

        while self.running {
            self.update()?;
            terminal.draw(|buffer| self.paint(buffer))?;
            let events = terminal.poll(POLL_INTERVAL)?;
            for command in self.input.process(&events) {
                self.apply(command);
            }
        }
        log::info!("quit");
        Ok(())
    }
}

fn describe(selected: &Selected) -> String {
    match selected {
        Selected::Record(record) => record.label.clone(),
        Selected::Content(value) => value.to_string(),
    }
}
