//! Built-in records shown when no file is given: a browser page load with
//! network, layout and script activity.

use timetree::EventRecord;

pub const DEVTOOLS: &str = include_str!("../data/devtools.json");

pub fn devtools() -> Result<Vec<EventRecord>, serde_json::Error> {
    serde_json::from_str(DEVTOOLS)
}
