//! Askama templates for HTML responses.

use askama::Template;

use crate::planner::FareQuote;

use super::dto::PathResponse;

/// Shortest path page.
#[derive(Template)]
#[template(path = "path.html")]
pub struct PathTemplate {
    pub source: String,
    pub target: String,
    pub distance: u64,
    pub transfers: usize,
    pub stations: Vec<String>,
    pub fare: FareQuote,
}

impl PathTemplate {
    pub fn from_response(response: &PathResponse) -> Self {
        let names: Vec<String> = response.stations.iter().map(|s| s.name.clone()).collect();
        Self {
            source: names.first().cloned().unwrap_or_default(),
            target: names.last().cloned().unwrap_or_default(),
            distance: response.distance,
            transfers: response.transfers,
            stations: names,
            fare: response.fare_detail,
        }
    }
}
