//! Display regions and the page that hosts them.

use crate::markup::Markup;

/// A replaceable area of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Roster,
    Events,
    Forecast,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Roster, Region::Events, Region::Forecast];

    /// Element id of the region's container
    pub fn container_id(self) -> &'static str {
        match self {
            Region::Roster => "crew-list",
            Region::Events => "events-list",
            Region::Forecast => "forecast-grid",
        }
    }
}

/// Receives rendered content. Every call replaces the region's whole content.
pub trait Surface {
    fn replace(&mut self, region: Region, content: Markup);
}

/// In-memory page: the latest content of each region.
#[derive(Debug, Default)]
pub struct Page {
    roster: Markup,
    events: Markup,
    forecast: Markup,
    renders: [usize; 3],
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self, region: Region) -> &Markup {
        match region {
            Region::Roster => &self.roster,
            Region::Events => &self.events,
            Region::Forecast => &self.forecast,
        }
    }

    /// How many times `region` has been replaced.
    pub fn render_count(&self, region: Region) -> usize {
        self.renders[Self::slot(region)]
    }

    /// Standalone HTML document with every region in place.
    pub fn to_html(&self) -> String {
        let mut doc = Markup::new();
        doc.raw("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n")
            .raw("<title>Beach Cleanup Crew</title>\n</head>\n<body>\n")
            .raw("<section id=\"crew\"><h2>Crew</h2><div id=\"crew-list\">")
            .append(&self.roster)
            .raw("</div></section>\n")
            .raw("<section id=\"events\"><h2>Cleanup Events</h2><div id=\"events-list\">")
            .append(&self.events)
            .raw("</div></section>\n")
            .raw("<section id=\"forecast\"><h2>Forecast</h2><div id=\"forecast-grid\">")
            .append(&self.forecast)
            .raw("</div></section>\n</body>\n</html>\n");
        doc.into_string()
    }

    fn slot(region: Region) -> usize {
        match region {
            Region::Roster => 0,
            Region::Events => 1,
            Region::Forecast => 2,
        }
    }
}

impl Surface for Page {
    fn replace(&mut self, region: Region, content: Markup) {
        self.renders[Self::slot(region)] += 1;
        match region {
            Region::Roster => self.roster = content,
            Region::Events => self.events = content,
            Region::Forecast => self.forecast = content,
        }
    }
}
