//! Task kinds
//!
//! Every app exposed by the service is one task kind. The kind travels with
//! errors and log records so failures can be attributed without the payload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    Scrape,
    Crawl,
    Map,
    Search,
    BrowserAgent,
}

impl TaskKind {
    pub const ALL: [TaskKind; 5] = [
        TaskKind::Scrape,
        TaskKind::Crawl,
        TaskKind::Map,
        TaskKind::Search,
        TaskKind::BrowserAgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Scrape => "scrape",
            TaskKind::Crawl => "crawl",
            TaskKind::Map => "map",
            TaskKind::Search => "search",
            TaskKind::BrowserAgent => "browser-agent",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scrape" => Ok(TaskKind::Scrape),
            "crawl" => Ok(TaskKind::Crawl),
            "map" => Ok(TaskKind::Map),
            "search" => Ok(TaskKind::Search),
            "browser-agent" | "browser_agent" | "browse" => Ok(TaskKind::BrowserAgent),
            other => Err(format!("unknown task '{}'", other)),
        }
    }
}
