use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// 印度农业季节
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
}

impl Season {
    /// 6-10 月为 Kharif，11-2 月为 Rabi，其余为 Zaid
    pub fn for_month(month: u32) -> Self {
        match month {
            6..=10 => Season::Kharif,
            11 | 12 | 1 | 2 => Season::Rabi,
            _ => Season::Zaid,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_month(date.month())
    }

    pub fn current() -> Self {
        Self::for_date(chrono::Local::now().date_naive())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "kharif" => Ok(Season::Kharif),
            "rabi" => Ok(Season::Rabi),
            "zaid" => Ok(Season::Zaid),
            other => Err(format!("unknown season `{}`", other)),
        }
    }
}
