use std::path::PathBuf;
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::quotes::Quote;

/// Length of one test in seconds
pub const SESSION_SECS: u32 = 60;

/// A session is aborted once the error count goes past this
pub const MAX_ERRORS: u32 = 50;

/// Period of the countdown tick
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Lower wpm bounds of the Average, Fast, Professional and Top tiers
pub const WPM_TIER_BOUNDS: [u32; 4] = [20, 40, 60, 80];

/// Settings resolved from the command line for one run of the app
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeSettings {
    pub custom_quote: Option<Quote>,
    pub score_path: Option<PathBuf>,
    pub no_score: bool,
    pub log_path: Option<PathBuf>,
}

impl RuntimeSettings {
    /// Where the last score lives, or None when score memory is disabled
    pub fn resolved_score_path(&self) -> Option<PathBuf> {
        if self.no_score {
            return None;
        }
        self.score_path.clone().or_else(AppDirs::score_path)
    }

    pub fn resolved_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(AppDirs::log_path)
    }
}
