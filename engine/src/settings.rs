use serde::{Deserialize, Serialize};

use crate::config::Validate;

pub const DEFAULT_CLASSIC_DEPTH: usize = 6;
pub const DEFAULT_LARGE_DEPTH: usize = 4;
pub const MAX_SEARCH_DEPTH: usize = 9;

/// Depth budgets for the minimax bot.
///
/// Six plies make 3×3 play effectively perfect. Exhaustive 5×5 search is far out
/// of reach, so the large board settles for four plies and plays heuristically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub classic_depth: usize,
    pub large_depth: usize,
}

impl SearchSettings {
    pub fn depth_for(&self, size: usize) -> usize {
        if size <= 3 {
            self.classic_depth
        } else {
            self.large_depth
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            classic_depth: DEFAULT_CLASSIC_DEPTH,
            large_depth: DEFAULT_LARGE_DEPTH,
        }
    }
}

impl Validate for SearchSettings {
    fn validate(&self) -> Result<(), String> {
        for (name, depth) in [("classic_depth", self.classic_depth), ("large_depth", self.large_depth)] {
            if depth == 0 || depth > MAX_SEARCH_DEPTH {
                return Err(format!(
                    "{} must be between 1 and {}, got {}",
                    name, MAX_SEARCH_DEPTH, depth
                ));
            }
        }
        Ok(())
    }
}
