use std::fmt::Display;

/// A category of local state that can be reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum ResetAction {
    /// General and admin preferences, exported settings and the app language
    Preferences,
    /// Saved form instances and the instances database
    Instances,
    /// Blank forms, their media, the forms database and the itemset database
    Forms,
    /// Offline map layers
    Layers,
    /// Generic cache folder
    Cache,
    /// Third-party map tile cache
    MapTileCache,
}

impl ResetAction {
    /// Every action, in legacy code order
    pub const ALL: [Self; 6] = [
        Self::Preferences,
        Self::Instances,
        Self::Forms,
        Self::Layers,
        Self::Cache,
        Self::MapTileCache,
    ];

    /// Integer code used by older hosts
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Preferences => 0,
            Self::Instances => 1,
            Self::Forms => 2,
            Self::Layers => 3,
            Self::Cache => 4,
            Self::MapTileCache => 5,
        }
    }

    /// Parses a legacy integer code. Unknown codes yield `None`.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Preferences),
            1 => Some(Self::Instances),
            2 => Some(Self::Forms),
            3 => Some(Self::Layers),
            4 => Some(Self::Cache),
            5 => Some(Self::MapTileCache),
            _ => None,
        }
    }

    /// Stable name used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Preferences => "preferences",
            Self::Instances => "instances",
            Self::Forms => "forms",
            Self::Layers => "layers",
            Self::Cache => "cache",
            Self::MapTileCache => "map_tile_cache",
        }
    }
}

impl Display for ResetAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every reset action, for hosts building their reset dialog
#[uniffi::export]
#[must_use]
pub fn all_reset_actions() -> Vec<ResetAction> {
    ResetAction::ALL.to_vec()
}
