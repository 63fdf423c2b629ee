use std::fmt;

/// One independently toggled propagation path of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyncChannel {
    Camera,
    Slice,
    Intensity,
}

impl SyncChannel {
    pub const ALL: [Self; 3] = [Self::Camera, Self::Slice, Self::Intensity];
}

impl fmt::Display for SyncChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Camera => "camera",
            Self::Slice => "slice",
            Self::Intensity => "intensity",
        };

        f.write_str(name)
    }
}
