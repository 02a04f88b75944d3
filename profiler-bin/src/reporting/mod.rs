mod summary;

pub use self::summary::{format_phases, ProfileSummary};
