/// Upper bound shared by every `title` and `slug` column.
pub const MAX_TITLE_LENGTH: usize = 255;

pub const DEFAULT_SEASON_LABEL: &str = "Season";

pub mod media {
    pub const SERIES_DIR: &str = "series";

    pub const COVERS_DIR: &str = "covers";

    /// Upload parts are streamed here before being moved to their final path.
    pub const STAGING_DIR: &str = ".staging";

    pub const DEFAULT_MAX_UPLOAD_MB: u64 = 4096;
}

pub mod limits {
    pub const DEFAULT_LIST_LIMIT: u64 = 100;

    pub const MAX_LIST_LIMIT: u64 = 1000;
}
