pub mod episode;
pub mod season;
pub mod series;
