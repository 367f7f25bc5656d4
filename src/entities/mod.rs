pub mod prelude;

pub mod episodes;
pub mod seasons;
pub mod series;
