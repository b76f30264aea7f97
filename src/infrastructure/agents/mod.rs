pub mod advisor;
pub mod market;
pub mod news;
pub mod technical;
