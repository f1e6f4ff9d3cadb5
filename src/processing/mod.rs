//! Signal computations feeding the match scoring engine

pub mod keywords;
pub mod lexical;
pub mod semantic;
pub mod skills;
pub mod text;
