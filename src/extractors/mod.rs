pub mod movie_extractor;
pub mod pagination;
