pub mod letterboxd_entry;
pub mod movie;
pub mod rating;
