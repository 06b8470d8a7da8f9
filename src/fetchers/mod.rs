pub mod profile_fetcher;
