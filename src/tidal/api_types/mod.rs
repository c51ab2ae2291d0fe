pub mod playlist;
pub mod search_results;
pub mod user;
