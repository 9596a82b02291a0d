pub mod panels;
pub mod songs;
