pub mod cloud;
pub mod figure;
pub mod listing;
pub mod panels;
