pub mod analytics;
pub mod charts;
pub mod compare;
pub mod detail;
pub mod panels;
pub mod rankings;
