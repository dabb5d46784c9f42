/// eframe/egui front end: filter panel, top bar, preview table and charts.

pub mod panels;
pub mod plot;
pub mod table;
