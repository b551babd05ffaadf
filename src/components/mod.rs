mod canvas;
pub mod concept_map;
pub mod flow_chart;
pub mod types;
