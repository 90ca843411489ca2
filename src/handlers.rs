pub mod backup;
pub mod dashboard;
pub mod propostas;
