pub mod consulta;
pub mod proposta_service;
pub use proposta_service::PropostaService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod backup_service;
pub use backup_service::BackupService;
