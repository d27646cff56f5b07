pub mod batch_report;
pub mod health_badge;
pub mod history_panel;
pub mod sidebar;
pub mod verdict_card;
