pub mod document;
pub mod user;

pub use document::{
    DeleteConfirmation, Document, DocumentList, DocumentType, KeyTerm, RiskClause, RiskSeverity,
    RiskSummary,
};
pub use user::{AuthResponse, User};
