use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Rental,
    Employment,
    Nda,
    Terms,
    Loan,
    Service,
    #[default]
    #[serde(other)]
    Other,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Rental => "Rental Agreement",
            DocumentType::Employment => "Employment Contract",
            DocumentType::Nda => "Non-Disclosure Agreement",
            DocumentType::Terms => "Terms & Conditions",
            DocumentType::Loan => "Loan Agreement",
            DocumentType::Service => "Service Agreement",
            DocumentType::Other => "Legal Document",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            DocumentType::Rental => "bg-purple-100 text-purple-700",
            DocumentType::Employment => "bg-blue-100 text-blue-700",
            DocumentType::Nda => "bg-orange-100 text-orange-700",
            DocumentType::Terms => "bg-gray-100 text-gray-700",
            DocumentType::Loan => "bg-red-100 text-red-700",
            DocumentType::Service => "bg-green-100 text-green-700",
            DocumentType::Other => "bg-slate-100 text-slate-700",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl RiskSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            RiskSeverity::High => "HIGH RISK",
            RiskSeverity::Medium => "MEDIUM RISK",
            RiskSeverity::Low => "LOW RISK",
            RiskSeverity::Unknown => "UNRATED",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            RiskSeverity::High => "bg-red-100 text-red-700 border-red-200",
            RiskSeverity::Medium => "bg-yellow-100 text-yellow-700 border-yellow-200",
            RiskSeverity::Low => "bg-green-100 text-green-700 border-green-200",
            RiskSeverity::Unknown => "bg-gray-100 text-gray-700 border-gray-200",
        }
    }

    pub fn card_class(&self) -> &'static str {
        match self {
            RiskSeverity::High => "border-red-200 bg-red-50",
            RiskSeverity::Medium => "border-yellow-200 bg-yellow-50",
            RiskSeverity::Low | RiskSeverity::Unknown => "border-green-200 bg-green-50",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            RiskSeverity::High => "🔴",
            RiskSeverity::Medium => "🟡",
            RiskSeverity::Low => "🟢",
            RiskSeverity::Unknown => "⚪",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskClause {
    pub clause: String,
    pub explanation: String,
    pub severity: RiskSeverity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTerm {
    pub term: String,
    pub value: String,
}

/// An analyzed document as returned by the backend.
///
/// History entries carry a truncated summary and no clauses or terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub document_type: DocumentType,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub risk_clauses: Vec<RiskClause>,
    #[serde(default)]
    pub key_terms: Vec<KeyTerm>,
}

impl Document {
    pub fn created_on(&self) -> Option<NaiveDate> {
        parse_timestamp(&self.created_at)
    }

    /// e.g. `5 Mar 2026`; empty when the backend sent no usable timestamp.
    pub fn created_label(&self) -> String {
        self.created_on()
            .map(|date| date.format("%-d %b %Y").to_string())
            .unwrap_or_default()
    }

    pub fn risk_summary(&self) -> RiskSummary {
        RiskSummary::from_clauses(&self.risk_clauses)
    }

    pub fn result_path(&self) -> String {
        format!("/result/{}", urlencoding::encode(&self.id))
    }

    /// Target of the history row's delete button.
    pub fn history_entry_path(&self) -> String {
        format!("/history/{}", urlencoding::encode(&self.id))
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskSummary {
    pub fn has_high(&self) -> bool {
        self.high > 0
    }

    pub fn has_medium(&self) -> bool {
        self.medium > 0
    }

    pub fn has_low(&self) -> bool {
        self.low > 0
    }

    pub fn from_clauses(clauses: &[RiskClause]) -> Self {
        clauses
            .iter()
            .fold(RiskSummary::default(), |mut acc, clause| {
                match clause.severity {
                    RiskSeverity::High => acc.high += 1,
                    RiskSeverity::Medium => acc.medium += 1,
                    RiskSeverity::Low => acc.low += 1,
                    RiskSeverity::Unknown => {}
                }
                acc
            })
    }
}

/// Confirmation body of a successful delete.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteConfirmation {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// The history view's working copy of the user's documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentList {
    documents: Vec<Document>,
}

impl DocumentList {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "id": "doc_1",
        "fileName": "lease.pdf",
        "fileUrl": "",
        "documentType": "rental",
        "summary": "A twelve month lease.",
        "riskClauses": [
            {"clause": "Tenant pays all repairs", "explanation": "Unusual", "severity": "high"},
            {"clause": "Late fee 5%", "explanation": "Common", "severity": "low"},
            {"clause": "Auto renewal", "explanation": "Watch out", "severity": "severe"}
        ],
        "keyTerms": [{"term": "Rent", "value": "₹25,000"}],
        "createdAt": "2026-03-05T10:15:30.123456"
    }"#;

    #[test]
    fn decodes_full_document() {
        let doc: Document = serde_json::from_str(FULL).unwrap();
        assert_eq!(doc.document_type, DocumentType::Rental);
        assert_eq!(doc.risk_clauses.len(), 3);
        assert_eq!(doc.risk_clauses[2].severity, RiskSeverity::Unknown);
        assert_eq!(doc.created_label(), "5 Mar 2026");
        assert_eq!(doc.result_path(), "/result/doc_1");
        assert_eq!(
            doc.risk_summary(),
            RiskSummary {
                high: 1,
                medium: 0,
                low: 1
            }
        );
    }

    #[test]
    fn history_entry_defaults_missing_fields() {
        let doc: Document = serde_json::from_str(
            r#"{"id":"doc_9","fileName":"nda.pdf","documentType":"mou","summary":"short","createdAt":""}"#,
        )
        .unwrap();
        assert_eq!(doc.document_type, DocumentType::Other);
        assert!(doc.risk_clauses.is_empty());
        assert!(doc.key_terms.is_empty());
        assert_eq!(doc.created_label(), "");
    }

    #[test]
    fn rfc3339_timestamps_parse() {
        assert_eq!(
            parse_timestamp("2025-12-31T23:00:00+00:00"),
            NaiveDate::from_ymd_opt(2025, 12, 31)
        );
        assert_eq!(parse_timestamp("not a date"), None);
    }

    #[test]
    fn paths_keep_the_id_in_one_segment() {
        let doc: Document =
            serde_json::from_str(r#"{"id":"../auth/me?x#y","fileName":"a.pdf"}"#).unwrap();
        assert_eq!(doc.result_path(), "/result/..%2Fauth%2Fme%3Fx%23y");
        assert_eq!(doc.history_entry_path(), "/history/..%2Fauth%2Fme%3Fx%23y");
    }

    #[test]
    fn risk_summary_flags_only_present_levels() {
        let summary = RiskSummary {
            high: 0,
            medium: 2,
            low: 0,
        };
        assert!(!summary.has_high());
        assert!(summary.has_medium());
        assert!(!summary.has_low());
    }
}
