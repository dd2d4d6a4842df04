//! Evaluation Report

use crate::error::TriageError;
use chrono::{DateTime, Utc};
use classifier::ClassifierOutcome;
use rule_engine::{Firing, RunSummary};
use serde::Serialize;
use uuid::Uuid;
use working_memory::{ExplanationSource, Fact, FactKind, FactStore, SessionLog};

/// Final severity of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityView {
    pub level: u8,
    pub description: String,
    /// False for the undetermined level 0
    pub determined: bool,
}

/// Explanation texts grouped by source, each in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Explanations {
    pub ai: Vec<String>,
    pub system: Vec<String>,
    pub additional_factors: Vec<String>,
}

impl Explanations {
    pub fn len(&self) -> usize {
        self.ai.len() + self.system.len() + self.additional_factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything a caller needs after one evaluation
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub session_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub classifier: ClassifierOutcome,
    pub severity: SeverityView,
    pub explanations: Explanations,
    pub recommendations: Vec<String>,
    pub audit_log: SessionLog,
    pub firings: Vec<Firing>,
    pub summary: RunSummary,
}

impl EvaluationReport {
    /// Read the final fact set back out of a finished session
    pub(crate) fn from_session(
        session_id: Uuid,
        evaluated_at: DateTime<Utc>,
        classifier: ClassifierOutcome,
        store: FactStore,
        firings: Vec<Firing>,
        summary: RunSummary,
    ) -> Result<Self, TriageError> {
        let severities: Vec<_> = store
            .of_kind(FactKind::Severity)
            .filter_map(|(_, fact)| match fact {
                Fact::Severity { level, description } => Some(SeverityView {
                    level: *level,
                    description: description.clone(),
                    determined: *level != conduct_rules::UNDETERMINED_LEVEL,
                }),
                _ => None,
            })
            .collect();

        let severity = match <[SeverityView; 1]>::try_from(severities) {
            Ok([severity]) => severity,
            Err(found) => return Err(TriageError::SeverityInvariant(found.len())),
        };

        let mut explanations = Explanations::default();
        let mut recommendations = Vec::new();
        for (_, fact) in store.iter() {
            match fact {
                Fact::Explanation { text, source } => {
                    let group = match source {
                        ExplanationSource::Ai => &mut explanations.ai,
                        ExplanationSource::System => &mut explanations.system,
                        ExplanationSource::AdditionalFactor => &mut explanations.additional_factors,
                    };
                    group.push(text.clone());
                }
                Fact::Recommendation { text } => recommendations.push(text.clone()),
                _ => {}
            }
        }

        Ok(Self {
            session_id,
            evaluated_at,
            classifier,
            severity,
            explanations,
            recommendations,
            audit_log: store.into_log(),
            firings,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(store: FactStore) -> Result<EvaluationReport, TriageError> {
        EvaluationReport::from_session(
            Uuid::new_v4(),
            Utc::now(),
            ClassifierOutcome::failed(),
            store,
            Vec::new(),
            RunSummary::default(),
        )
    }

    #[test]
    fn test_groups_explanations_by_source() {
        let mut store = FactStore::new();
        store.declare(Fact::severity(3, "Offensive"));
        store.declare(Fact::explanation("factor one", ExplanationSource::AdditionalFactor));
        store.declare(Fact::explanation("ai", ExplanationSource::Ai));
        store.declare(Fact::explanation("factor two", ExplanationSource::AdditionalFactor));
        store.declare(Fact::recommendation("act"));

        let report = report(store).unwrap();
        assert_eq!(
            report.severity,
            SeverityView { level: 3, description: "Offensive".into(), determined: true }
        );
        assert_eq!(report.explanations.ai, vec!["ai"]);
        assert!(report.explanations.system.is_empty());
        assert_eq!(report.explanations.additional_factors, vec!["factor one", "factor two"]);
        assert_eq!(report.recommendations, vec!["act"]);
        assert_eq!(report.audit_log.len(), 5);
    }

    #[test]
    fn test_severity_count_is_checked() {
        let err = report(FactStore::new()).unwrap_err();
        assert!(matches!(err, TriageError::SeverityInvariant(0)));

        let mut store = FactStore::new();
        store.declare(Fact::severity(0, "Undetermined by AI"));
        store.declare(Fact::severity(2, "Embarrassing and mildly offensive"));
        let err = report(store).unwrap_err();
        assert!(matches!(err, TriageError::SeverityInvariant(2)));
    }

    #[test]
    fn test_serializes_to_json() {
        let mut store = FactStore::new();
        store.declare(Fact::severity(0, "Undetermined by AI"));

        let json = serde_json::to_value(report(store).unwrap()).unwrap();
        assert_eq!(json["severity"]["determined"], false);
        assert_eq!(json["audit_log"][0]["fact"]["type"], "Severity");
        assert_eq!(json["audit_log"][0]["origin"]["kind"], "asserted");
    }
}
