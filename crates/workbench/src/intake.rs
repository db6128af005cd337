//! Stage 1: intake transcript review and similar cases.

use workbench_fixtures::{Fixtures, SimilarCase};

use crate::config::WorkbenchConfig;

/// Placeholder for a missing fixture field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Conversation highlights for the intake summary.
///
/// Uses the highlight fixture when it has entries; otherwise falls back to the
/// text of the last `highlight_count` transcript turns.
pub fn highlights(fixtures: &Fixtures, config: &WorkbenchConfig) -> Vec<String> {
    match fixtures.highlights.as_deref() {
        Some(highlights) if !highlights.is_empty() => highlights.to_vec(),
        _ => {
            let transcript = fixtures.transcript();
            let start = transcript.len().saturating_sub(config.highlight_count);
            transcript[start..]
                .iter()
                .map(|turn| turn.text.clone())
                .collect()
        }
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// One-line header for a similar case card.
pub fn case_summary(case: &SimilarCase) -> String {
    format!(
        "姓名:{}　　性别:{}　　年龄:{}　　门诊号:{}　　就诊科室:{}　　相似度:{:.2}",
        or_na(&case.patient_name),
        or_na(&case.gender),
        or_na(&case.age),
        or_na(&case.case_id),
        or_na(&case.department),
        case.similarity.unwrap_or(0.0),
    )
}

/// Labelled record sections of a similar case, in display order.
pub fn case_details(case: &SimilarCase) -> Vec<(&'static str, &str)> {
    vec![
        ("主诉", or_na(&case.chief_complaint)),
        ("现病史", or_na(&case.history_present)),
        ("既往史", or_na(&case.history_past)),
        ("中医四诊", or_na(&case.tcm_diagnosis_info)),
        ("体格检查", or_na(&case.physical_exam)),
        ("生命体征", or_na(&case.vital_signs)),
        ("西医诊断", or_na(&case.western_diagnosis)),
        ("中医诊断", or_na(&case.tcm_diagnosis)),
        ("辅助检查", or_na(&case.auxiliary_exam)),
        ("药品处方", or_na(&case.prescription)),
        ("建议", or_na(&case.advice)),
        ("治疗效果", or_na(&case.treatment_effect)),
    ]
}

/// Outcome-oriented sections shown in a case detail dialog.
pub fn case_outline(case: &SimilarCase) -> Vec<(&'static str, &str)> {
    vec![
        ("主诉", or_na(&case.chief_complaint)),
        ("时间线", or_na(&case.timeline)),
        ("关键发现", or_na(&case.key_findings)),
        ("最终诊断", or_na(&case.diagnosis)),
        ("转归", or_na(&case.outcome)),
    ]
}
