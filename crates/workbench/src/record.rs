//! Stage 4: outpatient record drafting.
//!
//! The draft is assembled from plain substring heuristics over the intake
//! transcript. Sections the demo data cannot supply use fixed text.

use std::fmt;

use chrono::{DateTime, Local};
use order_check::{Role, TranscriptTurn};
use workbench_fixtures::{Fixtures, Patient};

use crate::intake::NOT_AVAILABLE;

/// Past history used when the transcript says nothing to the contrary.
pub const STANDARD_PAST_HISTORY: &str = "既往体健，否认药敏史";

/// Physical exam text for the demo visit.
pub const PHYSICAL_EXAM: &str = "鼻黏膜苍白，双侧下鼻甲肿大，总鼻道可见清水样鼻涕。";

/// Vital signs text for the demo visit.
pub const VITAL_SIGNS: &str = "收缩压:120mmHg、舒张压:78mmHg";

/// Advice text for the demo visit.
pub const ADVICE: &str = "避开过敏原，不适随诊。";

/// Auxiliary exams listed when no orders were chosen.
pub const FALLBACK_AUXILIARY_EXAMS: &str = "过敏原检测、血常规";

const NEGATION: &str = "没有";
const HISTORY_CUES: [&str; 3] = ["以前", "过敏", "既往"];

/// First patient utterance longer than five characters that is not a denial.
pub fn extract_chief_complaint(transcript: &[TranscriptTurn]) -> String {
    transcript
        .iter()
        .filter(|turn| turn.is_patient())
        .find(|turn| turn.text.chars().count() > 5 && !turn.text.contains(NEGATION))
        .map(|turn| turn.text.clone())
        .unwrap_or_default()
}

/// Every non-empty patient utterance, trimmed, one per line.
pub fn extract_present_illness(transcript: &[TranscriptTurn]) -> String {
    transcript
        .iter()
        .filter(|turn| turn.is_patient())
        .map(|turn| turn.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// The patient's answer to the first history question.
///
/// A doctor turn counts as a history question when it mentions `以前`, `过敏`
/// or `既往` and is answered by a non-empty patient turn. A denial maps to
/// [`STANDARD_PAST_HISTORY`].
pub fn extract_past_history(transcript: &[TranscriptTurn]) -> String {
    let answer = transcript.windows(2).find_map(|pair| {
        let (question, reply) = (&pair[0], &pair[1]);
        if question.role != Role::Doctor
            || !HISTORY_CUES.iter().any(|cue| question.text.contains(cue))
            || !reply.is_patient()
        {
            return None;
        }
        let reply = reply.text.trim();
        (!reply.is_empty()).then_some(reply)
    });

    match answer {
        Some(reply) if !reply.contains(NEGATION) => reply.to_string(),
        _ => STANDARD_PAST_HISTORY.to_string(),
    }
}

/// Orders joined for the auxiliary exam line.
pub fn auxiliary_exams<S: AsRef<str>>(orders: &[S]) -> String {
    if orders.is_empty() {
        return FALLBACK_AUXILIARY_EXAMS.to_string();
    }
    orders
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("、")
}

/// A drafted outpatient record.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRecord {
    /// Banner fields; empty when no patient fixture is loaded.
    pub patient: Patient,
    /// 主诉, see [`extract_chief_complaint`].
    pub chief_complaint: String,
    /// 现病史, every patient utterance.
    pub present_illness: String,
    /// 既往史, see [`extract_past_history`].
    pub past_history: String,
    /// 体格检查, fixed demo text.
    pub physical_exam: String,
    /// 生命体征, fixed demo text.
    pub vital_signs: String,
    /// 辅助检查, the chosen orders joined with `、`.
    pub auxiliary_exams: String,
    /// 医嘱, fixed demo text.
    pub advice: String,
    /// When the draft was made.
    pub drafted_at: DateTime<Local>,
}

impl DraftRecord {
    /// Drafts a record for `patient` from the transcript and chosen orders.
    pub fn draft<S: AsRef<str>>(
        patient: Option<&Patient>,
        transcript: &[TranscriptTurn],
        orders: &[S],
    ) -> Self {
        Self {
            patient: patient.cloned().unwrap_or_default(),
            chief_complaint: extract_chief_complaint(transcript),
            present_illness: extract_present_illness(transcript),
            past_history: extract_past_history(transcript),
            physical_exam: PHYSICAL_EXAM.to_string(),
            vital_signs: VITAL_SIGNS.to_string(),
            auxiliary_exams: auxiliary_exams(orders),
            advice: ADVICE.to_string(),
            drafted_at: Local::now(),
        }
    }

    /// The record as editable text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DraftRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        writeln!(
            f,
            "姓名:{}                         性别:{}                     年龄:{}岁                    门诊号:{} 就诊科室:{}",
            field(&self.patient.name),
            field(&self.patient.gender),
            field(&self.patient.age),
            field(&self.patient.patient_id),
            field(&self.patient.department),
        )?;
        writeln!(f, "主诉:         {}", self.chief_complaint)?;
        writeln!(f, "现病史:       {}", self.present_illness)?;
        writeln!(f, "既往史:       {}", self.past_history)?;
        writeln!(f, "体格检查:     {}", self.physical_exam)?;
        writeln!(f, "生命体征:     {}", self.vital_signs)?;
        writeln!(f, "辅助检查:     {}", self.auxiliary_exams)?;
        writeln!(f, "建议:         {}", self.advice)
    }
}

/// Key clues shown beside the record.
///
/// Sidebar key tests come first, then `name: value` for each abnormal
/// summary item. Repeats are dropped keeping the first occurrence.
pub fn key_clues(fixtures: &Fixtures, limit: usize) -> Vec<String> {
    let key_tests = fixtures
        .sidebar_support
        .iter()
        .flat_map(|support| support.key_tests.iter().cloned());
    let abnormal = fixtures.abnormal_summary.iter().flat_map(|summary| {
        summary.abnormal_items.iter().map(|item| {
            format!(
                "{}: {}",
                item.name,
                item.value.as_deref().unwrap_or(NOT_AVAILABLE)
            )
        })
    });

    let mut clues: Vec<String> = Vec::new();
    for clue in key_tests.chain(abnormal) {
        if clues.len() == limit {
            break;
        }
        if !clues.contains(&clue) {
            clues.push(clue);
        }
    }
    clues
}
