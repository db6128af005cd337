//! Shapes of the patient, similar-case and lab-summary fixtures.
//!
//! Every field is optional: the fixtures are hand-written demo data and the
//! stages render `N/A` for anything missing.

use serde::{Deserialize, Deserializer, Serialize};

/// A JSON scalar kept as display text.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

/// Accepts a string, number or bool and keeps it as text.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

/// The patient being seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Outpatient number; numeric ids are kept as text.
    #[serde(default, deserialize_with = "scalar_text")]
    pub patient_id: Option<String>,
    /// Patient name.
    #[serde(default)]
    pub name: Option<String>,
    /// Gender as written in the fixture.
    #[serde(default)]
    pub gender: Option<String>,
    /// Age in years, as text.
    #[serde(default, deserialize_with = "scalar_text")]
    pub age: Option<String>,
    /// Visiting department.
    #[serde(default)]
    pub department: Option<String>,
    /// Date of this visit.
    #[serde(default)]
    pub visit_date: Option<String>,
    /// Chief complaint recorded at registration.
    #[serde(default)]
    pub chief_complaint: Option<String>,
}

/// A past case similar to the current visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarCase {
    /// Case identifier, as text.
    #[serde(default, deserialize_with = "scalar_text")]
    pub case_id: Option<String>,
    /// Name of the past patient.
    #[serde(default)]
    pub patient_name: Option<String>,
    /// Gender of the past patient.
    #[serde(default)]
    pub gender: Option<String>,
    /// Age of the past patient, as text.
    #[serde(default, deserialize_with = "scalar_text")]
    pub age: Option<String>,
    /// Department that saw the case.
    #[serde(default)]
    pub department: Option<String>,
    /// Similarity score in `0.0..=1.0`.
    #[serde(default)]
    pub similarity: Option<f64>,
    /// 主诉
    #[serde(default)]
    pub chief_complaint: Option<String>,
    /// 现病史
    #[serde(default)]
    pub history_present: Option<String>,
    /// 既往史
    #[serde(default)]
    pub history_past: Option<String>,
    /// 中医四诊
    #[serde(default)]
    pub tcm_diagnosis_info: Option<String>,
    /// 体格检查
    #[serde(default)]
    pub physical_exam: Option<String>,
    /// 生命体征
    #[serde(default)]
    pub vital_signs: Option<String>,
    /// 西医诊断
    #[serde(default)]
    pub western_diagnosis: Option<String>,
    /// 中医诊断
    #[serde(default)]
    pub tcm_diagnosis: Option<String>,
    /// 辅助检查
    #[serde(default)]
    pub auxiliary_exam: Option<String>,
    /// 处方
    #[serde(default)]
    pub prescription: Option<String>,
    /// 医嘱
    #[serde(default)]
    pub advice: Option<String>,
    /// 疗效
    #[serde(default)]
    pub treatment_effect: Option<String>,
    /// Course of the illness, shown in the outline.
    #[serde(default)]
    pub timeline: Option<String>,
    /// Key findings, shown in the outline.
    #[serde(default)]
    pub key_findings: Option<String>,
    /// Final diagnosis, shown in the outline.
    #[serde(default)]
    pub diagnosis: Option<String>,
    /// Outcome, shown in the outline.
    #[serde(default)]
    pub outcome: Option<String>,
}

/// One abnormal lab value with its interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbnormalItem {
    /// Lab item name.
    #[serde(default)]
    pub name: String,
    /// Measured value with its unit, as text.
    #[serde(default, deserialize_with = "scalar_text")]
    pub value: Option<String>,
    /// Clinical meaning of the deviation.
    #[serde(default)]
    pub meaning: Option<String>,
    /// What to watch for.
    #[serde(default)]
    pub attention: Option<String>,
}

/// Summary of abnormal lab values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbnormalSummary {
    /// Abnormal values in display order.
    #[serde(default)]
    pub abnormal_items: Vec<AbnormalItem>,
}

/// Supporting notes for the record-writing stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarSupport {
    /// Key test results, one line each.
    #[serde(default)]
    pub key_tests: Vec<String>,
}
