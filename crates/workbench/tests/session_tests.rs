//! End-to-end tests of the four stages over a fixture directory.

use std::fs;
use std::path::Path;

use order_check::{Priority, RuleCollection};
use tempfile::{tempdir, TempDir};
use workbench::{intake, ordering, record, results, view};
use workbench::{
    key_clues, DialogAction, Session, SubmissionOutcome, SubmitError, WorkbenchConfig,
};
use workbench_fixtures::{FixtureKind, FixtureStore, Fixtures};

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn demo_dir() -> TempDir {
    let dir = tempdir().unwrap();
    let path = dir.path();
    write(
        path,
        "patient.json",
        r#"{"patient_id": "MZ20240315", "name": "李华", "gender": "女", "age": 32, "department": "耳鼻喉科"}"#,
    );
    write(
        path,
        "transcript.json",
        r#"[
            {"role": "医生", "text": "您好，哪里不舒服？"},
            {"role": "病人", "text": "最近一个月老是打喷嚏、流清鼻涕"},
            {"role": "医生", "text": "有没有咳嗽或者喘？"},
            {"role": "病人", "text": "晚上有点咳嗽，没有发烧"},
            {"role": "医生", "text": "以前有过敏史吗？"},
            {"role": "病人", "text": "没有"}
        ]"#,
    );
    write(
        path,
        "orders_ranked.json",
        r#"[
            {"order_name": "血常规", "order": 2, "reason": "评估嗜酸性粒细胞"},
            {"order_name": "鼻内镜检查", "order": 3, "reason": "观察鼻腔黏膜"},
            {"order_name": "过敏原检测", "order": 1, "reason": "明确过敏原"},
            {"order_name": "血清总IgE", "reason": "评估过敏状态"}
        ]"#,
    );
    write(
        path,
        "order_check_rules.json",
        r#"{
            "conflicts": [
                {"group": "过敏评估重复", "items": ["过敏原检测", "血清总IgE"],
                 "reason": "两项均评估IgE介导的过敏", "suggestion": "优先选择过敏原检测"}
            ],
            "missing_checks": [
                {"missing_item": "肺功能检查", "symptom_keywords": ["喘", "胸闷"], "priority": "高"},
                {"missing_item": "胸部X线", "symptom_keywords": ["咳嗽"], "priority": "中",
                 "warning": "患者有咳嗽症状"},
                {"missing_item": "鼻内镜检查", "symptom_keywords": ["鼻涕"]}
            ]
        }"#,
    );
    write(
        path,
        "abnormal_summary.json",
        r#"{"abnormal_items": [{"name": "嗜酸性粒细胞比例", "value": "32.00%", "meaning": "提示过敏"}]}"#,
    );
    write(
        path,
        "sidebar_support.json",
        r#"{"key_tests": ["过敏原检测: 尘螨阳性"]}"#,
    );
    write(
        path,
        "lab_table.csv",
        "项目,结果,单位,标记\n白细胞计数,6.5,10^9/L,\n嗜酸性粒细胞比例,32.00,%,↑\n",
    );
    dir
}

fn load(dir: &TempDir) -> std::sync::Arc<Fixtures> {
    let config = WorkbenchConfig::builder().with_data_dir(dir.path()).build();
    FixtureStore::open(config.fixture_paths()).unwrap().fixtures()
}

#[test]
fn test_submission_with_findings_then_go_back() {
    let dir = demo_dir();
    let fixtures = load(&dir);

    let mut session = Session::new();
    session.selection_mut().extend(["过敏原检测", "血清总IgE", "血常规"]);
    let dialog = session.submit(&fixtures).unwrap();

    let report = &dialog.report;
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.conflicts[0].items, vec!["过敏原检测", "血清总IgE"]);

    let missing: Vec<&str> = report.missing.iter().map(|m| m.item.as_str()).collect();
    assert_eq!(missing, vec!["胸部X线", "鼻内镜检查"]);
    assert_eq!(report.missing[1].priority, Priority::Unset);
    assert_eq!(dialog.actions(), &[DialogAction::SubmitAnyway, DialogAction::GoBack]);

    assert_eq!(session.resolve(dialog, DialogAction::GoBack), SubmissionOutcome::Returned);
    assert_eq!(session.selection().len(), 3);
}

#[test]
fn test_clean_submission_feeds_record() {
    let dir = demo_dir();
    let fixtures = load(&dir);

    let mut session = Session::new();
    session.selection_mut().extend(["胸部X线", "鼻内镜检查"]);
    let dialog = session.submit(&fixtures).unwrap();
    assert!(!dialog.report.has_issues());
    assert_eq!(dialog.actions(), &[DialogAction::ConfirmSubmit]);

    let outcome = session.resolve(dialog, DialogAction::ConfirmSubmit);
    assert_eq!(
        outcome,
        SubmissionOutcome::Submitted {
            orders: vec!["胸部X线".into(), "鼻内镜检查".into()]
        }
    );
    assert!(session.selection().is_empty());

    let text = session.record_text(&fixtures).to_string();
    assert!(text.starts_with("姓名:李华 "));
    assert!(text.contains("主诉:         最近一个月老是打喷嚏、流清鼻涕\n"));
    assert!(text.contains(&format!("既往史:       {}\n", record::STANDARD_PAST_HISTORY)));
    assert!(text.contains("辅助检查:     胸部X线、鼻内镜检查\n"));
}

#[test]
fn test_submit_without_rule_file() {
    let dir = demo_dir();
    fs::remove_file(dir.path().join("order_check_rules.json")).unwrap();
    let fixtures = load(&dir);

    let mut session = Session::new();
    session.selection_mut().insert("血常规");
    assert_eq!(session.submit(&fixtures), Err(SubmitError::RuleFileMissing));
    assert_eq!(session.selection().len(), 1);
}

#[test]
fn test_submit_with_unparsable_rule_file() {
    let dir = demo_dir();
    write(dir.path(), "order_check_rules.json", r#"{"conflicts": [}"#);
    let fixtures = load(&dir);

    let mut session = Session::new();
    session.selection_mut().insert("血常规");
    match session.submit(&fixtures) {
        Err(err @ SubmitError::RuleFileInvalid(_)) => {
            assert!(err.to_string().starts_with("规则文件加载失败: "));
            assert!(err.to_string().contains("order_check_rules.json"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(session.selection().len(), 1);
}

#[test]
fn test_broken_unrelated_fixtures_leave_submission_working() {
    let dir = demo_dir();
    write(dir.path(), "similar_cases.json", "[{\"case_id\": 1");
    write(dir.path(), "patient.json", "not json");
    let fixtures = load(&dir);
    assert!(fixtures.failure(FixtureKind::SimilarCases).is_some());
    assert!(fixtures.failure(FixtureKind::Patient).is_some());

    let mut session = Session::new();
    session.selection_mut().extend(["过敏原检测", "血清总IgE"]);
    let dialog = session.submit(&fixtures).unwrap();
    assert_eq!(dialog.report.conflicts.len(), 1);

    let config = WorkbenchConfig::default();
    assert!(view::render_intake(&fixtures, &config).contains("暂无相似病例"));
    assert!(session.record_text(&fixtures).starts_with("姓名: "));
}

#[test]
fn test_submit_with_partial_rule_file() {
    let dir = demo_dir();
    write(dir.path(), "order_check_rules.json", r#"{"conflicts": []}"#);
    let fixtures = load(&dir);

    let mut session = Session::new();
    session.selection_mut().insert("血常规");
    match session.submit(&fixtures) {
        Err(SubmitError::RulesUnavailable(err)) => {
            assert!(err.to_string().contains(&RuleCollection::MissingChecks.to_string()));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_empty_selection_never_checks() {
    let dir = demo_dir();
    let fixtures = load(&dir);
    assert_eq!(Session::new().submit(&fixtures), Err(SubmitError::EmptySelection));
}

#[test]
fn test_catalog_listing_and_search() {
    let dir = demo_dir();
    let fixtures = load(&dir);

    let ranked = ordering::ranked_orders(ordering::catalog(&fixtures).unwrap());
    let names: Vec<&str> = ranked.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["过敏原检测", "血常规", "鼻内镜检查", "血清总IgE"]);

    let found = ordering::search_orders(&ranked, "血");
    assert_eq!(found.len(), 2);
    assert!(view::render_orders(&found).contains("血清总IgE"));
}

#[test]
fn test_intake_falls_back_to_transcript() {
    let dir = demo_dir();
    let fixtures = load(&dir);
    let config = WorkbenchConfig::builder().with_highlight_count(2).build();

    assert_eq!(
        intake::highlights(&fixtures, &config),
        vec!["以前有过敏史吗？", "没有"]
    );
    let text = view::render_intake(&fixtures, &config);
    assert!(text.contains("暂无相似病例"));
}

#[test]
fn test_labs_and_clues() {
    let dir = demo_dir();
    let fixtures = load(&dir);

    let table = results::lab_table(&fixtures).unwrap();
    assert_eq!(table.abnormal_rows().count(), 1);
    assert_eq!(
        results::export_csv(table, true).unwrap(),
        "项目,结果,单位,标记\n嗜酸性粒细胞比例,32.00,%,↑\n"
    );

    assert_eq!(
        key_clues(&fixtures, 6),
        vec!["过敏原检测: 尘螨阳性", "嗜酸性粒细胞比例: 32.00%"]
    );
}
