//! Integration tests for the order safety check.
//!
//! Rules and transcript mirror the allergic-rhinitis demo visit.

use order_check::{
    check, CheckError, ConflictRule, MissingItemRule, OrderChecker, Priority, RuleCollection,
    RuleSet, Selection, TranscriptTurn,
};
use std::collections::{BTreeSet, HashSet};

fn conflict_rules() -> Vec<ConflictRule> {
    vec![
        ConflictRule::new("凝血功能重复", ["APTT", "PT"])
            .with_reason("APTT与PT同属凝血功能筛查")
            .with_suggestion("如无出血倾向可仅保留其一"),
        ConflictRule::new("影像重复", ["胸部X线", "胸部CT"])
            .with_reason("同一部位重复影像")
            .with_suggestion("优先选择胸部CT"),
        ConflictRule::new("炎症指标重复", ["CRP", "PCT", "血常规"]),
    ]
}

fn missing_rules() -> Vec<MissingItemRule> {
    vec![
        MissingItemRule::new("鼻内镜", ["鼻塞", "流涕"])
            .with_priority(Priority::Medium)
            .with_reason("持续鼻部症状"),
        MissingItemRule::new("胸部CT", ["咳嗽", "胸痛"])
            .with_priority(Priority::High)
            .with_warning("咳嗽需排除下呼吸道病变"),
        MissingItemRule::new("肺功能", ["喘", "胸闷"]).with_priority(Priority::Low),
        MissingItemRule::new("过敏原检测", ["喷嚏", "鼻痒"]).with_priority(Priority::High),
    ]
}

fn transcript() -> Vec<TranscriptTurn> {
    vec![
        TranscriptTurn::doctor("哪里不舒服？有没有胸闷、喘？"),
        TranscriptTurn::patient("最近一个月老是打喷嚏，鼻子痒"),
        TranscriptTurn::doctor("咳嗽吗？"),
        TranscriptTurn::patient("我有点咳嗽"),
        TranscriptTurn::patient("早上起来流涕"),
    ]
}

fn selection(names: &[&str]) -> Selection {
    names.iter().copied().collect()
}

#[test]
fn test_scenario_no_conflict_with_missing_ct() {
    let conflicts = conflict_rules();
    let missing = vec![MissingItemRule::new("胸部CT", ["咳嗽", "胸痛"]).with_priority(Priority::Medium)];
    let sel = selection(&["过敏原检测", "血常规"]);

    let report = check(&sel, Some(&conflicts), Some(&missing), &transcript()).unwrap();

    assert!(report.conflicts.is_empty());
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].item, "胸部CT");
    assert_eq!(report.missing[0].priority, Priority::Medium);
}

#[test]
fn test_scenario_coagulation_conflict() {
    let conflicts = conflict_rules();
    let sel = selection(&["PT", "血常规", "APTT"]);

    let report = check(&sel, Some(&conflicts), Some(&[]), &[]).unwrap();

    assert_eq!(report.conflicts.len(), 1);
    let finding = &report.conflicts[0];
    assert_eq!(finding.group, "凝血功能重复");
    assert_eq!(finding.items, vec!["APTT", "PT"]);
    assert_eq!(finding.reason, "APTT与PT同属凝血功能筛查");
    assert_eq!(finding.suggestion, "如无出血倾向可仅保留其一");
}

#[test]
fn test_scenario_empty_selection_is_empty_report() {
    let conflicts = conflict_rules();
    let missing = vec![MissingItemRule::new("胸部CT", ["不会出现的词"])];
    let report = check(&Selection::new(), Some(&conflicts), Some(&missing), &transcript()).unwrap();
    assert!(!report.has_issues());
}

#[test]
fn test_scenario_missing_rule_sets_are_config_errors() {
    let err = check(&selection(&["APTT"]), None, None, &transcript()).unwrap_err();
    assert_eq!(
        err,
        CheckError::MissingRuleCollection {
            collection: RuleCollection::Conflicts
        }
    );

    let conflicts = conflict_rules();
    let err = check(&selection(&["APTT"]), Some(&conflicts), None, &transcript()).unwrap_err();
    assert_eq!(
        err,
        CheckError::MissingRuleCollection {
            collection: RuleCollection::MissingChecks
        }
    );

    let report = check(&selection(&["APTT"]), Some(&[]), Some(&[]), &transcript()).unwrap();
    assert!(!report.has_issues());
}

#[test]
fn test_scenario_same_candidate_two_priorities() {
    let missing = vec![
        MissingItemRule::new("胸部CT", ["胸痛", "咳嗽"]).with_priority(Priority::Low),
        MissingItemRule::new("胸部CT", ["咳嗽"]).with_priority(Priority::High),
    ];
    let report = check(&selection(&["血常规"]), Some(&[]), Some(&missing), &transcript()).unwrap();

    assert_eq!(report.missing.len(), 2);
    assert_eq!(report.missing[0].priority, Priority::High);
    assert_eq!(report.missing[1].priority, Priority::Low);
    assert!(report.missing.iter().all(|f| f.item == "胸部CT"));
}

#[test]
fn test_doctor_turns_are_not_searched() {
    // "胸闷" and "喘" only appear in the doctor's question.
    let missing = missing_rules();
    let report = check(&selection(&["血常规"]), Some(&[]), Some(&missing), &transcript()).unwrap();
    assert!(report.missing.iter().all(|f| f.item != "肺功能"));
}

#[test]
fn test_missing_findings_sorted_by_priority() {
    let missing = missing_rules();
    let report = check(&selection(&["血常规"]), Some(&[]), Some(&missing), &transcript()).unwrap();

    let items: Vec<&str> = report.missing.iter().map(|f| f.item.as_str()).collect();
    assert_eq!(items, vec!["胸部CT", "过敏原检测", "鼻内镜"]);
}

#[test]
fn test_keyword_match_is_case_sensitive() {
    let missing = vec![MissingItemRule::new("Chest CT", ["Cough"])];
    let turns = vec![TranscriptTurn::patient("I have a cough")];
    let report = check(&selection(&["CBC"]), Some(&[]), Some(&missing), &turns).unwrap();
    assert!(report.missing.is_empty());
}

#[test]
fn test_keyword_can_span_patient_turns() {
    // Patient turns are joined by one space before searching.
    let missing = vec![MissingItemRule::new("X", ["甲 乙"])];
    let turns = vec![
        TranscriptTurn::patient("甲"),
        TranscriptTurn::doctor("嗯"),
        TranscriptTurn::patient("乙"),
    ];
    let report = check(&selection(&["Y"]), Some(&[]), Some(&missing), &turns).unwrap();
    assert_eq!(report.missing.len(), 1);
}

#[test]
fn test_negation_still_matches() {
    let missing = vec![MissingItemRule::new("胸部CT", ["咳嗽"])];
    let turns = vec![TranscriptTurn::patient("没有咳嗽")];
    let report = check(&selection(&["血常规"]), Some(&[]), Some(&missing), &turns).unwrap();
    assert_eq!(report.missing.len(), 1);
}

#[test]
fn test_check_is_idempotent_and_does_not_mutate() {
    let conflicts = conflict_rules();
    let missing = missing_rules();
    let turns = transcript();
    let sel = selection(&["APTT", "PT", "胸部X线", "胸部CT", "血常规", "CRP"]);
    let before = (sel.clone(), conflicts.clone(), missing.clone(), turns.clone());

    let first = check(&sel, Some(&conflicts), Some(&missing), &turns).unwrap();
    let second = check(&sel, Some(&conflicts), Some(&missing), &turns).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(before, (sel, conflicts, missing, turns));
}

#[test]
fn test_conflict_invariant_over_all_subsets() {
    let conflicts = conflict_rules();
    let universe = ["APTT", "PT", "胸部X线", "胸部CT", "CRP", "PCT", "血常规"];

    for mask in 0u32..(1 << universe.len()) {
        let chosen: Vec<&str> = universe
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .map(|(_, name)| *name)
            .collect();
        let sel = selection(&chosen);
        let report = check(&sel, Some(&conflicts), Some(&[]), &[]).unwrap();

        let mut expected = Vec::new();
        for rule in &conflicts {
            let members: Vec<String> = rule
                .items
                .iter()
                .filter(|item| sel.contains(item))
                .cloned()
                .collect();
            if members.len() >= 2 {
                expected.push((rule.group.clone(), members));
            }
        }
        let actual: Vec<(String, Vec<String>)> = report
            .conflicts
            .iter()
            .map(|f| (f.group.clone(), f.items.clone()))
            .collect();
        assert_eq!(actual, expected, "selection {:?}", chosen);
        assert_eq!(report.has_issues(), !expected.is_empty());
    }
}

#[test]
fn test_any_set_type_can_be_checked() {
    let conflicts = conflict_rules();
    let hash: HashSet<String> = ["APTT", "PT"].iter().map(|s| s.to_string()).collect();
    let tree: BTreeSet<String> = ["APTT", "PT"].iter().map(|s| s.to_string()).collect();
    let list = vec!["PT", "APTT"];

    for report in [
        check(&hash, Some(&conflicts), Some(&[]), &[]).unwrap(),
        check(&tree, Some(&conflicts), Some(&[]), &[]).unwrap(),
        check(&list, Some(&conflicts), Some(&[]), &[]).unwrap(),
        check(&list[..], Some(&conflicts), Some(&[]), &[]).unwrap(),
    ] {
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].items, vec!["APTT", "PT"]);
    }
}

#[test]
fn test_checker_over_loaded_rule_file() {
    let rules: RuleSet = serde_json::from_str(
        r#"{
            "conflicts": [{"group": "凝血功能重复", "items": ["APTT", "PT"]}],
            "missing_checks": [
                {"missing_item": "鼻内镜", "symptom_keywords": ["流涕"], "priority": "中"},
                {"missing_item": "胸部CT", "symptom_keywords": ["咳嗽"], "priority": "高", "warning": "排查肺部"}
            ]
        }"#,
    )
    .unwrap();

    let report = OrderChecker::new(&rules)
        .check(&selection(&["APTT", "PT"]), &transcript())
        .unwrap();

    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.missing[0].item, "胸部CT");
    assert_eq!(report.missing[0].warning, "排查肺部");
    assert_eq!(report.missing[1].item, "鼻内镜");
}

#[test]
fn test_rule_without_priority_sorts_after_low() {
    let rules: RuleSet = serde_json::from_str(
        r#"{
            "conflicts": [],
            "missing_checks": [
                {"missing_item": "鼻窦CT", "symptom_keywords": ["咳嗽"]},
                {"missing_item": "胸部X线", "symptom_keywords": ["咳嗽"], "priority": "低"},
                {"missing_item": "肺功能", "symptom_keywords": ["咳嗽"], "priority": null}
            ]
        }"#,
    )
    .unwrap();
    let turns = vec![TranscriptTurn::patient("晚上咳嗽")];

    let report = OrderChecker::new(&rules)
        .check(&selection(&["血常规"]), &turns)
        .unwrap();

    let items: Vec<&str> = report.missing.iter().map(|m| m.item.as_str()).collect();
    assert_eq!(items, vec!["胸部X线", "鼻窦CT", "肺功能"]);
    assert_eq!(report.missing[0].priority, Priority::Low);
    assert_eq!(report.missing[1].priority, Priority::Unset);
    assert!(report.to_string().contains("\n  鼻窦CT\n"));
}
