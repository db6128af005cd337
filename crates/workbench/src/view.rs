//! Plain-text presentation of each stage for the terminal.

use std::fmt;

use chrono::{DateTime, Local};
use order_check::{Order, Priority};
use workbench_fixtures::{AbnormalSummary, Fixtures, LabTable};

use crate::config::WorkbenchConfig;
use crate::intake::{case_details, case_summary, highlights, NOT_AVAILABLE};
use crate::session::SubmissionDialog;

/// Display color of a missing-item priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityColor {
    Red,
    Orange,
    Gray,
}

impl PriorityColor {
    /// Color name as used in markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityColor::Red => "red",
            PriorityColor::Orange => "orange",
            PriorityColor::Gray => "gray",
        }
    }

    /// ANSI SGR parameters for terminal output.
    fn ansi(&self) -> &'static str {
        match self {
            PriorityColor::Red => "31",
            PriorityColor::Orange => "33",
            PriorityColor::Gray => "90",
        }
    }
}

/// Color for a priority; unset and unrecognized priorities are uncolored.
pub fn priority_color(priority: &Priority) -> Option<PriorityColor> {
    match priority {
        Priority::High => Some(PriorityColor::Red),
        Priority::Medium => Some(PriorityColor::Orange),
        Priority::Low => Some(PriorityColor::Gray),
        Priority::Unset | Priority::Unrecognized(_) => None,
    }
}

fn paint(text: &str, color: Option<PriorityColor>) -> String {
    match color {
        Some(color) => format!("\x1b[{}m{}\x1b[0m", color.ansi(), text),
        _ => text.to_string(),
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// Stage 1: patient banner, highlights and similar cases.
pub fn render_intake(fixtures: &Fixtures, config: &WorkbenchConfig) -> String {
    IntakeView { fixtures, config }.to_string()
}

struct IntakeView<'a> {
    fixtures: &'a Fixtures,
    config: &'a WorkbenchConfig,
}

impl fmt::Display for IntakeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(patient) = &self.fixtures.patient {
            writeln!(
                f,
                "患者: {} ({})  年龄: {}  门诊号: {}  科室: {}",
                or_na(&patient.name),
                or_na(&patient.gender),
                or_na(&patient.age),
                or_na(&patient.patient_id),
                or_na(&patient.department),
            )?;
            writeln!(f)?;
        }

        writeln!(f, "对话要点:")?;
        let highlights = highlights(self.fixtures, self.config);
        if highlights.is_empty() {
            writeln!(f, "  暂无对话记录")?;
        }
        for line in highlights {
            writeln!(f, "  • {}", line)?;
        }

        writeln!(f, "\n相似病例:")?;
        let cases = self.fixtures.similar_cases();
        if cases.is_empty() {
            writeln!(f, "  暂无相似病例")?;
        }
        for case in cases {
            writeln!(f, "  {}", case_summary(case))?;
            for (label, value) in case_details(case) {
                writeln!(f, "    {}: {}", label, value)?;
            }
        }
        Ok(())
    }
}

/// Stage 2: the order catalog listing.
pub fn render_orders(orders: &[&Order]) -> String {
    OrdersView(orders).to_string()
}

struct OrdersView<'a>(&'a [&'a Order]);

impl fmt::Display for OrdersView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "未找到匹配的检查项目");
        }
        for order in self.0 {
            write!(f, "{:>3}. ", order.rank)?;
            match &order.priority {
                None | Some(Priority::Unset) => {}
                Some(priority) => write!(f, "[{}] ", priority)?,
            }
            f.write_str(&order.name)?;
            if !order.rationale.is_empty() {
                write!(f, "  ({})", order.rationale)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Stage 2: the findings of a submission and the actions it offers.
///
/// With `ansi` set, missing-item priorities are colored.
pub fn render_dialog(dialog: &SubmissionDialog, ansi: bool) -> String {
    DialogView { dialog, ansi }.to_string()
}

struct DialogView<'a> {
    dialog: &'a SubmissionDialog,
    ansi: bool,
}

impl fmt::Display for DialogView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "提交项目: {}", self.dialog.orders().join("、"))?;
        let report = &self.dialog.report;
        if self.ansi {
            report.write_with(f, |priority, tag| paint(tag, priority_color(priority)))?;
        } else {
            write!(f, "{}", report)?;
        }

        let actions: Vec<&str> = self.dialog.actions().iter().map(|a| a.label()).collect();
        writeln!(f, "可选操作: {}", actions.join(" / "))
    }
}

/// Stage 3: lab rows and the abnormal value summary.
pub fn render_labs(table: &LabTable, summary: Option<&AbnormalSummary>) -> String {
    LabsView { table, summary }.to_string()
}

struct LabsView<'a> {
    table: &'a LabTable,
    summary: Option<&'a AbnormalSummary>,
}

impl fmt::Display for LabsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.table.headers().join(" | "))?;
        if self.table.is_empty() {
            writeln!(f, "暂无检验结果")?;
        }
        for row in self.table.rows() {
            let marker = if row.is_abnormal() { "*" } else { " " };
            writeln!(f, "{}{}", marker, row.values().join(" | "))?;
        }

        let Some(summary) = self.summary.filter(|s| !s.abnormal_items.is_empty()) else {
            return Ok(());
        };
        writeln!(f, "\n异常指标解读:")?;
        for item in &summary.abnormal_items {
            writeln!(f, "  {}: {}", item.name, or_na(&item.value))?;
            if let Some(meaning) = &item.meaning {
                writeln!(f, "    意义: {}", meaning)?;
            }
            if let Some(attention) = &item.attention {
                writeln!(f, "    注意: {}", attention)?;
            }
        }
        Ok(())
    }
}

/// Stage 4: the record text followed by the key clues.
pub fn render_record(text: &str, drafted_at: Option<DateTime<Local>>, clues: &[String]) -> String {
    RecordView {
        text,
        drafted_at,
        clues,
    }
    .to_string()
}

struct RecordView<'a> {
    text: &'a str,
    drafted_at: Option<DateTime<Local>>,
    clues: &'a [String],
}

impl fmt::Display for RecordView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "门诊病历")?;
        if let Some(at) = self.drafted_at {
            writeln!(f, "生成时间: {}", at.format("%Y-%m-%d %H:%M"))?;
        }
        writeln!(f)?;
        f.write_str(self.text)?;
        if !self.text.ends_with('\n') {
            writeln!(f)?;
        }

        writeln!(f, "\n关键线索:")?;
        if self.clues.is_empty() {
            writeln!(f, "  暂无关键线索")?;
        }
        for clue in self.clues {
            writeln!(f, "  • {}", clue)?;
        }
        Ok(())
    }
}
