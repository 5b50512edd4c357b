//! Output formatters for analysis reports

use crate::analysis::types::{ReadinessLabel, RecommendationSource, SkillGap};
use crate::catalog::Tier;
use crate::config::OutputFormat;
use crate::error::{Result, SkillGapError};
use crate::output::report::AnalysisReport;
use colored::{Color, Colorize};
use std::fmt::Write as _;
use std::path::Path;

/// Trait for rendering an analysis report
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Picks the formatter for a requested output format
pub struct ReportGenerator {
    formatters: Vec<Box<dyn OutputFormatter>>,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_label(&self, label: ReadinessLabel) -> String {
        let color = match label {
            ReadinessLabel::IndustryReady => Color::Green,
            ReadinessLabel::AlmostReady => Color::Yellow,
            ReadinessLabel::NeedsUpskilling => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", label.as_str().to_uppercase().color(color).bold())
        } else {
            format!("[{}]", label.as_str().to_uppercase())
        }
    }

    fn tier_marker(&self, tier: Tier) -> String {
        match tier {
            Tier::Core => self.colorize("core", Color::Red),
            Tier::Secondary => self.colorize("secondary", Color::Yellow),
            Tier::Bonus => self.colorize("bonus", Color::Cyan),
        }
    }

    fn format_gap(&self, gap: &SkillGap) -> String {
        let score = gap
            .ml_score
            .map(|s| format!(", score {:.2}", s))
            .unwrap_or_default();
        format!("  {}. {} ({}{})\n", gap.rank, gap.skill, self.tier_marker(gap.tier), score)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let summary = &report.summary;
        let mut output = String::new();

        output.push_str(&self.format_header("SKILL GAP ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Target: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.target_description()
        ));

        output.push_str(&self.format_header("Readiness", 2));
        output.push_str(&format!(
            "Readiness: {}% {}\n",
            summary.readiness_percentage,
            self.format_label(result.readiness_label)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&summary.verdict, Color::Cyan)));
        output.push_str(&format!(
            "Weighted skill score: {}% | Match: {:.0}%\n",
            summary.weighted_score_percentage,
            result.skill_analysis.match_percentage * 100.0
        ));
        for factor in &result.explanation.factors {
            output.push_str(&format!("  • {}\n", factor));
        }

        if self.detailed {
            let e = &result.explanation;
            output.push_str(&self.format_header("Coverage", 3));
            output.push_str(&format!(
                "Core {:.0}% | Secondary {:.0}% | Bonus {:.0}% | Experience factor {:.2}\n",
                e.core_coverage * 100.0,
                e.secondary_coverage * 100.0,
                e.bonus_coverage * 100.0,
                e.experience_factor
            ));
            if let Some(extracted) = &result.extracted_skills {
                output.push_str(&format!(
                    "Skills found in resume ({}): {}\n",
                    extracted.len(),
                    extracted.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
                ));
            }
        }

        if !summary.strengths.is_empty() {
            output.push_str(&self.format_header("Strengths", 3));
            for strength in &summary.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        if !result.missing_skills.is_empty() {
            output.push_str(&self.format_header("Skill Gaps (learning priority)", 2));
            for gap in &result.missing_skills {
                output.push_str(&self.format_gap(gap));
            }
        }

        if !result.roadmap.is_empty() {
            output.push_str(&self.format_header("Roadmap", 2));
            for week in &result.roadmap {
                let skills: Vec<&str> = week.skills.iter().map(|s| s.as_str()).collect();
                output.push_str(&format!(
                    "  Week {}: {} (~{:.0}h, focus: {})\n",
                    week.week,
                    skills.join(", "),
                    week.estimated_hours,
                    self.colorize(week.focus.as_str(), Color::Cyan)
                ));
            }
        }

        if !result.recommendations.is_empty() {
            output.push_str(&self.format_header("Learning Resources", 2));
            let shown = if self.detailed { usize::MAX } else { 1 };
            for rec in &result.recommendations {
                output.push_str(&format!("  {} [{}]\n", rec.skill, source_name(rec.source)));
                for resource in rec.resources.iter().take(shown) {
                    output.push_str(&format!("    - {} ({:.0}h): {}\n", resource.title, resource.duration_hours, resource.url));
                }
            }
        }

        output.push('\n');
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut out = String::new();
        let fmt_err = |e: std::fmt::Error| SkillGapError::OutputFormatting(e.to_string());

        writeln!(out, "# Skill Gap Analysis: {}\n", report.target_description()).map_err(fmt_err)?;

        if self.include_metadata {
            writeln!(
                out,
                "**Generated:** {} | **Version:** {}",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.tool_version
            )
            .map_err(fmt_err)?;
            if let Some(resume) = &report.metadata.input.resume_file {
                writeln!(out, "**Resume:** `{}`", resume).map_err(fmt_err)?;
            }
            out.push('\n');
        }

        writeln!(out, "## Readiness\n").map_err(fmt_err)?;
        writeln!(
            out,
            "**{}** ({}%): {}\n",
            result.readiness_label, report.summary.readiness_percentage, report.summary.verdict
        )
        .map_err(fmt_err)?;
        for factor in &result.explanation.factors {
            writeln!(out, "- {}", factor).map_err(fmt_err)?;
        }

        let e = &result.explanation;
        writeln!(out, "\n| Tier | Coverage |\n|------|----------|").map_err(fmt_err)?;
        writeln!(out, "| Core | {:.0}% |", e.core_coverage * 100.0).map_err(fmt_err)?;
        writeln!(out, "| Secondary | {:.0}% |", e.secondary_coverage * 100.0).map_err(fmt_err)?;
        writeln!(out, "| Bonus | {:.0}% |", e.bonus_coverage * 100.0).map_err(fmt_err)?;

        if !result.missing_skills.is_empty() {
            writeln!(out, "\n## Skill Gaps\n\n| Rank | Skill | Tier | Weight |\n|------|-------|------|--------|")
                .map_err(fmt_err)?;
            for gap in &result.missing_skills {
                writeln!(out, "| {} | {} | {} | {:.1} |", gap.rank, gap.skill, gap.tier, gap.weight).map_err(fmt_err)?;
            }
        }

        if !result.roadmap.is_empty() {
            writeln!(out, "\n## Roadmap\n").map_err(fmt_err)?;
            for week in &result.roadmap {
                let skills: Vec<&str> = week.skills.iter().map(|s| s.as_str()).collect();
                writeln!(
                    out,
                    "- **Week {}** (~{:.0}h): {}",
                    week.week,
                    week.estimated_hours,
                    skills.join(", ")
                )
                .map_err(fmt_err)?;
            }
        }

        if !result.recommendations.is_empty() {
            writeln!(out, "\n## Learning Resources\n").map_err(fmt_err)?;
            for rec in &result.recommendations {
                writeln!(out, "### {} _({})_\n", rec.skill, source_name(rec.source)).map_err(fmt_err)?;
                for resource in &rec.resources {
                    writeln!(
                        out,
                        "- [{}]({}) - {}, {:.0}h",
                        resource.title, resource.url, resource.difficulty, resource.duration_hours
                    )
                    .map_err(fmt_err)?;
                }
                out.push('\n');
            }
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn source_name(source: RecommendationSource) -> &'static str {
    match source {
        RecommendationSource::Learned => "recommended",
        RecommendationSource::Curated => "curated",
        RecommendationSource::Generated => "search",
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            formatters: vec![
                Box::new(ConsoleFormatter::new(use_colors, detailed)),
                Box::new(JsonFormatter::new(pretty_json)),
                Box::new(MarkdownFormatter::new(include_metadata)),
            ],
        }
    }

    /// Generator with only the given formatters registered.
    pub fn with_formatters(formatters: Vec<Box<dyn OutputFormatter>>) -> Self {
        Self { formatters }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        self.formatters
            .iter()
            .find(|f| f.supports_format() == format)
            .ok_or_else(|| SkillGapError::OutputFormatting(format!("No formatter registered for {:?}", format)))?
            .format_report(report)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, stem: &str, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };
    format!("{}_skillgap{}.{}", stem, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisEngine, AnalysisOptions, AnalysisRequest};
    use crate::catalog::roles::Level;
    use crate::output::report::InputSummary;
    use crate::registry::Registry;

    fn sample_report() -> AnalysisReport {
        let registry = Registry::builtin();
        let request = AnalysisRequest::new(["python", "sql"])
            .with_role("data_scientist", Level::Junior)
            .with_experience(1.0);
        let result = AnalysisEngine::new(&registry, AnalysisOptions::default()).analyze(&request);
        AnalysisReport::new(result, InputSummary::from_request(&request, Some("cv.md".to_string())), 1)
    }

    #[test]
    fn test_console_without_colors() {
        let report = sample_report();
        let text = ConsoleFormatter::new(false, true).format_report(&report).unwrap();

        assert!(text.contains("SKILL GAP ANALYSIS"));
        assert!(text.contains("Skill Gaps (learning priority)"));
        assert!(text.contains("Week 1"));
        assert!(!text.contains("\u{1b}["));
    }

    #[test]
    fn test_json_round_trips_result() {
        let report = sample_report();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["result"]["explanation"]["factors"].as_array().unwrap().len(), 3);
        assert_eq!(value["metadata"]["input"]["resume_file"], "cv.md");
        assert!(value["result"]["missing_skills"][0]["rank"].is_u64());
    }

    #[test]
    fn test_markdown_sections() {
        let report = sample_report();
        let md = MarkdownFormatter::new(true).format_report(&report).unwrap();

        assert!(md.starts_with("# Skill Gap Analysis: "));
        assert!(md.contains("## Skill Gaps"));
        assert!(md.contains("**Resume:** `cv.md`"));
    }

    #[test]
    fn test_generator_dispatch_and_save() {
        let report = sample_report();
        let generator = ReportGenerator::with_options(false, false, true, false);
        let content = generator.generate_report(&report, OutputFormat::Json).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join(suggest_filename(OutputFormat::Json, "cv", false));
        save_report_to_file(&content, &path).unwrap();

        assert_eq!(path.file_name().unwrap(), "cv_skillgap.json");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_generator_without_matching_formatter() {
        let report = sample_report();
        let generator = ReportGenerator::with_formatters(vec![Box::new(JsonFormatter::new(false))]);

        assert!(generator.generate_report(&report, OutputFormat::Json).is_ok());
        assert!(matches!(
            generator.generate_report(&report, OutputFormat::Markdown),
            Err(SkillGapError::OutputFormatting(_))
        ));
    }

    #[test]
    fn test_suggest_filename_with_timestamp() {
        let name = suggest_filename(OutputFormat::Markdown, "data_scientist", true);

        assert!(name.starts_with("data_scientist_skillgap_"));
        assert!(name.ends_with(".md"));
        assert_eq!(name.len(), "data_scientist_skillgap_20260101_120000.md".len());
    }
}
