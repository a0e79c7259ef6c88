//! Output formatters for screening reports and the chat transcript

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::ScreeningReport;
use crate::screening::models::{Priority, SuggestionType};
use crate::session::{ChatMessage, ChatRole};
use colored::{Color, Colorize};

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saving reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Picks the formatter for a requested format.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
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

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".blue().bold(), title.blue().bold())
        } else {
            format!("\n{} {}\n", "▓", title)
        }
    }

    fn suggestion_marker(&self, kind: SuggestionType) -> String {
        let (marker, color) = match kind {
            SuggestionType::Strength => ("[+]", Color::Green),
            SuggestionType::Improvement => ("[~]", Color::Yellow),
            SuggestionType::Missing => ("[!]", Color::Red),
        };
        self.colorize(marker, color)
    }

    fn priority_badge(&self, priority: Priority) -> String {
        let color = match priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Green,
        };
        self.colorize(&priority.to_string(), color)
    }

    /// One transcript line, e.g. `🤖 Assistant: ...`.
    pub fn format_message(&self, message: &ChatMessage) -> String {
        match message.role {
            ChatRole::User => format!("{} {}", self.colorize("🧑 You:", Color::Blue), message.text),
            ChatRole::Bot => format!("{} {}", self.colorize("🤖 Assistant:", Color::Green), message.text),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        if let Some(resume) = &report.resume {
            output.push_str(&self.format_header("📄 Extracted Information"));
            output.push_str(&format!("File Name: {}\n", resume.file_name));
            if !resume.skills.is_empty() {
                output.push_str(&format!("Skills: {}\n", resume.skills.join(", ")));
            }
            if !resume.experience.is_empty() {
                output.push_str(&format!("Experience: {}\n", resume.experience));
            }
            if !resume.education.is_empty() {
                output.push_str(&format!("Education: {}\n", resume.education));
            }

            output.push_str(&self.format_header("📝 Full Extracted Text"));
            if self.detailed || resume.extracted_text.chars().count() <= 1200 {
                output.push_str(&resume.extracted_text);
            } else {
                output.push_str(&truncate_text(&resume.extracted_text, 1200));
                output.push_str("\n(use --detailed for the full text)");
            }
            output.push('\n');
        }

        if !report.suggestions.is_empty() {
            output.push_str(&self.format_header("💡 AI Suggestions"));
            for suggestion in &report.suggestions {
                output.push_str(&format!(
                    "{} {} ({})\n    {}\n",
                    self.suggestion_marker(suggestion.suggestion_type),
                    suggestion.category,
                    self.priority_badge(suggestion.priority),
                    suggestion.message
                ));
            }
        }

        if let Some(score) = &report.match_score {
            output.push_str(&self.format_header("🎯 Job Match Score"));
            output.push_str(&format!(
                "{} {}\n{}\n",
                self.colorize(&format!("{}%", score.percent), Color::Green),
                score.label,
                score.summary
            ));
        } else if report.resume.is_some() {
            output.push_str("\nSelect a job role (--role) to see suggestions and a match score.\n");
        }

        if report.is_empty() {
            output.push_str("Nothing to show yet: upload a resume first.\n");
        }

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
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
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
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut md = String::from("# Resume Screening Report\n\n");

        if self.include_metadata {
            md.push_str(&format!(
                "_Generated {} using the {} strategy_\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC"),
                report.metadata.strategy
            ));
        }

        if let Some(role) = &report.job_role {
            md.push_str(&format!("**Target role:** {}\n\n", role));
        }

        if let Some(resume) = &report.resume {
            md.push_str(&format!("## Extracted Information\n\n**File:** {}\n\n", resume.file_name));
            md.push_str("## Analysis\n\n");
            md.push_str(&resume.extracted_text);
            md.push_str("\n\n");
        }

        if !report.suggestions.is_empty() {
            md.push_str("## Suggestions\n\n| Type | Category | Priority | Suggestion |\n|---|---|---|---|\n");
            for s in &report.suggestions {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    s.suggestion_type, s.category, s.priority, s.message
                ));
            }
            md.push('\n');
        }

        if let Some(score) = &report.match_score {
            md.push_str(&format!(
                "## Job Match Score\n\n**{}%** {}. {}\n",
                score.percent, score.label, score.summary
            ));
        }

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn generate(&self, report: &ScreeningReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }

    pub fn console(&self) -> &ConsoleFormatter {
        &self.console_formatter
    }
}

/// Truncate text to a maximum number of characters, cutting at a word boundary
fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &truncated[..last_space]),
        None => format!("{}...", truncated),
    }
}
