//! CLI interface for the skill-gap analyzer

use crate::catalog::roles::Level;
use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skillgap")]
#[command(about = "Skill-gap analysis and learning roadmaps for target job roles")]
#[command(long_about = "Compare your skills (listed or read from a resume) with a role's core, secondary and bonus requirements, then get a readiness estimate, prioritized gaps, a week-by-week roadmap and learning resources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze skills against a role or a list of target skills
    Analyze {
        /// Your skills, comma separated
        #[arg(short, long, value_delimiter = ',')]
        skills: Vec<String>,

        /// Resume file to extract skills from (PDF, TXT, MD)
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Target role id (see `skillgap roles`)
        #[arg(long, requires = "level")]
        role: Option<String>,

        /// Role level: intern, junior, mid, senior
        #[arg(short, long)]
        level: Option<Level>,

        /// Target skills for role-less analysis, comma separated
        #[arg(short, long, value_delimiter = ',')]
        target: Vec<String>,

        /// Years of professional experience
        #[arg(short, long, default_value_t = 0.0)]
        experience: f64,

        /// Number of roadmap weeks (overrides config)
        #[arg(short, long)]
        weeks: Option<usize>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file; without a path, a timestamped name is used
        #[arg(long)]
        save: Option<Option<PathBuf>>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// List roles, or show one role's requirements per level
    Roles {
        /// Role id to show in detail
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Show a skill's metadata and full prerequisite chain
    Skill {
        /// Skill name or alias
        name: String,

        /// Also show the skill's tier for this role
        #[arg(long, requires = "level")]
        role: Option<String>,

        /// Role level for --role
        #[arg(short, long)]
        level: Option<Level>,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// File stem for an auto-named report: the resume name, else the role id.
pub fn report_stem(resume: Option<&Path>, role_id: Option<&str>) -> String {
    resume
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .or(role_id)
        .unwrap_or("analysis")
        .to_string()
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "skillgap",
            "analyze",
            "--skills",
            "python,sql",
            "--role",
            "data_scientist",
            "--level",
            "junior",
            "--experience",
            "1.5",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze {
                skills,
                role,
                level,
                experience,
                ..
            } => {
                assert_eq!(skills, vec!["python", "sql"]);
                assert_eq!(role.as_deref(), Some("data_scientist"));
                assert_eq!(level, Some(Level::Junior));
                assert_eq!(experience, 1.5);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_save_flag_with_and_without_path() {
        let bare = Cli::try_parse_from(["skillgap", "analyze", "-s", "go", "--save"]).unwrap();
        let named = Cli::try_parse_from(["skillgap", "analyze", "-s", "go", "--save", "out.md"]).unwrap();
        let none = Cli::try_parse_from(["skillgap", "analyze", "-s", "go"]).unwrap();

        let save_of = |cli: Cli| match cli.command {
            Commands::Analyze { save, .. } => save,
            _ => panic!("expected analyze"),
        };
        assert_eq!(save_of(bare), Some(None));
        assert_eq!(save_of(named), Some(Some(PathBuf::from("out.md"))));
        assert_eq!(save_of(none), None);
    }

    #[test]
    fn test_report_stem() {
        assert_eq!(report_stem(Some(Path::new("docs/jane_cv.pdf")), Some("devops_engineer")), "jane_cv");
        assert_eq!(report_stem(None, Some("devops_engineer")), "devops_engineer");
        assert_eq!(report_stem(None, None), "analysis");
    }

    #[test]
    fn test_parse_skill_command() {
        let cli = Cli::try_parse_from(["skillgap", "skill", "k8s", "--role", "devops_engineer", "-l", "mid"]).unwrap();
        match cli.command {
            Commands::Skill { name, role, level } => {
                assert_eq!(name, "k8s");
                assert_eq!(role.as_deref(), Some("devops_engineer"));
                assert_eq!(level, Some(Level::Mid));
            }
            _ => panic!("expected skill"),
        }
    }

    #[test]
    fn test_role_requires_level() {
        assert!(Cli::try_parse_from(["skillgap", "analyze", "--role", "data_scientist"]).is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
