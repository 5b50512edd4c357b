//! skillgap: skill-gap analysis and learning roadmaps from the command line

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use log::{error, info};
use skillgap::analysis::{AnalysisEngine, AnalysisOptions, AnalysisRequest};
use skillgap::catalog::Tier;
use skillgap::cli::{self, Cli, Commands, ConfigAction};
use skillgap::config::Config;
use skillgap::error::SkillGapError;
use skillgap::input::InputManager;
use skillgap::output::{save_report_to_file, suggest_filename, AnalysisReport, InputSummary, ReportGenerator};
use skillgap::registry::Registry;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            skills,
            resume,
            role,
            level,
            target,
            experience,
            weeks,
            output,
            save,
            detailed,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(SkillGapError::InvalidInput)?,
                None => config.output.format,
            };

            if skills.is_empty() && resume.is_none() && role.is_none() && target.is_empty() {
                return Err(SkillGapError::InvalidInput(
                    "Nothing to analyze: give --skills, --resume, --role/--level or --target".to_string(),
                )
                .into());
            }

            let mut request = AnalysisRequest::new(skills)
                .with_target_skills(target)
                .with_experience(experience);
            if let (Some(role), Some(level)) = (role, level) {
                request = request.with_role(role, level);
            }

            let mut resume_file = None;
            if let Some(path) = &resume {
                cli::validate_file_extension(path, &["pdf", "txt", "md", "markdown"])
                    .map_err(|e| SkillGapError::InvalidInput(format!("Resume file: {}", e)))?;

                let document = InputManager::new()
                    .read_resume(path)
                    .await
                    .with_context(|| format!("Failed to read resume {}", path.display()))?;
                info!("Resume {}: {} words", document.file_name(), document.word_count());
                resume_file = Some(document.file_name());
                request = request.with_resume_text(document.text);
            }

            let registry = Registry::from_config(&config).context("Failed to load analysis artifacts")?;
            let mut options = AnalysisOptions::from(&config.analysis);
            if let Some(weeks) = weeks {
                options.roadmap_weeks = weeks;
            }

            let started = Instant::now();
            let result = AnalysisEngine::new(&registry, options).analyze(&request);
            let elapsed_ms = started.elapsed().as_millis() as u64;

            let report = AnalysisReport::new(result, InputSummary::from_request(&request, resume_file), elapsed_ms);
            let save = save.map(|path| {
                path.unwrap_or_else(|| {
                    let role_id = request.role.as_ref().map(|r| r.role_id.as_str());
                    PathBuf::from(suggest_filename(
                        output_format,
                        &cli::report_stem(resume.as_deref(), role_id),
                        true,
                    ))
                })
            });

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let content = generator
                .generate_report(&report, output_format)
                .context("Failed to render report")?;

            match save {
                Some(path) => {
                    save_report_to_file(&content, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Roles { role } => {
            let registry = Registry::builtin();
            let catalog = registry.roles();

            match role {
                None => {
                    println!("{}\n", "Available roles".bold());
                    for summary in catalog.list_roles() {
                        println!("  {:<22} {} ({})", summary.role_id, summary.title, summary.domain);
                    }
                    let levels: Vec<&str> = catalog.levels().iter().map(|l| l.as_str()).collect();
                    println!("\nLevels: {}", levels.join(", "));
                }
                Some(role_id) => {
                    if !catalog.contains(&role_id) {
                        return Err(SkillGapError::InvalidInput(format!(
                            "Unknown role: {}. Run `skillgap roles` to list roles",
                            role_id
                        ))
                        .into());
                    }
                    for level in catalog.levels_of(&role_id) {
                        if let Some(requirement) = catalog.resolve(&role_id, level) {
                            println!(
                                "\n{} - {} ({}-{} years, ready at {:.0}%)",
                                requirement.title.bold(),
                                level,
                                requirement.experience_range.0,
                                requirement.experience_range.1,
                                requirement.readiness_threshold * 100.0
                            );
                            for tier in Tier::ALL {
                                let skills: Vec<&str> = requirement.skills(tier).iter().map(|s| s.as_str()).collect();
                                println!("  {:<10} x{:.1}  {}", tier.to_string(), tier.weight(), skills.join(", "));
                            }
                            let total_weight: f64 = requirement.weighted_skills().iter().map(|(_, _, w)| w).sum();
                            println!(
                                "  {} skills, total weight {:.1}",
                                requirement.all_skills().len(),
                                total_weight
                            );
                        }
                    }
                }
            }
        }

        Commands::Skill { name, role, level } => {
            let registry = Registry::builtin();
            let skill = registry.normalizer().normalize(&name);
            if skill.as_str().is_empty() {
                return Err(SkillGapError::InvalidInput("Skill name is empty".to_string()).into());
            }

            let metadata = registry.normalizer().metadata(skill.as_str());
            let known = if registry.normalizer().is_known(skill.as_str()) { "" } else { " (not in taxonomy)" };
            println!("{}{}", skill.as_str().bold(), known);
            println!(
                "  difficulty {:.0}/5, demand {:.0}/5, ~{:.0}h to learn",
                metadata.difficulty, metadata.market_demand, metadata.learning_hours
            );

            let chain = registry.graph().all_prerequisites(skill.as_str());
            if chain.is_empty() {
                println!("  no prerequisites");
            } else {
                let chain: Vec<&str> = chain.iter().map(|s| s.as_str()).collect();
                println!("  learn first: {}", chain.join(" -> "));
            }

            if let (Some(role_id), Some(level)) = (role, level) {
                let requirement = registry.roles().resolve(&role_id, level).ok_or_else(|| {
                    SkillGapError::InvalidInput(format!("Unknown role or level: {} {}", role_id, level))
                })?;
                match requirement.tier_of(skill.as_str()) {
                    Some(tier) => println!("  {} ({}): {} tier", requirement.title, level, tier),
                    None => println!("  {} ({}): not required", requirement.title, level),
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("# {}\n{}", config_path.display(), rendered);
            }
            Some(ConfigAction::Reset) => {
                Config::default()
                    .save_to(&config_path)
                    .context("Failed to reset configuration")?;
                println!("Configuration reset: {}", config_path.display());
            }
            Some(ConfigAction::Path) => println!("{}", config_path.display()),
        },
    }

    Ok(())
}
