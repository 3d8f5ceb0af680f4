use crate::{OutputFormat, ProjectArgs};
use owo_colors::OwoColorize;
use rulesync::config::{self, RulesyncConfig};
use rulesync::registry::{PLUGINS_FILE, PipelineRegistry, default_registry};
use rulesync::sync::{self, SyncOptions};
use rulesync::ui::{self, PipelineRow, Role, SyncRow, theme};
use std::path::{Path, PathBuf};

/// Make `root` absolute so every `file_path` in the run is too
fn absolute_root(root: &Path) -> anyhow::Result<PathBuf> {
    Ok(std::path::absolute(root)?)
}

/// Resolved project location and settings
struct Project {
    root: PathBuf,
    config: RulesyncConfig,
    plugins_dir: PathBuf,
}

impl Project {
    fn resolve(args: &ProjectArgs) -> anyhow::Result<Self> {
        let root = match &args.root {
            Some(root) => absolute_root(root)?,
            None => config::find_project_root(&std::env::current_dir()?),
        };
        let config = config::load_config(&config::default_config_path_in(&root))?.unwrap_or_default();
        let plugins_dir = args
            .plugins
            .clone()
            .unwrap_or_else(|| config.plugins_dir_in(&root));

        Ok(Self {
            root,
            config,
            plugins_dir,
        })
    }

    fn load_pipelines(&self) -> anyhow::Result<PipelineRegistry> {
        let registry = PipelineRegistry::load(&self.plugins_dir, &default_registry())?;
        if registry.is_empty() {
            anyhow::bail!(
                "no pipelines loaded from {} (run `rulesync init` to create one)",
                self.plugins_dir.join(PLUGINS_FILE).display()
            );
        }
        Ok(registry)
    }
}

pub fn run_sync(args: &ProjectArgs, dry_run: bool, check: bool) -> anyhow::Result<()> {
    let project = Project::resolve(args)?;
    let registry = project.load_pipelines()?;

    ui::header(&format!("Syncing rules in {}", project.root.display()));

    let options = SyncOptions {
        dry_run: dry_run || check,
        targets: project.config.targets.clone(),
    };
    let report = sync::run_sync(registry.pipelines(), &project.root, &options);

    let mut rows = Vec::with_capacity(report.pipelines.len());
    for (pipeline, result) in registry.pipelines().iter().zip(&report.pipelines) {
        ui::section(&pipeline.name);

        let status = if result.is_skipped() {
            ui::skipped("No rules found");
            "skipped".to_string()
        } else {
            ui::summary_row(
                "Found",
                &format!("{} rules in {} categories", result.rules, result.categories),
            );
            for target in &result.targets {
                ui::merge_result(pipeline.generator.name(), &target.path, &target.outcome);
            }
            match result.failures() {
                0 => "ok".to_string(),
                n => format!("{} failed", n),
            }
        };

        rows.push(SyncRow {
            name: result.name.clone(),
            rules: result.rules,
            categories: result.categories,
            status,
        });
    }

    if !rulesync::output::is_quiet() {
        println!();
        println!("{}", ui::sync_table(&rows));
    }

    if report.total_rules() == 0 {
        anyhow::bail!("no rules found in any source directory");
    }

    if report.total_failures() > 0 {
        ui::warn(&format!("{} target(s) could not be updated", report.total_failures()));
    }

    if check {
        if report.has_changes() {
            anyhow::bail!("documentation is out of date (run `rulesync sync`)");
        }
        ui::success("Documentation is up to date");
    } else if dry_run {
        ui::success("Dry run complete, no files written");
    } else {
        ui::success("Rules synchronization completed!");
    }
    Ok(())
}

pub fn run_list(args: &ProjectArgs) -> anyhow::Result<()> {
    let project = Project::resolve(args)?;
    let registry = project.load_pipelines()?;

    let rows: Vec<PipelineRow> = registry
        .pipelines()
        .iter()
        .map(|p| PipelineRow {
            name: p.name.clone(),
            parser: p.parser.name().to_string(),
            generator: p.generator.name().to_string(),
            sources: p.source_dirs().join(", "),
            targets: project
                .config
                .targets
                .clone()
                .unwrap_or_else(|| p.target_files())
                .join(", "),
        })
        .collect();

    println!("{}", ui::pipeline_table(&rows));
    Ok(())
}

pub fn run_scan(args: &ProjectArgs, name: &str, format: OutputFormat) -> anyhow::Result<()> {
    let project = Project::resolve(args)?;
    let registry = project.load_pipelines()?;
    let Some(pipeline) = registry.get(name) else {
        anyhow::bail!("unknown pipeline '{}'", name);
    };

    let rules = sync::collect_rules(pipeline, &project.root);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rules)?),
        OutputFormat::Text => {
            if rules.is_empty() {
                println!("∅ No rules found.");
            }
            for rule in &rules {
                println!(
                    "- [{}] {} ({})",
                    rule.category,
                    rule.title.bold(),
                    rule.relative_path.style(theme().style(Role::Path))
                );
                if !rule.description.is_empty() {
                    println!("    {}", rule.description.style(theme().style(Role::Dim)));
                }
            }
        }
    }
    Ok(())
}

pub fn run_init(root: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let root = match root {
        Some(root) => absolute_root(&root)?,
        None => std::env::current_dir()?,
    };
    let config = config::load_config(&config::default_config_path_in(&root))?.unwrap_or_default();

    let path = config::write_default_plugins(&config.plugins_dir_in(&root), force)?;
    ui::success(&format!("Wrote {}", path.display()));
    ui::info("Next", "run `rulesync sync`");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const RULES_PIPELINE: &str = "pipelines:
  - name: rules
    parser:
      module: mdc_parser
      class: MdcParser
    generator:
      module: rules_index_generator
      class: RulesIndexGenerator
    sources: [rules]
    targets: [AGENTS.md]
";

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn args(root: &Path) -> ProjectArgs {
        ProjectArgs {
            root: Some(root.to_path_buf()),
            plugins: None,
        }
    }

    fn project_with_rules() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".rulesync/plugins.yaml", RULES_PIPELINE);
        write(dir.path(), "rules/x.mdc", "---\ndescription: \"desc1\"\n---\nbody\n");
        write(dir.path(), "rules/sub/y.mdc", "just text\n");
        dir
    }

    #[test]
    fn test_sync_fails_without_plugins_config() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "rules/x.mdc", "");

        let err = run_sync(&args(dir.path()), false, false).unwrap_err();
        assert!(err.to_string().contains("no pipelines loaded"));
    }

    #[test]
    fn test_sync_fails_when_no_rules_found() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".rulesync/plugins.yaml", RULES_PIPELINE);

        let err = run_sync(&args(dir.path()), false, false).unwrap_err();
        assert!(err.to_string().contains("no rules found"));
        assert!(!dir.path().join("AGENTS.md").exists());
    }

    #[test]
    fn test_check_fails_on_out_of_date_target() {
        let dir = project_with_rules();
        write(dir.path(), "AGENTS.md", "# Agents\n");

        let err = run_sync(&args(dir.path()), false, true).unwrap_err();
        assert!(err.to_string().contains("out of date"));
        assert_eq!(fs::read_to_string(dir.path().join("AGENTS.md")).unwrap(), "# Agents\n");
    }

    #[test]
    fn test_sync_into_empty_target_then_check_passes() {
        let dir = project_with_rules();
        write(dir.path(), "AGENTS.md", "");

        run_sync(&args(dir.path()), false, false).unwrap();

        let doc = fs::read_to_string(dir.path().join("AGENTS.md")).unwrap();
        assert_eq!(doc.matches("<ai-rules>").count(), 1);
        assert_eq!(doc.matches("</ai-rules>").count(), 1);
        assert!(doc.contains("## Root Rules"));
        assert!(doc.contains("## Sub"));
        assert!(doc.contains("desc1"));

        run_sync(&args(dir.path()), false, true).unwrap();
    }

    #[test]
    fn test_dry_run_succeeds_without_writing() {
        let dir = project_with_rules();

        run_sync(&args(dir.path()), true, false).unwrap();
        assert!(!dir.path().join("AGENTS.md").exists());
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        let root = absolute_root(Path::new("some/project")).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("some/project"));

        let dir = TempDir::new().unwrap();
        assert_eq!(absolute_root(dir.path()).unwrap(), dir.path());
    }
}
