//! Plugin and pipeline registries
//!
//! [`PluginRegistry`] is the lookup table from a configured `module`/`class`
//! pair to a constructor. [`PipelineRegistry`] reads `plugins.yaml` and uses
//! that table to build the ordered list of [`Pipeline`]s.

use crate::generator::{
    CodeReviewGuidelinesGenerator, GeneratorOptions, RuleGenerator, RulesIndexGenerator,
};
use crate::parser::{CodeReviewParser, MdcParser, RuleParser};
use crate::{Error, Result};
use serde::Deserialize;
use serde_yaml::Value;
use std::fmt;
use std::path::Path;

/// File name of the pipeline configuration inside the plugin directory
pub const PLUGINS_FILE: &str = "plugins.yaml";

/// Configuration written by `rulesync init`
pub const DEFAULT_PLUGINS_YAML: &str = r#"# Rulesync pipelines: each pairs a parser with a generator.
pipelines:
  - name: cursor-rules
    description: Index .cursor/rules/*.mdc into assistant instruction files
    parser:
      module: mdc_parser
      class: MdcParser
    generator:
      module: rules_index_generator
      class: RulesIndexGenerator

  - name: code-review
    description: Publish .code_review/ guidelines into AGENTS.md
    parser:
      module: code_review_parser
      class: CodeReviewParser
    generator:
      module: code_review_guidelines_generator
      class: CodeReviewGuidelinesGenerator
"#;

pub type ParserFactory = fn() -> Box<dyn RuleParser>;
pub type GeneratorFactory = fn() -> Box<dyn RuleGenerator>;

/// A `{module, class}` reference from configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginRef {
    pub module: String,
    pub class: String,
}

impl PluginRef {
    pub fn new(module: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            class: class.into(),
        }
    }
}

impl fmt::Display for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.class)
    }
}

/// One `pipelines` entry of `plugins.yaml`
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub parser: PluginRef,
    pub generator: PluginRef,
    /// Source directories relative to the project root
    #[serde(default)]
    pub sources: Vec<String>,
    /// Target documents relative to the project root
    #[serde(default)]
    pub targets: Vec<String>,
    /// Passed verbatim to the generator
    #[serde(default)]
    pub options: GeneratorOptions,
}

/// A named parser + generator pairing, built once at startup
pub struct Pipeline {
    pub name: String,
    pub description: String,
    pub parser: Box<dyn RuleParser>,
    pub generator: Box<dyn RuleGenerator>,
    sources: Vec<String>,
    targets: Vec<String>,
    pub options: GeneratorOptions,
}

impl Pipeline {
    /// Source directories: configured ones, else the parser's defaults
    pub fn source_dirs(&self) -> Vec<String> {
        if self.sources.is_empty() {
            self.parser
                .source_directories()
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.sources.clone()
        }
    }

    /// Target documents: configured ones, else the generator's defaults
    pub fn target_files(&self) -> Vec<String> {
        if self.targets.is_empty() {
            self.generator
                .default_filenames()
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.targets.clone()
        }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("parser", &self.parser.name())
            .field("generator", &self.generator.name())
            .field("sources", &self.sources)
            .field("targets", &self.targets)
            .finish()
    }
}

/// Registry of parser and generator constructors
#[derive(Default)]
pub struct PluginRegistry {
    parsers: Vec<(PluginRef, ParserFactory)>,
    generators: Vec<(PluginRef, GeneratorFactory)>,
}

impl PluginRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parser constructor under `module`/`class`
    pub fn register_parser(&mut self, module: &str, class: &str, factory: ParserFactory) {
        self.parsers.push((PluginRef::new(module, class), factory));
    }

    /// Register a generator constructor under `module`/`class`
    pub fn register_generator(&mut self, module: &str, class: &str, factory: GeneratorFactory) {
        self.generators.push((PluginRef::new(module, class), factory));
    }

    /// Instantiate the parser registered under `plugin`
    pub fn create_parser(&self, plugin: &PluginRef) -> Result<Box<dyn RuleParser>> {
        self.parsers
            .iter()
            .find(|(key, _)| key == plugin)
            .map(|(_, factory)| factory())
            .ok_or_else(|| Error::UnknownParser {
                module: plugin.module.clone(),
                class: plugin.class.clone(),
            })
    }

    /// Instantiate the generator registered under `plugin`
    pub fn create_generator(&self, plugin: &PluginRef) -> Result<Box<dyn RuleGenerator>> {
        self.generators
            .iter()
            .find(|(key, _)| key == plugin)
            .map(|(_, factory)| factory())
            .ok_or_else(|| Error::UnknownGenerator {
                module: plugin.module.clone(),
                class: plugin.class.clone(),
            })
    }

    /// Build a pipeline from its configuration entry
    pub fn build_pipeline(&self, config: PipelineConfig) -> Result<Pipeline> {
        let parser = self.create_parser(&config.parser)?;
        let generator = self.create_generator(&config.generator)?;

        Ok(Pipeline {
            name: config.name,
            description: config.description,
            parser,
            generator,
            sources: config.sources,
            targets: config.targets,
            options: config.options,
        })
    }
}

/// Create a registry with all built-in parsers and generators
pub fn default_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    registry.register_parser("mdc_parser", "MdcParser", || Box::new(MdcParser::new()));
    registry.register_parser("code_review_parser", "CodeReviewParser", || {
        Box::new(CodeReviewParser::new())
    });
    registry.register_generator("rules_index_generator", "RulesIndexGenerator", || {
        Box::new(RulesIndexGenerator::new())
    });
    registry.register_generator(
        "code_review_guidelines_generator",
        "CodeReviewGuidelinesGenerator",
        || Box::new(CodeReviewGuidelinesGenerator::new()),
    );
    registry
}

/// Ordered, read-only set of pipelines loaded from configuration
#[derive(Debug, Default)]
pub struct PipelineRegistry {
    pipelines: Vec<Pipeline>,
}

impl PipelineRegistry {
    /// Load `plugins.yaml` from `base_dir`
    ///
    /// A missing file yields an empty registry; callers decide whether that
    /// is fatal.
    pub fn load(base_dir: &Path, plugins: &PluginRegistry) -> Result<Self> {
        let path = base_dir.join(PLUGINS_FILE);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("No pipeline configuration at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::io_at(path, e)),
        };

        Self::from_yaml_str(&contents, plugins)
    }

    /// Build pipelines from configuration text
    ///
    /// Entries that fail to deserialize or reference unknown plugins are
    /// logged and skipped; the rest still load.
    pub fn from_yaml_str(contents: &str, plugins: &PluginRegistry) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let entries = match serde_yaml::from_str::<Value>(contents)? {
            Value::Null => Vec::new(),
            Value::Mapping(root) => match root.get("pipelines") {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Sequence(entries)) => entries.clone(),
                Some(_) => return Err(Error::Config("`pipelines` must be a sequence".into())),
            },
            _ => return Err(Error::Config("pipeline configuration must be a mapping".into())),
        };

        let mut pipelines = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.into_iter().enumerate() {
            let config: PipelineConfig = match serde_yaml::from_value(entry) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Skipping pipeline entry #{}: {}", idx + 1, e);
                    continue;
                }
            };

            let name = config.name.clone();
            match plugins.build_pipeline(config) {
                Ok(pipeline) => {
                    tracing::info!("Loaded pipeline: {} - {}", pipeline.name, pipeline.description);
                    pipelines.push(pipeline);
                }
                Err(e) => tracing::warn!("Failed to load pipeline {}: {}", name, e),
            }
        }

        Ok(Self { pipelines })
    }

    /// Get all loaded pipelines, in configuration order
    pub fn pipelines(&self) -> &[Pipeline] {
        &self.pipelines
    }

    /// Find a pipeline by name
    pub fn get(&self, name: &str) -> Option<&Pipeline> {
        self.pipelines.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }
}
