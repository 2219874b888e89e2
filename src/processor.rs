//! Batch generation of icon components.
//!
//! Folders are processed one at a time in discovery order. A failing icon
//! is logged and left out of its barrel; folder-level and structural errors
//! stop the run.

use indexmap::IndexMap;
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    compiler::{DeclarationCompiler, NoopCompiler, TscCompiler},
    config::{Config, Layout},
    constants::INDEX_FILE,
    error::{Error, Result},
    formatter::{NoopFormatter, PrettierFormatter, SourceFormatter},
    naming::ComponentName,
    renderer::{MiniJinjaRenderer, TemplateRenderer, INDEX_TEMPLATE},
    report::{print_report, GeneratedFile},
    synthesizer::{Framework, Synthesizer},
    walker::{check_collisions, discover_folders, IconFile, IconSource, SourceFolder},
};

/// A component written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedComponent {
    pub name: ComponentName,
    pub framework: Framework,
    pub path: PathBuf,
    pub source: String,
}

/// Icons of one folder and the components generated from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderGroup {
    pub folder: String,
    pub output_dir: PathBuf,
    pub icons: Vec<IconSource>,
    /// Keyed by name: a later icon with the same name replaces the earlier
    /// one but keeps its position.
    pub components: IndexMap<ComponentName, Vec<GeneratedComponent>>,
}

impl FolderGroup {
    fn new(folder: &SourceFolder, output_dir: PathBuf) -> Self {
        Self {
            folder: folder.name.clone(),
            output_dir,
            icons: Vec::new(),
            components: IndexMap::new(),
        }
    }

    pub fn generated_files(&self) -> impl Iterator<Item = GeneratedFile> + '_ {
        self.components
            .values()
            .flatten()
            .map(|component| GeneratedFile::new(component.name.as_str(), &component.path))
    }
}

#[derive(Debug, Default)]
pub struct BuildSummary {
    pub folders: Vec<FolderGroup>,
    pub generated: Vec<GeneratedFile>,
    pub index_files: Vec<PathBuf>,
    /// Icons or barrels that could not be generated
    pub failures: usize,
    pub diagnostics: Vec<String>,
}

/// Writes a text file, creating missing parent directories.
pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    if let Err(e) = fs::write(path, content) {
        // never leave a truncated file behind
        let _ = fs::remove_file(path);
        return Err(Error::IoError(e));
    }
    Ok(())
}

/// Path of a component file inside `output_dir`.
pub fn component_path(
    output_dir: &Path,
    name: &ComponentName,
    framework: Framework,
    layout: Layout,
) -> PathBuf {
    match layout {
        Layout::Nested => output_dir
            .join(name.as_str())
            .join(format!("index.{}", framework.extension())),
        Layout::Flat => output_dir.join(format!("{}.{}", name, framework.extension())),
    }
}

/// Module specifier a barrel uses to re-export a component.
pub fn barrel_module(name: &ComponentName, framework: Framework, layout: Layout) -> String {
    match (framework, layout) {
        (Framework::React, _) => format!("./{name}"),
        (Framework::Vue, Layout::Nested) => format!("./{name}/index.vue"),
        (Framework::Vue, Layout::Flat) => format!("./{name}.vue"),
    }
}

/// Drives discovery, synthesis, barrels, declarations and the report.
pub struct Builder<'a> {
    config: &'a Config,
    renderer: &'a dyn TemplateRenderer,
    formatter: &'a dyn SourceFormatter,
    compiler: &'a dyn DeclarationCompiler,
    synthesizer: Synthesizer<'a>,
}

impl<'a> Builder<'a> {
    pub fn new(
        config: &'a Config,
        renderer: &'a dyn TemplateRenderer,
        formatter: &'a dyn SourceFormatter,
        compiler: &'a dyn DeclarationCompiler,
    ) -> Self {
        let synthesizer = Synthesizer::new(renderer, config.synthesis_defaults());
        Self { config, renderer, formatter, compiler, synthesizer }
    }

    /// Regenerates the output tree.
    ///
    /// # Flow
    /// 1. Discovers the entry root and its immediate subdirectories
    /// 2. Aborts if any mirrored folder would resolve to the entry folder
    /// 3. Creates the output root
    /// 4. For each folder with icons: recreates the mirrored folder, writes
    ///    one component per icon and framework, then the barrel
    /// 5. Builds type declarations for all barrels and prints the report
    ///
    /// # Errors
    /// * `Error::FolderCollision` before anything is written
    /// * `Error::IoError` if a folder cannot be listed or recreated
    pub fn run(&self) -> Result<BuildSummary> {
        let entry = self.config.entry_dir();
        let output = self.config.output_dir();

        let folders = discover_folders(&entry)?;
        check_collisions(&entry, &output, &folders)?;

        fs::create_dir_all(&output)?;

        let mut summary = BuildSummary::default();
        for folder in folders.iter().filter(|folder| !folder.icons.is_empty()) {
            let (group, failures) = self.process_folder(folder, &output)?;
            summary.failures += failures;

            match self.write_barrel(&group) {
                Ok(Some(index_file)) => summary.index_files.push(index_file),
                Ok(None) => {}
                Err(e) => {
                    error!("{}", e);
                    summary.failures += 1;
                }
            }

            summary.generated.extend(group.generated_files());
            summary.folders.push(group);
        }

        summary.diagnostics = match self.compiler.compile(&summary.index_files) {
            Ok(diagnostics) => diagnostics,
            Err(e) => vec![e.to_string()],
        };
        for diagnostic in &summary.diagnostics {
            info!("{}", diagnostic);
        }

        if summary.failures > 0 {
            warn!("{} files could not be generated, see the errors above", summary.failures);
        }
        print_report(&summary.generated);
        Ok(summary)
    }

    /// Recreates the mirrored folder and generates every icon in it.
    ///
    /// Failures limited to one icon are logged and counted; anything else,
    /// such as a broken template, stops the run.
    fn process_folder(
        &self,
        folder: &SourceFolder,
        output: &Path,
    ) -> Result<(FolderGroup, usize)> {
        let output_dir = if folder.is_root() {
            output.to_path_buf()
        } else {
            output.join(&folder.name)
        };
        debug!("Processing folder '{}' into {}", folder.name, output_dir.display());

        if !folder.is_root() && output_dir.exists() {
            fs::remove_dir_all(&output_dir)?;
        }
        fs::create_dir_all(&output_dir)?;

        let mut group = FolderGroup::new(folder, output_dir);
        let mut failures = 0;

        for icon in &folder.icons {
            match self.process_icon(icon, &group.output_dir) {
                Ok((source, components)) => {
                    group.icons.push(source);
                    if let Some(first) = components.first() {
                        group.components.insert(first.name.clone(), components);
                    }
                }
                Err(e) if e.is_recoverable() => {
                    failures += 1;
                    let e = Error::ProcessError { source_path: icon.path.clone(), e: Box::new(e) };
                    error!("{}", e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok((group, failures))
    }

    /// Generates every configured framework for one icon. Nothing is written
    /// unless all of them synthesize and format cleanly.
    fn process_icon(
        &self,
        icon: &IconFile,
        output_dir: &Path,
    ) -> Result<(IconSource, Vec<GeneratedComponent>)> {
        let source = icon.read()?;
        let name = ComponentName::from_file_name(&source.file_name);

        let mut components = Vec::with_capacity(self.config.generate.len());
        for &framework in &self.config.generate {
            let path = component_path(output_dir, &name, framework, self.config.layout);
            let code = self.synthesizer.synthesize(framework, &name, &source.content)?;
            let code = self.formatter.format(&code, &path)?;
            components.push(GeneratedComponent {
                name: name.clone(),
                framework,
                path,
                source: code,
            });
        }

        for (written, component) in components.iter().enumerate() {
            debug!("Writing {}", component.path.display());
            if let Err(e) = write_file(&component.path, &component.source) {
                for earlier in &components[..written] {
                    let _ = fs::remove_file(&earlier.path);
                }
                return Err(e);
            }
        }
        Ok((source, components))
    }

    /// Writes `index.ts` re-exporting the folder's components in discovery
    /// order. Barrels target the first configured framework.
    fn write_barrel(&self, group: &FolderGroup) -> Result<Option<PathBuf>> {
        if group.components.is_empty() {
            return Ok(None);
        }
        let framework = self.config.generate[0];

        let exports: Vec<_> = group
            .components
            .keys()
            .map(|name| {
                serde_json::json!({
                    "name": name.as_str(),
                    "module": barrel_module(name, framework, self.config.layout),
                })
            })
            .collect();

        let index_file = group.output_dir.join(INDEX_FILE);
        let context = serde_json::json!({ "exports": exports });
        let code = self.renderer.render(INDEX_TEMPLATE, &context)?;
        let code = self.formatter.format(&code, &index_file)?;

        debug!("Writing {}", index_file.display());
        write_file(&index_file, &code)?;
        Ok(Some(index_file))
    }
}

/// Builds the output tree with collaborators chosen from `config`.
pub fn build_icons(config: &Config) -> Result<BuildSummary> {
    let renderer = MiniJinjaRenderer::new()?;

    let formatter: Box<dyn SourceFormatter> = if config.format {
        Box::new(PrettierFormatter::new(&config.formatter))
    } else {
        Box::new(NoopFormatter)
    };
    let compiler: Box<dyn DeclarationCompiler> = if config.declarations {
        Box::new(TscCompiler::new(&config.compiler, config.clean_sources))
    } else {
        Box::new(NoopCompiler)
    };

    Builder::new(config, &renderer, &*formatter, &*compiler).run()
}
