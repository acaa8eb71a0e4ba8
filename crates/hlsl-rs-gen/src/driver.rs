//! Plans, renders and writes every output artifact.
use std::path::{Path, PathBuf};

use snafu::prelude::*;

use crate::{
    CreateDirSnafu, Error, ReadFileSnafu, WriteFileSnafu,
    generators::{self, GenerateOptions},
    registry::TypeRegistry,
    render::{self, BANNER, GeneratedCode},
};

/// Name of the artifact that includes every per-type artifact.
pub const MODULE_FILE: &str = "mod.rs";
/// Name of the artifact mapping HLSL type names to Rust paths.
pub const REGISTRY_FILE: &str = "registry.rs";

/// One rendered output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub contents: String,
}

/// What a run did to each artifact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
}

pub struct Driver {
    options: GenerateOptions,
    registry: TypeRegistry,
}

impl Driver {
    pub fn new(options: GenerateOptions) -> Result<Self, Error> {
        Ok(Self {
            options,
            registry: TypeRegistry::build()?,
        })
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Renders every artifact in memory, without touching the disk.
    ///
    /// Artifacts of a shape come in primary, functions, extensions order,
    /// shapes in registry order, followed by the registry-info and module
    /// artifacts.
    pub fn plan(&self) -> Result<Vec<Artifact>, Error> {
        let mut artifacts = vec![];
        for shape in self.registry.shapes() {
            log::debug!("rendering {}", shape.name());
            let sections = generators::generate(*shape, &self.options)?;
            let mut kinds = sections.iter().map(|(kind, _)| *kind).collect::<Vec<_>>();
            kinds.sort();
            kinds.dedup();
            for kind in kinds {
                artifacts.push(Artifact {
                    file_name: kind.file_name(shape),
                    contents: render::render_artifact(*shape, kind, &sections)?,
                });
            }
        }
        artifacts.push(self.registry_artifact()?);
        artifacts.push(module_artifact(&artifacts)?);
        Ok(artifacts)
    }

    /// Renders everything, then writes the artifacts whose content differs
    /// from what is already in `out_dir`.
    pub fn run(&self, out_dir: impl AsRef<Path>) -> Result<Report, Error> {
        let out_dir = out_dir.as_ref();
        let artifacts = self.plan()?;
        std::fs::create_dir_all(out_dir).context(CreateDirSnafu { path: out_dir })?;
        let mut report = Report::default();
        for artifact in artifacts {
            let path = out_dir.join(&artifact.file_name);
            if write_if_changed(&path, &artifact.contents)? {
                log::info!("wrote {}", path.display());
                report.written.push(path);
            } else {
                log::trace!("{} is up to date", path.display());
                report.unchanged.push(path);
            }
        }
        Ok(report)
    }

    /// The artifacts that a [`Driver::run`] into `out_dir` would write.
    pub fn check(&self, out_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, Error> {
        let out_dir = out_dir.as_ref();
        let mut stale = vec![];
        for artifact in self.plan()? {
            let path = out_dir.join(&artifact.file_name);
            if read_existing(&path)?.as_deref() != Some(artifact.contents.as_str()) {
                stale.push(path);
            }
        }
        Ok(stale)
    }

    fn registry_artifact(&self) -> Result<Artifact, Error> {
        let crate_name = &self.options.crate_name;
        let mut code = GeneratedCode::default();
        code.line(BANNER);
        code.line("");
        code.doc(Some("Every generated type as `(HLSL name, fully qualified Rust path)`."));
        code.line("pub const TYPES: &[(&str, &str)] = &[");
        code.indented(|code| {
            for shape in self.registry.shapes() {
                code.line(format!(
                    "(\"{}\", \"{crate_name}::{}\"),",
                    shape.hlsl_name(),
                    shape.name()
                ));
            }
        });
        code.line("];");
        code.line("");
        code.doc(Some(
            "Resolves an HLSL type name such as `float3x4` to the fully qualified Rust type.\n\n\
             Returns `None` for names that are not built-in vector or matrix types.",
        ));
        code.block("pub fn lookup_type(name: &str) -> Option<&'static str>", |code| {
            code.block("match name", |code| {
                for shape in self.registry.shapes() {
                    code.line(format!(
                        "\"{}\" => Some(\"{crate_name}::{}\"),",
                        shape.hlsl_name(),
                        shape.name()
                    ));
                }
                code.line("_ => None,");
                Ok(())
            })
        })?;
        let contents = code.source();
        render::validate(REGISTRY_FILE, &contents)?;
        Ok(Artifact {
            file_name: REGISTRY_FILE.into(),
            contents,
        })
    }
}

/// Includes every per-type artifact from the build script's `OUT_DIR`.
fn module_artifact(artifacts: &[Artifact]) -> Result<Artifact, Error> {
    let mut code = GeneratedCode::default();
    code.line(BANNER);
    code.line("");
    for artifact in artifacts {
        if artifact.file_name == REGISTRY_FILE {
            continue;
        }
        code.line(format!(
            "include!(concat!(env!(\"OUT_DIR\"), \"/{}\"));",
            artifact.file_name
        ));
    }
    let contents = code.source();
    render::validate(MODULE_FILE, &contents)?;
    Ok(Artifact {
        file_name: MODULE_FILE.into(),
        contents,
    })
}

fn read_existing(path: &Path) -> Result<Option<String>, Error> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).context(ReadFileSnafu { path }),
    }
}

/// Writes `contents` to `path` unless it already holds exactly that.
/// Returns whether the file was written.
fn write_if_changed(path: &Path, contents: &str) -> Result<bool, Error> {
    if read_existing(path)?.as_deref() == Some(contents) {
        return Ok(false);
    }
    std::fs::write(path, contents).context(WriteFileSnafu { path })?;
    Ok(true)
}
