//! Template rendering into host configuration files.
//!
//! A render is one [`TemplateSpec`]: a target path, the name of a bundled
//! template and the data it is rendered against. Targets are always
//! overwritten, so rendering the same spec twice leaves the same bytes on disk.

use minijinja::{Environment, UndefinedBehavior, Value};
use std::fs::{self, DirBuilder};
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;
use tracing::{debug, error};

use crate::addressing::ip4prefix;
use crate::assets::{AssetBundle, EmbeddedAssets};
use crate::config::ConfigurationRecord;
use crate::error::{DsError, Result};

/// Mode for directories created on the way to a target file.
const DIR_MODE: u32 = 0o755;

fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.add_function("ip4prefix", ip4prefix);
    env
}

/// One file-rendering operation.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSpec<'a> {
    pub target: &'a Path,
    pub source: &'a str,
    /// `None` for templates whose output does not depend on the team.
    pub data: Option<&'a ConfigurationRecord>,
}

/// Renders a template into a file.
pub trait TemplateRenderer {
    fn render(&self, spec: TemplateSpec<'_>) -> Result<()>;
}

/// Renders bundled templates with minijinja and writes them to disk.
///
/// Templates can call `ip4prefix(Team)` to get the team's `10.x.y` prefix.
/// Referencing a field the data does not have is an error rather than an
/// empty string.
pub struct FsTemplateRenderer<A = EmbeddedAssets> {
    assets: A,
}

impl Default for FsTemplateRenderer<EmbeddedAssets> {
    fn default() -> Self {
        Self::new(EmbeddedAssets)
    }
}

impl<A: AssetBundle> FsTemplateRenderer<A> {
    pub fn new(assets: A) -> Self {
        Self { assets }
    }

    /// Render `source` against `data` without touching the filesystem.
    pub fn render_to_string(
        &self,
        source: &str,
        data: Option<&ConfigurationRecord>,
    ) -> Result<String> {
        let text = self.assets.lookup(source).ok_or_else(|| {
            error!(source, "Template is not bundled");
            DsError::TemplateNotFound(source.to_string())
        })?;

        let mut env = environment();
        env.add_template(source, text).map_err(|e| {
            error!(source, error = %e, "Error parsing template");
            DsError::template(source, e)
        })?;

        let ctx = match data {
            Some(record) => Value::from_serialize(record),
            None => minijinja::context! {},
        };

        let tmpl = env
            .get_template(source)
            .map_err(|e| DsError::template(source, e))?;
        tmpl.render(ctx).map_err(|e| {
            error!(source, data = ?data, error = %e, "Error executing template");
            DsError::template(source, e)
        })
    }
}

impl<A: AssetBundle> TemplateRenderer for FsTemplateRenderer<A> {
    fn render(&self, spec: TemplateSpec<'_>) -> Result<()> {
        let TemplateSpec {
            target,
            source,
            data,
        } = spec;

        if let Some(parent) = target.parent() {
            DirBuilder::new()
                .recursive(true)
                .mode(DIR_MODE)
                .create(parent)
                .map_err(|e| {
                    error!(path = %target.display(), error = %e, "Error creating target template path");
                    DsError::io(parent, e)
                })?;
        }

        // Render fully before truncating the target so a template error
        // leaves the previous file in place.
        let content = self.render_to_string(source, data)?;

        fs::write(target, content).map_err(|e| {
            error!(file = %target.display(), error = %e, "Error creating target file");
            DsError::io(target, e)
        })?;

        debug!(file = %target.display(), source, "Rendered template");
        Ok(())
    }
}
