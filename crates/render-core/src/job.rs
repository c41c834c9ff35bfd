//! A single render: one template, its values and overrides

use render_fs::{ConfigStore, FileMode, NormalizedPath, io};
use render_template::{Rendered, Template, ValueTree};

use crate::managed::ManagedFile;
use crate::{Error, Result};

/// Everything needed to render one template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderJob {
    pub template: NormalizedPath,
    /// Values files, layered in order
    pub values: Vec<NormalizedPath>,
    /// `path=value` overrides applied after all values files
    pub overrides: Vec<String>,
    pub target: Option<NormalizedPath>,
    pub mode: FileMode,
}

impl RenderJob {
    pub fn new(template: impl Into<NormalizedPath>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    pub fn with_values(mut self, values: impl IntoIterator<Item = NormalizedPath>) -> Self {
        self.values.extend(values);
        self
    }

    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = String>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    pub fn with_target(mut self, target: impl Into<NormalizedPath>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_mode(mut self, mode: FileMode) -> Self {
        self.mode = mode;
        self
    }

    /// Read and parse the template file.
    pub fn load_template(&self) -> Result<Template> {
        let text = io::read_text(&self.template)?;
        Ok(Template::parse(self.template.as_str(), &text)?)
    }

    /// Build the value tree from values files and overrides.
    pub fn value_tree(&self, store: &ConfigStore) -> Result<ValueTree> {
        let mut tree = ValueTree::load(store, &self.values)?;
        for input in &self.overrides {
            tree.apply_override(input)?;
        }
        Ok(tree)
    }

    /// Render without touching any target.
    pub fn render(&self, store: &ConfigStore) -> Result<Rendered> {
        let template = self.load_template()?;
        let tree = self.value_tree(store)?;
        Ok(template.render(&tree)?)
    }

    /// Render and bind the result to the job's target.
    pub fn managed_file(&self, store: &ConfigStore) -> Result<ManagedFile> {
        let target = self.target.clone().ok_or_else(|| Error::NoTarget {
            template: self.template.to_string(),
        })?;
        let rendered = self.render(store)?;
        Ok(ManagedFile::new(
            self.template.as_str(),
            target,
            rendered.text,
            self.mode,
        ))
    }
}
