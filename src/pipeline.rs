// src/pipeline.rs
use crate::error::ConfigError;
use crate::options::ConfigOptions;
use layerconf_combine::{Combiner, strip_merge_attributes};
use layerconf_props::{
    CompoundPropertyResolver, MapPropertyResolver, OneOfPropertyResolver, PropertyResolver,
    RecursivePropertyResolver, XmlPropertyResolver, environment_resolver, filter_element,
};
use layerconf_tree::{Element, parse};
use std::fs;
use std::io;
use std::path::Path;

/// A builder that folds configuration layers into one resolved tree.
///
/// Layers are added from least to most dominant. [`build`](Self::build)
/// merges them, drops leftover `DEFAULTS` skeletons, removes the merge
/// attributes and expands placeholders against the standard resolver chain:
///
/// 1. resolvers added with [`with_resolver`](Self::with_resolver), in order;
/// 2. `oneof:` alternatives;
/// 3. the properties section of the merged document;
/// 4. environment variables under `env.`, whose names may be computed
///    (`${env.${var}}`);
/// 5. dotted paths into the merged document itself.
///
/// `oneof:` must precede the recursive sources, since those expand the
/// placeholders of a requested name before looking it up.
#[derive(Debug, Default)]
pub struct LayeredConfig {
    layers: Vec<Element>,
    resolvers: Vec<Box<dyn PropertyResolver>>,
    options: ConfigOptions,
}

impl LayeredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: ConfigOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// Adds an already built tree as the next, more dominant layer.
    pub fn add_layer(mut self, layer: Element) -> Self {
        self.layers.push(layer);
        self
    }

    /// Parses `xml` and adds it as the next layer.
    pub fn add_xml(self, xml: &str) -> Result<Self, ConfigError> {
        Ok(self.add_layer(parse(xml)?))
    }

    /// Reads and parses an XML file and adds it as the next layer.
    pub fn add_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            ConfigError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read layer from '{}': {}", path_ref.display(), e),
            ))
        })?;
        self.add_xml(&source)
    }

    /// Registers a resolver that is consulted before the built-in sources.
    pub fn with_resolver(mut self, resolver: impl PropertyResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Merges all layers and post-processes the result.
    pub fn build(self) -> Result<Element, ConfigError> {
        let mut combiner = Combiner::new();
        for layer in &self.layers {
            combiner.combine(layer)?;
        }
        let mut root = combiner.finalize()?;

        if self.options.strip_merge_attributes {
            strip_merge_attributes(&mut root);
        }

        if self.options.filter {
            let chain = resolver_chain(self.resolvers, &self.options, &root);
            log::debug!("Filtering merged <{}> through {} resolver(s)", root.tag, chain.len());
            filter_element(&mut root, &chain)?;
        }

        Ok(root)
    }
}

/// Builds the standard chain over a snapshot of the merged `root`.
fn resolver_chain(
    custom: Vec<Box<dyn PropertyResolver>>,
    options: &ConfigOptions,
    root: &Element,
) -> CompoundPropertyResolver {
    let mut chain = CompoundPropertyResolver::new();
    for resolver in custom {
        chain.push(resolver);
    }
    chain.push(Box::new(OneOfPropertyResolver::new()));

    let section = options
        .properties_section
        .as_deref()
        .and_then(|tag| root.child_elements().find(|child| child.tag == tag));
    if let Some(section) = section {
        let properties = MapPropertyResolver::from_section(section);
        log::debug!("Using {} propert(ies) from <{}>", properties.len(), section.tag);
        chain.push(Box::new(RecursivePropertyResolver::new(properties)));
    }

    if options.environment {
        chain.push(Box::new(RecursivePropertyResolver::new(environment_resolver())));
    }
    chain.push(Box::new(RecursivePropertyResolver::new(XmlPropertyResolver::new(
        root.clone(),
        options.match_root,
    ))));
    chain
}
