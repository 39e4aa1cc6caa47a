pub mod fixtures;

use layerconf::{ConfigError, Element, LayeredConfig, combine_all, parse};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Installs a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parse an XML fixture, panicking with the parser's message on bad input
pub fn xml(text: &str) -> Element {
    parse(text).unwrap_or_else(|e| panic!("invalid fixture: {}\n{}", e, text))
}

/// Combine the given layers (least dominant first) and finalize
pub fn merged(layers: &[&str]) -> Result<Element, Box<dyn std::error::Error>> {
    let trees: Vec<Element> = layers.iter().map(|text| xml(text)).collect();
    Ok(combine_all(&trees)?)
}

/// Combine and serialize, the most convenient form for assertions
pub fn merged_xml(layers: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    Ok(merged(layers)?.to_xml_string()?)
}

/// Run the full build over XML layers with default options
pub fn build(layers: &[&str]) -> Result<Element, ConfigError> {
    let mut config = LayeredConfig::new();
    for layer in layers {
        config = config.add_xml(layer)?;
    }
    config.build()
}
