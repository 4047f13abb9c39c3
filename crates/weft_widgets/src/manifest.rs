//! Declarative widget manifest
//!
//! A [`ManifestFactory`] turns a list of [`WidgetSpec`] entries into the
//! ordered widget set a registry consumes. Validation happens at
//! construction: the registry itself never checks ids, so the factory
//! boundary is where unique-by-convention ids are actually enforced.

use std::time::Duration;

use rustc_hash::FxHashSet;
use thiserror::Error;
use weft_core::{Widget, WidgetFactory};

use crate::banner::{Banner, BannerConfig};
use crate::button::{Button, ButtonConfig};
use crate::event::UiEvent;
use crate::toggle::{Toggle, ToggleConfig};

/// Declarative description of one widget
#[derive(Clone, Debug)]
pub enum WidgetSpec {
    Button {
        id: String,
        label: String,
    },
    Toggle {
        id: String,
        label: String,
        on: bool,
    },
    Banner {
        id: String,
        text: String,
        auto_dismiss: Duration,
    },
}

impl WidgetSpec {
    /// The id this spec declares
    pub fn id(&self) -> &str {
        match self {
            WidgetSpec::Button { id, .. } => id,
            WidgetSpec::Toggle { id, .. } => id,
            WidgetSpec::Banner { id, .. } => id,
        }
    }
}

/// Errors rejected at manifest construction
#[derive(Error, Debug)]
pub enum ManifestError {
    /// A spec declared no id
    #[error("widget at position {0} has an empty id")]
    EmptyId(usize),

    /// Two specs declared the same id
    #[error("duplicate widget id: {0}")]
    DuplicateId(String),

    /// A banner would dismiss immediately
    #[error("banner {0} has a zero auto-dismiss duration")]
    ZeroDismissDuration(String),
}

/// Factory building widgets from a validated manifest
pub struct ManifestFactory {
    specs: Vec<WidgetSpec>,
}

impl ManifestFactory {
    /// Validate a manifest; rejects empty ids, duplicate ids, and
    /// zero-duration banners
    pub fn new(specs: Vec<WidgetSpec>) -> Result<Self, ManifestError> {
        let mut seen = FxHashSet::default();
        for (index, spec) in specs.iter().enumerate() {
            if spec.id().is_empty() {
                return Err(ManifestError::EmptyId(index));
            }
            if !seen.insert(spec.id().to_string()) {
                return Err(ManifestError::DuplicateId(spec.id().to_string()));
            }
            if let WidgetSpec::Banner {
                id, auto_dismiss, ..
            } = spec
            {
                if auto_dismiss.is_zero() {
                    return Err(ManifestError::ZeroDismissDuration(id.clone()));
                }
            }
        }
        Ok(Self { specs })
    }

    /// Number of widgets this manifest declares
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the manifest declares no widgets
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl WidgetFactory<UiEvent> for ManifestFactory {
    fn build_widgets(&self) -> Vec<Box<dyn Widget<UiEvent>>> {
        self.specs
            .iter()
            .map(|spec| -> Box<dyn Widget<UiEvent>> {
                match spec {
                    WidgetSpec::Button { id, label } => Box::new(Button::new(
                        id.as_str(),
                        ButtonConfig::new().label(label.clone()),
                    )),
                    WidgetSpec::Toggle { id, label, on } => Box::new(Toggle::new(
                        id.as_str(),
                        ToggleConfig::new().label(label.clone()).on(*on),
                    )),
                    WidgetSpec::Banner {
                        id,
                        text,
                        auto_dismiss,
                    } => Box::new(Banner::new(
                        id.as_str(),
                        BannerConfig::new()
                            .text(text.clone())
                            .auto_dismiss(*auto_dismiss),
                    )),
                }
            })
            .collect()
    }
}
