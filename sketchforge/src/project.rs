//! Generated project data model.
//!
//! `ArduinoProject` is the structured payload produced by the generation
//! service. It is treated as an opaque, immutable value: the library never
//! validates its contents, it only decodes it. Field names follow the
//! camelCase wire contract of the generation schema.

use serde::{Deserialize, Serialize};

/// A complete generated Arduino project: sketch source, parts list and a
/// textual wiring description.
///
/// Every field is tolerant of omission so a partial service response still
/// decodes (missing fields become empty defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArduinoProject {
    /// Short title for the project.
    #[serde(default)]
    pub project_name: String,

    /// One or two sentences describing what the project does.
    #[serde(default)]
    pub summary: String,

    /// Parts list with quantities and the role of each part.
    #[serde(default)]
    pub components: Vec<ComponentEntry>,

    /// Textual description of the circuit wiring (which pin connects to
    /// what, through which resistor, and so on).
    #[serde(default)]
    pub circuit_description: String,

    /// Arduino libraries the sketch depends on, if any.
    #[serde(default)]
    pub libraries: Vec<String>,

    /// The complete Arduino sketch (`setup()`/`loop()`).
    #[serde(default)]
    pub code: String,
}

/// A single entry in the parts list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentEntry {
    /// Component name, e.g. "Arduino Uno" or "220 ohm resistor".
    pub name: String,

    /// How many of this component the project needs.
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// What the component is for in this circuit.
    #[serde(default)]
    pub purpose: String,
}

fn default_quantity() -> u32 {
    1
}
