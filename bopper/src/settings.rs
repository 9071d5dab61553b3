use std::{collections::HashMap, io::{Read, Write}, path::PathBuf};

use bopper_core::Preset;
use bopper_plugin::{ParameterId, ParameterValue};
use serde::{Deserialize, Serialize};

/// Which animation the user picked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    Preset(usize),
    Custom(PathBuf),
}

impl Selection {
    /// Out-of-range indices fall back to the first preset.
    pub fn preset(&self) -> Option<Preset> {
        match self {
            Selection::Preset(index) => Some(Preset::from_index(*index).unwrap_or_default()),
            Selection::Custom(_) => None,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::Preset(Preset::default().index())
    }
}

impl From<Preset> for Selection {
    fn from(preset: Preset) -> Self {
        Self::Preset(preset.index())
    }
}

/// Everything the host stores with a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub parameters: HashMap<ParameterId, ParameterValue>,
}

impl Settings {
    pub fn write(&self, mut writer: impl Write) -> std::io::Result<()> {
        let settings_json = serde_json::to_string(self)?;
        write!(writer, "{settings_json}")
    }

    pub fn read(mut reader: impl Read) -> std::io::Result<Self> {
        let mut settings_json = String::new();
        reader.read_to_string(&mut settings_json)?;

        Ok(serde_json::from_str(&settings_json)?)
    }
}
