use serde::{Deserialize, Serialize};

/// External program invocation. `{lang}` and `{text}` in `args` are substituted per call.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

fn default_synthesizer() -> Option<CommandSpec> {
    Some(CommandSpec::new("espeak-ng", &["-v", "{lang}", "--", "{text}"]))
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_synthesizer")]
    pub synthesizer: Option<CommandSpec>,
    /// Prints one transcript on stdout and exits. Mic is disabled when unset.
    #[serde(default)]
    pub recognizer: Option<CommandSpec>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            synthesizer: default_synthesizer(),
            recognizer: None,
        }
    }
}
