use std::env;
use std::path::Path;

use parley_config::speech::CommandSpec;

/// Arguments of `spec` with every `{name}` placeholder replaced
pub fn expand_args(spec: &CommandSpec, vars: &[(&str, &str)]) -> Vec<String> {
    spec.args
        .iter()
        .map(|arg| {
            vars.iter().fold(arg.clone(), |acc, (name, value)| {
                acc.replace(&format!("{{{name}}}"), value)
            })
        })
        .collect()
}

/// Whether `program` resolves to a file, either as a path or through `PATH`
pub fn program_available(program: &str) -> bool {
    if program.is_empty() {
        return false;
    }

    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return direct.is_file();
    }

    let Some(paths) = env::var_os("PATH") else {
        return false;
    };

    env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(program);
        candidate.is_file() || (cfg!(windows) && candidate.with_extension("exe").is_file())
    })
}
