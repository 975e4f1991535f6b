use std::path::Path;

use reo_config::Config;
use reo_core::external::{ToolCommand, ToolRunner};
use reo_core::pipeline::Pipeline;

/// Result of looking for one dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCheck {
    pub name: String,
    /// Distribution package providing it
    pub package: &'static str,
    pub found: bool,
}

impl ToolCheck {
    pub fn status_line(&self) -> String {
        if self.found {
            format!("{} seems to be installed. OK.", self.name)
        } else {
            format!("{} is not installed! Dependency missing!", self.name)
        }
    }
}

async fn check_tool(runner: &dyn ToolRunner, program: &str, flag: &str, package: &'static str) -> ToolCheck {
    let found = match runner.run(&ToolCommand::new(program).arg(flag)).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("{}", e);
            false
        }
    };
    ToolCheck {
        name: program.to_string(),
        package,
        found,
    }
}

/// Looks for the speech synthesizer, the dict client and server, and the WordNet data
pub async fn check(runner: &dyn ToolRunner, config: &Config) -> Vec<ToolCheck> {
    let (speech, client, server) = tokio::join!(
        check_tool(runner, &config.speech.program, "--version", "espeak-ng"),
        check_tool(runner, &config.dictionary.client, "-V", "dictd"),
        check_tool(runner, "dictd", "-V", "dictd"),
    );

    let data_file = Path::new(&config.dictionary.data_file);
    let data = ToolCheck {
        name: "WordNet database".to_string(),
        package: "dict-wn",
        found: tokio::fs::try_exists(data_file).await.unwrap_or(false),
    };
    if !data.found {
        tracing::warn!("WordNet database {} not found", data_file.display());
    }

    vec![speech, client, server, data]
}

/// Installation hints for whatever `check` did not find
pub fn advice(checks: &[ToolCheck]) -> String {
    let mut packages: Vec<&str> = Vec::new();
    for check in checks.iter().filter(|check| !check.found) {
        if !packages.contains(&check.package) {
            packages.push(check.package);
        }
    }

    if packages.is_empty() {
        return "Everything Looks Perfect!\nYou should be able to run it without any issues!"
            .to_string();
    }

    let packages = packages.join(" ");
    format!(
        "Some dependencies are missing.\n\
         For Ubuntu, Debian, etc:\n'sudo apt install {packages}'\n\
         For Arch Linux (WordNet from AUR):\n'pacaur -S {packages}'"
    )
}

pub async fn run_check(runner: &dyn ToolRunner, config: &Config) {
    let checks = check(runner, config).await;
    for check in &checks {
        println!("{}", check.status_line());
    }
    println!("{}", advice(&checks));
}

async fn version_output(runner: &dyn ToolRunner, program: &str, flag: &str) -> String {
    match runner.run(&ToolCommand::new(program).arg(flag)).await {
        // dict prints its version on stderr
        Ok(output) => format!("{}{}", output.stdout, output.stderr).trim().to_string(),
        Err(e) => format!("Looks like missing components. ({program})\n{e}"),
    }
}

/// `--adversion` report
pub async fn advanced_version(runner: &dyn ToolRunner, config: &Config, pipeline: &Pipeline) -> String {
    let wordnet = pipeline.wordnet_version().await;
    let year = if wordnet == "3.0" { "2006" } else { "2011" };

    let dict = version_output(runner, &config.dictionary.client, "-V").await;
    let espeak = version_output(runner, &config.speech.program, "--version").await;

    format!(
        "Reo - {}\n\nWordNet Version {wordnet} ({year}) (Installed)\nDict Version Info:\n{dict}\n\neSpeak-ng Version Info:\n{espeak}",
        env!("CARGO_PKG_VERSION")
    )
}
