use reo_config::speech::SpeechConfig;

use crate::error::ToolError;
use crate::external::{ToolCommand, ToolRunner};

pub fn read_aloud_command(speech: &SpeechConfig, term: &str) -> ToolCommand {
    ToolCommand::new(&speech.program)
        .arg(format!("-v{}", speech.voice))
        .arg("-s")
        .arg(speech.speed.to_string())
        .arg("--")
        .arg(term)
}

/// Says `term` through the speakers
pub async fn read_term(
    runner: &dyn ToolRunner,
    speech: &SpeechConfig,
    term: &str,
) -> Result<(), ToolError> {
    let command = read_aloud_command(speech, term);
    let output = runner.run(&command).await?;
    if !output.success {
        return Err(ToolError::Status {
            program: command.program,
            status: output.stderr.trim().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_aloud_command() {
        let command = read_aloud_command(&SpeechConfig::default(), "cat");
        assert_eq!(command.to_string(), "espeak-ng -ven-uk-rp -s 120 -- cat");
    }
}
