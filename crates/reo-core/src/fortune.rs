use reo_config::extras::ExtrasConfig;

use crate::error::ToolError;
use crate::external::{ToolCommand, ToolRunner};
use crate::markup::Markup;
use crate::types::MarkupText;

const FORTUNE_FAIL: &str = "Easter Egg Fail!!! Install 'fortune' or 'fortunemod'.";
const COWFORTUNE_FAIL: &str = "Easter Egg Fail!!! Install 'fortune' or 'fortunemod' and also 'cowsay'.";

async fn run_text(runner: &dyn ToolRunner, command: ToolCommand) -> Result<String, ToolError> {
    let output = runner.run(&command).await?;
    if !output.success {
        return Err(ToolError::Status {
            program: command.program,
            status: output.stderr.trim().to_string(),
        });
    }
    Ok(output.stdout)
}

async fn fortune_text(runner: &dyn ToolRunner, extras: &ExtrasConfig) -> Result<String, ToolError> {
    run_text(runner, ToolCommand::new(&extras.fortune).arg("-a")).await
}

/// `fortune -a`, escaped and in monospace
pub async fn fortune(runner: &dyn ToolRunner, extras: &ExtrasConfig, m: Markup) -> MarkupText {
    match fortune_text(runner, extras).await {
        Ok(text) => m.mono(&m.text(&text)),
        Err(e) => {
            tracing::error!("{FORTUNE_FAIL}\n{e}");
            m.mono(&m.text(FORTUNE_FAIL))
        }
    }
}

/// A fortune piped through cowsay
pub async fn cow_fortune(runner: &dyn ToolRunner, extras: &ExtrasConfig, m: Markup) -> MarkupText {
    let cow = async {
        let text = fortune_text(runner, extras).await?;
        run_text(runner, ToolCommand::new(&extras.cowsay).stdin(text)).await
    };

    match cow.await {
        Ok(text) => m.mono(&m.text(&text)),
        Err(e) => {
            tracing::error!("{COWFORTUNE_FAIL}\n{e}");
            m.mono(&m.text(COWFORTUNE_FAIL))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::testing::ScriptedRunner;
    use crate::types::MarkupFlavor;

    #[tokio::test]
    async fn test_fortune_is_escaped_monospace() {
        let runner = ScriptedRunner::new().reply("fortune", &["-a"], "<b>Bold</b> & brave\n");
        let out = fortune(&runner, &ExtrasConfig::default(), Markup::new(MarkupFlavor::Pango)).await;
        assert_eq!(out, "<tt>&lt;b&gt;Bold&lt;/b&gt; &amp; brave\n</tt>");
    }

    #[tokio::test]
    async fn test_fortune_missing() {
        let runner = ScriptedRunner::new();
        let out = fortune(&runner, &ExtrasConfig::default(), Markup::new(MarkupFlavor::Pango)).await;
        assert_eq!(out, format!("<tt>{FORTUNE_FAIL}</tt>"));
    }

    #[tokio::test]
    async fn test_cow_fortune_pipes_text() {
        let runner = ScriptedRunner::new()
            .reply("fortune", &["-a"], "moo")
            .reply("cowsay", &[], " _____\n< moo >\n");
        let out = cow_fortune(&runner, &ExtrasConfig::default(), Markup::new(MarkupFlavor::Pango)).await;
        assert_eq!(out, "<tt> _____\n&lt; moo &gt;\n</tt>");

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[1].stdin.as_deref(), Some("moo"));
    }

    #[tokio::test]
    async fn test_cow_fortune_without_cowsay() {
        let runner = ScriptedRunner::new().reply("fortune", &["-a"], "moo");
        let out = cow_fortune(&runner, &ExtrasConfig::default(), Markup::new(MarkupFlavor::Plain)).await;
        assert_eq!(out, COWFORTUNE_FAIL);
    }
}
