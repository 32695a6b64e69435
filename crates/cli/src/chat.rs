use anyhow::Result;
use counsel_knowledge::KnowledgeStore;
use counsel_matcher::ChatEngine;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const GREETING: &str = "Ask a legal question. Type :reload to refresh the knowledge base, :quit to exit.";

/// Line-oriented conversation on stdin/stdout
pub async fn run<S: KnowledgeStore>(engine: &ChatEngine<S>, suggestions: usize) -> Result<()> {
    let mut out = std::io::stdout();
    writeln!(out, "{GREETING}")?;

    let starters = engine.random_suggestions(suggestions);
    if !starters.is_empty() {
        writeln!(out, "Try asking:")?;
        for question in &starters {
            writeln!(out, "  - {question}")?;
        }
    }
    out.flush()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":quit" | ":q" => break,
            ":reload" => match engine.reload().await {
                Ok(report) => writeln!(out, "Reloaded {} records.", report.records)?,
                Err(err) => writeln!(out, "Reload failed, still serving the previous knowledge base: {err}")?,
            },
            _ => writeln!(out, "{}\n", engine.get_response(Some(&line)))?,
        }
        out.flush()?;
    }
    Ok(())
}
