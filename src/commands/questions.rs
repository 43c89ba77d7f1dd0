//! @acp:module "Questions Command"
//! @acp:summary "List the question graph structure"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;
use serde_json::{json, Value};

use crate::graph::{Question, QuestionGraph};
use crate::questions;

/// Options for the questions command
#[derive(Debug, Clone, Default)]
pub struct QuestionsOptions {
    /// Output as JSON
    pub json: bool,
}

/// JSON description of one branch
pub fn describe(question: &Question) -> Value {
    json!({
        "name": question.name,
        "kind": question.kind.as_str(),
        "choices": question.choices,
        "conditions": question
            .conditions
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>(),
        "optional": question.optional,
        "expertOnly": question.expert_only,
        "default": question.default,
        "validated": question.validate.is_some(),
        "transformed": question.transform.is_some(),
        "migrated": question.migrate.is_some(),
    })
}

fn print_tree(graph: &QuestionGraph) {
    println!(
        "{} {} questions ({} branches)\n",
        style("→").cyan(),
        graph.names().len(),
        graph.len()
    );
    for q in graph.iter() {
        let mut flags = Vec::new();
        if q.optional {
            flags.push("optional");
        }
        if q.expert_only {
            flags.push("expert");
        }
        if q.migrate.is_none() {
            flags.push("no migration");
        }

        println!(
            "  {} {}{}",
            style(q.name).bold(),
            style(q.kind.as_str()).dim(),
            if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            }
        );
        for c in &q.conditions {
            println!("      {} {}", style("if").yellow(), c);
        }
        if !q.choices.is_empty() && q.choices.len() <= 6 {
            println!("      {}", style(q.choices.join(" | ")).cyan());
        }
    }
}

/// Execute the questions command
pub fn execute_questions(options: QuestionsOptions) -> Result<()> {
    let graph = questions::standard();

    if options.json {
        let listing: Vec<Value> = graph.iter().map(describe).collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print_tree(&graph);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_widget_branch() {
        let graph = questions::standard();
        let widget = graph
            .branches("type")
            .nth(1)
            .map(describe)
            .unwrap();

        assert_eq!(widget["choices"], json!(["visualization-widgets"]));
        assert_eq!(widget["conditions"], json!(["features excludes adapter"]));
        assert_eq!(widget["expertOnly"], json!(false));
    }
}
