//! System prompt framings and the fixed contact footer.

use crate::search::types::Snippet;

use super::StrategyLabel;

macro_rules! contact_block {
    () => {
        "\n---\n\
         📞 **Want to connect directly with Arehone?**\n\
         - LinkedIn: https://www.linkedin.com/in/arehone-matodzi-766ab0210/\n\
         - Email: arehonematodzi456@gmail.com\n\
         - Phone: 0739298456\n"
    };
}

macro_rules! generation_error_marker {
    () => {
        "⚠️ Error: I couldn't generate a response right now."
    };
}

/// Appended to every system prompt and to the generation fallback.
pub const CONTACT_BLOCK: &str = contact_block!();

#[cfg(test)]
pub const GENERATION_ERROR_MARKER: &str = generation_error_marker!();

/// Reply used whenever the completion backend fails.
pub const GENERATION_FALLBACK: &str = concat!(
    generation_error_marker!(),
    " Please try again in a moment, or reach out to Arehone directly.\n",
    contact_block!()
);

/// Stand-in knowledge when retrieval produced nothing.
pub const NO_INFORMATION: &str = "No information found.";

/// Instruction framing, one per retrieval tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptFrame<'a> {
    Direct { question: &'a str },
    Enhanced { question: &'a str },
    General,
}

impl<'a> PromptFrame<'a> {
    pub fn for_strategy(strategy: StrategyLabel, question: &'a str) -> Self {
        match strategy {
            StrategyLabel::Direct => PromptFrame::Direct { question },
            StrategyLabel::Enhanced => PromptFrame::Enhanced { question },
            StrategyLabel::Default => PromptFrame::General,
        }
    }

    pub fn render(&self, knowledge: &str) -> String {
        match self {
            PromptFrame::Direct { question } => format!(
                "You are Arehone's AI assistant helping employers and recruiters learn about Arehone Matodzi.\n\n\
                 Below are retrieved facts and background about Arehone based on their professional documents. \
                 Use them to answer the user's question clearly, concisely, and informatively.\n\n\
                 Knowledge Base:\n{knowledge}\n\n\
                 User Question: \"{question}\""
            ),
            PromptFrame::Enhanced { question } => format!(
                "You are Arehone's AI assistant. Based on the enhanced search combining the user question \
                 and Arehone's profile, here's what we found.\n\n\
                 Data:\n{knowledge}\n\n\
                 User Question: \"{question}\""
            ),
            PromptFrame::General => format!(
                "You are Arehone's AI assistant. No exact matches were found for the user's question. \
                 Here's what we know about Arehone Matodzi in general; use it as background for your reply.\n\n\
                 General Profile:\n{knowledge}"
            ),
        }
    }
}

/// Assemble the system prompt: framed knowledge followed by the contact block.
pub fn build_system_prompt(strategy: StrategyLabel, snippets: &[Snippet], question: &str) -> String {
    let knowledge = if snippets.is_empty() {
        NO_INFORMATION.to_string()
    } else {
        snippets.join("\n\n")
    };

    let framed = PromptFrame::for_strategy(strategy, question).render(&knowledge);
    format!("{}{}", framed.trim(), CONTACT_BLOCK)
}
