//! Prompt templates for the two documentation passes per file.

/// Prompt asking for a 50-word summary of the file contents.
pub fn summary_prompt(text: &str) -> String {
    format!("Summarize this text in 50 words: \n\n {text}")
}

/// Prompt asking for a description of the file's main algorithm or logic
/// flow, without echoing the code back.
pub fn logic_flow_prompt(text: &str) -> String {
    format!(
        "Analyze the following code and describe its main algorithm or logic flow. \
         Focus on the sequence of operations, control structures (loops, conditionals), \
         function calls, and data transformations. Do not include the code in the output. \
         Explain the purpose of the code in terms of its logic.\n\nCode:\n```\n{text}\n```"
    )
}
