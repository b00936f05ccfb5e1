//! Interactive prompts.
//!
//! The prompts are generic over the reader and writer so the whole flow
//! can be driven from in-memory buffers in tests. The sequence mirrors
//! the questions the tool asks: region, profile, then the target menu.

use std::io::{BufRead, Write};

use colored::Colorize;
use snafu::prelude::*;

use crate::{Error, InvalidChoiceSnafu, ReadInputSnafu, Target, WritePromptSnafu};

/// Prints `label` and reads one trimmed line.
pub fn read_trimmed(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> Result<String, Error> {
    write!(output, "{label}").context(WritePromptSnafu)?;
    output.flush().context(WritePromptSnafu)?;
    let mut line = String::new();
    input.read_line(&mut line).context(ReadInputSnafu)?;
    Ok(line.trim().to_owned())
}

/// Free-text region prompt. Empty input takes the default.
pub fn region(
    input: &mut impl BufRead,
    output: &mut impl Write,
    default: &str,
) -> Result<String, Error> {
    let answer = read_trimmed(input, output, &format!("AWS region [{default}]: "))?;
    Ok(if answer.is_empty() {
        default.to_owned()
    } else {
        answer
    })
}

/// Optional profile prompt. Empty input means "use the default chain".
pub fn profile(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<String>, Error> {
    let answer = read_trimmed(input, output, "AWS profile (leave empty for default): ")?;
    Ok(if answer.is_empty() { None } else { Some(answer) })
}

/// Prints the numbered target menu and parses the selection.
///
/// Anything that is not a number in `1..=4` is the invalid-choice error;
/// the caller is expected to abort rather than re-prompt.
pub fn target(input: &mut impl BufRead, output: &mut impl Write) -> Result<Target, Error> {
    writeln!(output, "{}", "Select a deployment target:".bold()).context(WritePromptSnafu)?;
    for (i, target) in Target::ALL.iter().enumerate() {
        let number = (i + 1).to_string();
        writeln!(output, "  {}) {}", number.cyan(), target.label()).context(WritePromptSnafu)?;
    }
    let answer = read_trimmed(input, output, "Choice: ")?;
    let choice = answer.parse::<u8>().unwrap_or(0);
    Target::from_menu_choice(choice).context(InvalidChoiceSnafu { input: answer })
}
