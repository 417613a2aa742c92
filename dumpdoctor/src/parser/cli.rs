//! Single-value lookups over CLI command lines and the problem banner.

use crate::parser::section::PROBLEM_DESCRIPTION;

/// Value of `set <name> = <value>`, trimmed. The first matching line wins.
pub fn extract_cli_line(text: &str, name: &str) -> Option<String> {
    text.lines().find_map(|line| {
        line.trim_start()
            .strip_prefix("set ")?
            .strip_prefix(name)?
            .strip_prefix(" = ")
            .map(|value| value.trim().to_string())
    })
}

/// Value of a non-`set` directive of the form `<prefix> <value>`.
pub fn extract_non_set_cli_line(text: &str, prefix: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let value = line.trim_start().strip_prefix(prefix)?.strip_prefix(' ')?.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Free text the user entered in the problem banner:
///
/// ```text
/// # Problem description
/// #
/// # Quad flips on takeoff
/// #
/// #
/// ```
pub fn extract_problem(text: &str) -> Option<String> {
    let lines = text
        .lines()
        .map(str::trim)
        .skip_while(|l| *l != PROBLEM_DESCRIPTION)
        .skip(1)
        .skip_while(|l| *l == "#" || l.is_empty());

    let mut description = Vec::new();
    for line in lines {
        if line == "#" {
            break;
        }
        let Some(content) = line.strip_prefix('#') else {
            break;
        };
        description.push(content.trim());
    }

    let description = description.join("\n").trim().to_string();
    (!description.is_empty()).then_some(description)
}
