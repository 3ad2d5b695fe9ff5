/// Join the non-empty head parts and the message with single spaces, then
/// put each continuation line on its own row.
pub fn assemble_line(head: &[&str], message: &str, additional: &[String]) -> String {
    let first = head
        .iter()
        .copied()
        .chain(std::iter::once(message))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if additional.is_empty() {
        return first;
    }
    format!("{}\n{}", first, additional.join("\n"))
}
