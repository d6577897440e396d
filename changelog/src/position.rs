use crate::utils::RELEASE_HEADER_PATTERN;

/// Index of the first release header at or after `start`.
pub fn find_release_header<S: AsRef<str>>(lines: &[S], start: usize) -> Option<usize> {
    lines
        .iter()
        .skip(start)
        .position(|line| RELEASE_HEADER_PATTERN.is_match(line.as_ref()))
        .map(|pos| pos + start)
}

/// Everything from the first release header onward, or nothing if the
/// document has no release yet.
pub fn existing_body<S: AsRef<str>>(lines: &[S]) -> &[S] {
    match find_release_header(lines, 0) {
        Some(idx) => &lines[idx..],
        None => &[],
    }
}
