//! Scans a pending byte buffer for the largest prefix that ends at a safe
//! block boundary (spec §4.4.1).

/// Returns the length of the largest prefix of `pending` that is safe to
/// freeze, or `None` if no boundary has appeared yet.
///
/// Boundaries, in the priority order the scan naturally produces them:
/// 1. The line immediately after a fenced code block's closing fence.
/// 2. The line immediately after a blank line, as long as no fence is
///    currently open.
///
/// The scan always returns the *last* boundary found, not the first — a
/// single `append` should freeze as much as is currently safe.
pub fn advance_boundary(pending: &[u8]) -> Option<usize> {
    let mut last_boundary = None;
    let mut open_fence: Option<(u8, usize)> = None;
    let mut i = 0usize;

    while i < pending.len() {
        let line_start = i;
        let line_end = pending[i..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|p| i + p)
            .unwrap_or(pending.len());
        let has_newline = line_end < pending.len();
        let line = &pending[line_start..line_end];

        let trimmed_start = line.iter().position(|&b| b != b' ' && b != b'\t').unwrap_or(line.len());
        let content = &line[trimmed_start..];
        let run_char = content.first().copied();
        let run_len = run_char.map_or(0, |c| content.iter().take_while(|&&b| b == c).count());
        let is_fence_line = matches!(run_char, Some(b'`') | Some(b'~')) && run_len >= 3;

        match open_fence {
            Some((fc, min_len)) => {
                if is_fence_line && run_char == Some(fc) && run_len >= min_len {
                    open_fence = None;
                    if has_newline {
                        last_boundary = Some(line_end + 1);
                    }
                }
            }
            None => {
                if is_fence_line {
                    open_fence = Some((run_char.unwrap(), run_len));
                } else if content.is_empty() && has_newline {
                    last_boundary = Some(line_end + 1);
                }
            }
        }

        if !has_newline {
            break;
        }
        i = line_end + 1;
    }

    last_boundary
}
