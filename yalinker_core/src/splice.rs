/// Byte offsets of the first start marker and the first end marker in a
/// piece of text.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Region {
	pub start: usize,
	pub end: usize,
}

/// Locate the region between `start_marker` and `end_marker`.
///
/// Only the first occurrence of each marker counts. Returns `None` when
/// either marker is missing or the end marker does not come after the start
/// marker.
pub fn find_region(content: &str, start_marker: &str, end_marker: &str) -> Option<Region> {
	let start = content.find(start_marker)?;
	let end = content.find(end_marker)?;

	(start < end).then_some(Region { start, end })
}

/// Blank padding matching everything between the previous line break and
/// `start`. Tabs are kept, every other character becomes a space.
pub fn start_padding(content: &str, start: usize) -> String {
	let mut padding: Vec<char> = content[..start]
		.chars()
		.rev()
		.take_while(|c| *c != '\n' && *c != '\r')
		.map(|c| if c == '\t' { '\t' } else { ' ' })
		.collect();
	padding.reverse();

	padding.into_iter().collect()
}

/// Replace the interior of `region` with `lines`.
///
/// Each line, and the end marker, is placed on its own line with the start
/// marker's indentation. Text up to and including the start marker and text
/// from the end marker onward are kept verbatim.
pub fn splice_region(
	content: &str,
	region: Region,
	start_marker: &str,
	lines: &[String],
	line_ending: &str,
) -> String {
	let padding = start_padding(content, region.start);
	let separator = format!("{line_ending}{padding}");
	let head = &content[..region.start + start_marker.len()];
	let tail = &content[region.end..];
	let body = lines.join(&separator);

	let mut spliced =
		String::with_capacity(head.len() + body.len() + tail.len() + separator.len() * 2);
	spliced.push_str(head);
	spliced.push_str(&separator);
	spliced.push_str(&body);
	spliced.push_str(&separator);
	spliced.push_str(tail);

	spliced
}

/// Splice `lines` between the markers in `content`.
///
/// The content comes back unchanged when there are no lines or when the
/// markers do not form a region.
pub fn splice(
	content: &str,
	start_marker: &str,
	end_marker: &str,
	lines: &[String],
	line_ending: &str,
) -> String {
	if lines.is_empty() {
		return content.to_string();
	}

	match find_region(content, start_marker, end_marker) {
		Some(region) => splice_region(content, region, start_marker, lines, line_ending),
		None => content.to_string(),
	}
}
